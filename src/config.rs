//! Configuration options for the PitchBoard client

use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the PitchBoard client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Directory for the persisted session record; `None` disables
    /// persistence entirely
    pub persist_dir: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            persist_dir: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the directory used to persist the session across restarts
    pub fn with_persist_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.persist_dir = Some(value.into());
        self
    }
}
