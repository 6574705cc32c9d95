//! PitchBoard Rust Client Library
//!
//! A Rust client for the PitchBoard startup-idea sharing API. It holds the
//! client-side state the backend is authoritative for: the authenticated
//! session (persisted across restarts), the current idea collection, the
//! request-lifecycle flags a view layer renders from, and the pure
//! filter/sort computation for idea listings.

pub mod config;
pub mod error;
pub mod fetch;
pub mod ideas;
pub mod lifecycle;
pub mod session;
pub mod view;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::ideas::IdeaStore;
use crate::session::SessionStore;

/// The main entry point for the PitchBoard client
pub struct PitchBoard {
    /// The base URL for the PitchBoard API
    pub url: String,

    /// HTTP client used for requests
    pub http_client: Client,

    /// Client options
    pub options: ClientOptions,

    /// Session store for authentication and profile state
    session: SessionStore,

    /// Idea store for the current idea collection
    ideas: IdeaStore,
}

impl PitchBoard {
    /// Create a new PitchBoard client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the PitchBoard API, without a trailing
    ///   `/users` or `/ideas` segment
    ///
    /// # Example
    ///
    /// ```
    /// use pitchboard::PitchBoard;
    ///
    /// let board = PitchBoard::new("https://api.pitchboard.example/api");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new PitchBoard client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use pitchboard::{config::ClientOptions, PitchBoard};
    ///
    /// let options = ClientOptions::default().with_persist_dir("/tmp/pitchboard");
    /// let board = PitchBoard::new_with_options("https://api.pitchboard.example/api", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        let session = SessionStore::new(&url, http_client.clone(), &options);
        let ideas = IdeaStore::new(&url, http_client.clone(), session.token_provider());

        Self {
            url,
            http_client,
            options,
            session,
            ideas,
        }
    }

    /// The session store, for authentication and profile operations
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The idea store, for browsing and posting ideas
    pub fn ideas(&self) -> &IdeaStore {
        &self.ideas
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::ideas::{Category, Idea, IdeaDraft};
    pub use crate::session::{Credentials, ProfileUpdate, RegisterRequest, Session};
    pub use crate::view::{derive_view, CategoryFilter, SortKey};
    pub use crate::PitchBoard;
}
