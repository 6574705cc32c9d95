//! Session store: registration, login, profile, and the persisted session

mod types;

use reqwest::Client;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::lifecycle::{track, Lifecycle, LifecycleFlags};

pub use types::*;

/// Fixed file name for the persisted session record
const SESSION_FILE: &str = "pitchboard-session.json";

/// Read-only accessor for the current bearer token.
///
/// Handed to other stores so token access is an explicit dependency rather
/// than an ambient read into session state.
#[derive(Clone)]
pub struct TokenProvider {
    session: Arc<Mutex<Option<Session>>>,
}

impl TokenProvider {
    /// The current bearer token, if a session exists
    pub fn token(&self) -> Option<String> {
        let session = self.session.lock().unwrap();
        session.as_ref().map(|s| s.token.clone())
    }
}

/// Client for authentication and profile management
pub struct SessionStore {
    /// The base URL for the PitchBoard API
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,

    /// Lifecycle flags for the most recent operation
    lifecycle: Mutex<Lifecycle>,

    /// Directory holding the persisted session record
    persist_dir: Option<PathBuf>,
}

impl SessionStore {
    /// Create a new SessionStore, rehydrating any persisted session
    pub(crate) fn new(url: &str, client: Client, options: &ClientOptions) -> Self {
        let persist_dir = options.persist_dir.clone();
        let initial = persist_dir
            .as_ref()
            .and_then(|dir| load_persisted(&dir.join(SESSION_FILE)));

        Self {
            url: url.to_string(),
            client,
            session: Arc::new(Mutex::new(initial)),
            lifecycle: Mutex::new(Lifecycle::default()),
            persist_dir,
        }
    }

    fn users_url(&self, path: &str) -> String {
        format!("{}/users{}", self.url, path)
    }

    fn session_path(&self) -> Option<PathBuf> {
        self.persist_dir.as_ref().map(|dir| dir.join(SESSION_FILE))
    }

    /// Replace the current session and persist the new record
    fn store_session(&self, session: Session) {
        {
            let mut current = self.session.lock().unwrap();
            *current = Some(session.clone());
        }
        if let Some(path) = self.session_path() {
            persist(&path, &session);
        }
    }

    /// Drop the current session, in memory and on disk
    fn discard_session(&self) {
        {
            let mut current = self.session.lock().unwrap();
            *current = None;
        }
        if let Some(path) = self.session_path() {
            clear_persisted(&path);
        }
    }

    fn require_token(&self) -> Result<String, Error> {
        let session = self.session.lock().unwrap();
        session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or_else(|| Error::unauthorized("Not logged in"))
    }

    /// Register a new account.
    ///
    /// On success the returned session replaces the current one and is
    /// persisted. On failure any previously authenticated session is
    /// discarded as well.
    pub async fn register(&self, request: RegisterRequest) -> Result<Session, Error> {
        track(&self.lifecycle, async {
            let url = self.users_url("/register");
            let result = Fetch::post(&self.client, &url)
                .json(&request)?
                .execute::<Session>()
                .await;

            match result {
                Ok(session) => {
                    self.store_session(session.clone());
                    Ok(session)
                }
                Err(err) => {
                    self.discard_session();
                    Err(err)
                }
            }
        })
        .await
    }

    /// Log in with email and password.
    ///
    /// Same replace/persist/discard semantics as [`register`](Self::register).
    pub async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        track(&self.lifecycle, async {
            let url = self.users_url("/login");
            let result = Fetch::post(&self.client, &url)
                .json(&credentials)?
                .execute::<Session>()
                .await;

            match result {
                Ok(session) => {
                    self.store_session(session.clone());
                    Ok(session)
                }
                Err(err) => {
                    self.discard_session();
                    Err(err)
                }
            }
        })
        .await
    }

    /// Fetch the profile for the authenticated user and shallow-merge the
    /// returned fields into the current session
    pub async fn get_profile(&self) -> Result<ProfileFields, Error> {
        track(&self.lifecycle, async {
            let token = self.require_token()?;
            let url = self.users_url("/profile");
            let fields = Fetch::get(&self.client, &url)
                .bearer_auth(&token)
                .execute::<ProfileFields>()
                .await?;

            self.merge_profile(&fields);
            Ok(fields)
        })
        .await
    }

    /// Update the profile and shallow-merge the server's response into the
    /// current session
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<ProfileFields, Error> {
        track(&self.lifecycle, async {
            let token = self.require_token()?;
            let url = self.users_url("/profile");
            let fields = Fetch::put(&self.client, &url)
                .bearer_auth(&token)
                .json(&update)?
                .execute::<ProfileFields>()
                .await?;

            self.merge_profile(&fields);
            Ok(fields)
        })
        .await
    }

    fn merge_profile(&self, fields: &ProfileFields) {
        let merged = {
            let mut current = self.session.lock().unwrap();
            match current.as_mut() {
                Some(session) => {
                    session.merge(fields);
                    Some(session.clone())
                }
                // The session was cleared while the request was in flight.
                None => None,
            }
        };

        if let Some(session) = merged {
            if let Some(path) = self.session_path() {
                persist(&path, &session);
            }
        }
    }

    /// Log out: clear the session and remove the persisted record.
    ///
    /// Purely local, never fails, no network call.
    pub fn logout(&self) {
        self.discard_session();
    }

    /// Clear the lifecycle flags without touching session data
    pub fn reset(&self) {
        self.lifecycle.lock().unwrap().reset();
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<Session> {
        let session = self.session.lock().unwrap();
        session.clone()
    }

    /// Snapshot of the lifecycle flags
    pub fn lifecycle(&self) -> LifecycleFlags {
        self.lifecycle.lock().unwrap().snapshot()
    }

    /// A read-only token accessor for other stores
    pub fn token_provider(&self) -> TokenProvider {
        TokenProvider {
            session: Arc::clone(&self.session),
        }
    }
}

fn load_persisted(path: &std::path::Path) -> Option<Session> {
    let bytes = fs::read(path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(session) => Some(session),
        Err(err) => {
            log::warn!("discarding unreadable session record: {}", err);
            None
        }
    }
}

fn persist(path: &std::path::Path, session: &Session) {
    let result = serde_json::to_vec(session)
        .map_err(|err| err.to_string())
        .and_then(|bytes| fs::write(path, bytes).map_err(|err| err.to_string()));

    if let Err(err) = result {
        // Persistence is best-effort; the in-memory session stays valid.
        log::warn!("failed to persist session: {}", err);
    }
}

fn clear_persisted(path: &std::path::Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("failed to remove persisted session: {}", err);
        }
    }
}
