//! Idea collection store: browsing, creation, and like/bookmark toggles

mod types;

use reqwest::Client;
use std::sync::Mutex;
use url::Url;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::lifecycle::{track, Lifecycle, LifecycleFlags};
use crate::session::TokenProvider;

pub use types::*;

/// Client for the idea collection
pub struct IdeaStore {
    /// The base URL for the PitchBoard API
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Read-only access to the current bearer token
    token: TokenProvider,

    /// The current working set of ideas, in display order
    ideas: Mutex<Vec<Idea>>,

    /// Lifecycle flags for the most recent operation
    lifecycle: Mutex<Lifecycle>,
}

impl IdeaStore {
    /// Create a new IdeaStore
    pub(crate) fn new(url: &str, client: Client, token: TokenProvider) -> Self {
        Self {
            url: url.to_string(),
            client,
            token,
            ideas: Mutex::new(Vec::new()),
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    fn ideas_url(&self, path: &str) -> String {
        format!("{}/ideas{}", self.url, path)
    }

    /// Category names contain spaces, so the path segment is percent-encoded
    fn explore_url(&self, category: Category) -> Result<String, Error> {
        let mut url = Url::parse(&self.url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["ideas", "explore", category.as_str()]);
        Ok(url.to_string())
    }

    fn require_token(&self) -> Result<String, Error> {
        self.token
            .token()
            .ok_or_else(|| Error::unauthorized("Not logged in"))
    }

    /// Replace the matching local record with the server's authoritative
    /// copy. Unknown ids (a stale detail view, a filtered-out record) are a
    /// no-op on the collection.
    fn reconcile(&self, updated: &Idea) {
        let mut ideas = self.ideas.lock().unwrap();
        if let Some(slot) = ideas.iter_mut().find(|idea| idea.id == updated.id) {
            *slot = updated.clone();
        }
    }

    /// Fetch every idea, replacing the local collection wholesale.
    ///
    /// Server order is kept as-is; locally mutated entries are discarded.
    pub async fn fetch_all(&self) -> Result<Vec<Idea>, Error> {
        track(&self.lifecycle, async {
            let url = self.ideas_url("");
            let fetched = Fetch::get(&self.client, &url).execute::<Vec<Idea>>().await?;

            let mut ideas = self.ideas.lock().unwrap();
            *ideas = fetched.clone();
            Ok(fetched)
        })
        .await
    }

    /// Fetch the ideas in one category, replacing the local collection
    /// wholesale
    pub async fn fetch_by_category(&self, category: Category) -> Result<Vec<Idea>, Error> {
        track(&self.lifecycle, async {
            let url = self.explore_url(category)?;
            let fetched = Fetch::get(&self.client, &url).execute::<Vec<Idea>>().await?;

            let mut ideas = self.ideas.lock().unwrap();
            *ideas = fetched.clone();
            Ok(fetched)
        })
        .await
    }

    /// Create a new idea.
    ///
    /// Field validation and the token precondition both fail before any
    /// request is made. The created record is inserted at the front of the
    /// collection; most-recent-first is a client convention.
    pub async fn create(&self, draft: IdeaDraft) -> Result<Idea, Error> {
        track(&self.lifecycle, async {
            draft.validate()?;
            let token = self.require_token()?;

            let url = self.ideas_url("");
            let created = Fetch::post(&self.client, &url)
                .bearer_auth(&token)
                .json(&draft)?
                .execute::<Idea>()
                .await?;

            let mut ideas = self.ideas.lock().unwrap();
            ideas.insert(0, created.clone());
            Ok(created)
        })
        .await
    }

    /// Toggle the authenticated user's like on an idea.
    ///
    /// The displayed like state is only authoritative once this resolves;
    /// any optimistic flip belongs to the view layer.
    pub async fn toggle_like(&self, idea_id: &str) -> Result<Idea, Error> {
        self.toggle(idea_id, "like").await
    }

    /// Toggle the authenticated user's bookmark on an idea
    pub async fn toggle_bookmark(&self, idea_id: &str) -> Result<Idea, Error> {
        self.toggle(idea_id, "bookmark").await
    }

    async fn toggle(&self, idea_id: &str, action: &str) -> Result<Idea, Error> {
        track(&self.lifecycle, async {
            let token = self.require_token()?;

            let url = self.ideas_url(&format!("/{}/{}", idea_id, action));
            let updated = Fetch::put(&self.client, &url)
                .bearer_auth(&token)
                .json(&serde_json::json!({}))?
                .execute::<Idea>()
                .await?;

            self.reconcile(&updated);
            Ok(updated)
        })
        .await
    }

    /// Clear the lifecycle flags without touching the collection
    pub fn reset(&self) {
        self.lifecycle.lock().unwrap().reset();
    }

    /// Snapshot of the current collection
    pub fn ideas(&self) -> Vec<Idea> {
        let ideas = self.ideas.lock().unwrap();
        ideas.clone()
    }

    /// Snapshot of the lifecycle flags
    pub fn lifecycle(&self) -> LifecycleFlags {
        self.lifecycle.lock().unwrap().snapshot()
    }
}
