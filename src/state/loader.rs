// Data loading for the viewer.
// Fetches projects and activity through a short-lived local store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::activity::{ActivityItem, describe};
use crate::cache::{DEFAULT_TTL, EVENTS_KEY, LocalStore, PROJECTS_KEY};
use crate::config::Config;
use crate::error::{FolioError, Result};
use crate::github::{GitHubClient, GitHubEvent, Project, RateLimit};

pub const PROJECTS_ERROR: &str = "Failed to load projects";
pub const ACTIVITY_ERROR: &str = "Failed to load activity";

/// Kind of data a section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Projects,
    Activity,
}

impl DataKind {
    pub fn store_key(&self) -> &'static str {
        match self {
            DataKind::Projects => PROJECTS_KEY,
            DataKind::Activity => EVENTS_KEY,
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            DataKind::Projects => PROJECTS_ERROR,
            DataKind::Activity => ACTIVITY_ERROR,
        }
    }
}

/// Outcome of one load, with failures already reduced to a display message.
#[derive(Debug, Clone)]
pub enum LoadResult {
    Projects(std::result::Result<Vec<Project>, String>),
    Activity(std::result::Result<Vec<ActivityItem>, String>),
}

/// Fetches with memoization in a [`LocalStore`]. Cheap to clone; clones share
/// one GitHub client.
#[derive(Clone)]
pub struct Loader {
    client: Arc<Mutex<GitHubClient>>,
    username: String,
    store: Option<LocalStore>,
    ttl: Duration,
}

impl Loader {
    pub fn new(config: &Config, store: Option<LocalStore>) -> Result<Self> {
        Ok(Self {
            client: Arc::new(Mutex::new(GitHubClient::new(config)?)),
            username: config.username.clone(),
            store,
            ttl: DEFAULT_TTL,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn rate_limit(&self) -> RateLimit {
        self.client.lock().await.rate_limit().clone()
    }

    fn cached<T: DeserializeOwned>(&self, kind: DataKind, now: DateTime<Utc>) -> Option<T> {
        self.store
            .as_ref()
            .and_then(|store| store.get_if_valid_at(kind.store_key(), now, self.ttl))
    }

    fn remember<T: Serialize>(&self, kind: DataKind, data: &T, now: DateTime<Utc>) {
        if let Some(store) = &self.store {
            if let Err(e) = store.set_at(kind.store_key(), data, now) {
                tracing::warn!(key = kind.store_key(), error = %e, "failed to write cache entry");
            }
        }
    }

    /// Public, non-fork repositories, from the store when fresh.
    pub async fn projects_at(&self, now: DateTime<Utc>) -> Result<Vec<Project>> {
        if let Some(projects) = self.cached(DataKind::Projects, now) {
            return Ok(projects);
        }

        let repos = self.client.lock().await.get_user_repos(&self.username).await?;
        let projects = Project::from_repositories(repos);
        self.remember(DataKind::Projects, &projects, now);
        Ok(projects)
    }

    /// Recent public events, from the store when fresh.
    pub async fn events_at(&self, now: DateTime<Utc>) -> Result<Vec<GitHubEvent>> {
        if let Some(events) = self.cached(DataKind::Activity, now) {
            return Ok(events);
        }

        let events = self
            .client
            .lock()
            .await
            .get_user_events(&self.username)
            .await?;
        self.remember(DataKind::Activity, &events, now);
        Ok(events)
    }

    /// Load one kind of data. The cause of a failure is logged, not shown.
    pub async fn load(&self, kind: DataKind) -> LoadResult {
        let now = Utc::now();
        match kind {
            DataKind::Projects => LoadResult::Projects(
                self.projects_at(now)
                    .await
                    .map_err(|e| self.failed(kind, e)),
            ),
            DataKind::Activity => LoadResult::Activity(
                self.events_at(now)
                    .await
                    .map(|events| events.iter().map(describe).collect())
                    .map_err(|e| self.failed(kind, e)),
            ),
        }
    }

    fn failed(&self, kind: DataKind, error: FolioError) -> String {
        tracing::error!(user = %self.username, ?kind, error = %error, "load failed");
        kind.error_message().to_string()
    }
}
