// Shared state for the repository proxy.
// One GitHub client and one cached project list behind a single lock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, Project};

struct ProxyInner {
    client: GitHubClient,
    cache: MemoryCache<Vec<Project>>,
}

/// Answers "list public, non-fork repositories" with at most one upstream
/// call per TTL window.
pub struct ProxyState {
    username: String,
    inner: Mutex<ProxyInner>,
}

impl ProxyState {
    pub fn new(config: &Config, ttl: Duration) -> Result<Self> {
        Ok(Self {
            username: config.username.clone(),
            inner: Mutex::new(ProxyInner {
                client: GitHubClient::new(config)?,
                cache: MemoryCache::new(ttl),
            }),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.projects_at(Utc::now()).await
    }

    /// Cached list when fresh at `now`, otherwise fetch, filter, shape and
    /// store. A failed fetch leaves the cache as it was.
    pub async fn projects_at(&self, now: DateTime<Utc>) -> Result<Vec<Project>> {
        // Held across the fetch so concurrent misses produce one upstream call.
        let mut inner = self.inner.lock().await;

        if let Some(projects) = inner.cache.get_if_valid_at(now) {
            tracing::debug!(count = projects.len(), "serving cached projects");
            return Ok(projects);
        }

        let repos = inner.client.get_user_repos(&self.username).await?;
        let fetched = repos.len();
        let projects = Project::from_repositories(repos);
        tracing::info!(
            user = %self.username,
            fetched,
            kept = projects.len(),
            "refreshed project cache"
        );

        inner.cache.store_at(projects.clone(), now);
        Ok(projects)
    }

    /// When the cached list was last refreshed.
    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().await.cache.cached_at()
    }
}
