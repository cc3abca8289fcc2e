// GitHub API endpoint functions.
// Typed fetches for a user's repositories and public activity events.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{GitHubEvent, Repository};

/// Repositories fetched per request. No further pages are requested.
pub const REPOS_PER_PAGE: u32 = 100;

/// Activity events fetched per request.
pub const EVENTS_PER_PAGE: u32 = 10;

impl GitHubClient {
    /// Get a user's repositories, most recently updated first.
    pub async fn get_user_repos(&mut self, username: &str) -> Result<Vec<Repository>> {
        let params = [
            ("sort", "updated".to_string()),
            ("per_page", REPOS_PER_PAGE.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", username), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Get a user's most recent public events.
    pub async fn get_user_events(&mut self, username: &str) -> Result<Vec<GitHubEvent>> {
        let params = [("per_page", EVENTS_PER_PAGE.to_string())];
        let response = self
            .get_with_params(&format!("/users/{}/events/public", username), &params)
            .await?;
        let events: Vec<GitHubEvent> = response.json().await?;
        Ok(events)
    }
}
