// GitHub API response types.
// Upstream repository and event records plus the shaped Project served to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub repository as returned by `/users/{user}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// A public repository shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Repository> for Project {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            language: repo.language,
            topics: repo.topics,
            updated_at: repo.updated_at,
        }
    }
}

impl Project {
    /// Drop forks and private repositories, keeping upstream order.
    pub fn from_repositories(repos: Vec<Repository>) -> Vec<Project> {
        repos
            .into_iter()
            .filter(|repo| !repo.fork && !repo.private)
            .map(Project::from)
            .collect()
    }
}

/// Repository reference embedded in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`.
    pub name: String,
}

/// Public activity event from `/users/{user}/events/public`.
///
/// The payload shape depends on `event_type`, so it is kept as raw JSON and
/// decoded on demand by the activity formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Event type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    Create,
    Delete,
    Issues,
    IssueComment,
    PullRequest,
    Watch,
    Fork,
    Release,
    Public,
    Other(String),
}

impl EventKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "PushEvent" => EventKind::Push,
            "CreateEvent" => EventKind::Create,
            "DeleteEvent" => EventKind::Delete,
            "IssuesEvent" => EventKind::Issues,
            "IssueCommentEvent" => EventKind::IssueComment,
            "PullRequestEvent" => EventKind::PullRequest,
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            "ReleaseEvent" => EventKind::Release,
            "PublicEvent" => EventKind::Public,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl GitHubEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event_type)
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
