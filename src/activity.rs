// Activity event formatting.
// Turns a GitHub event into a display line and a link, keyed on the event type.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::github::{EventKind, GitHubEvent};

/// Human-readable form of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub text: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

/// Web URL for an `owner/name` repository.
pub fn repo_url(name: &str) -> String {
    format!("https://github.com/{}", name)
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    size: Option<u64>,
    #[serde(default)]
    commits: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RefPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    ref_type: String,
}

#[derive(Debug, Deserialize)]
struct HtmlLink {
    number: Option<u64>,
    html_url: String,
    #[serde(default)]
    merged: bool,
}

/// Issue as embedded in issue events. Pull requests are issues too; they
/// carry a `pull_request` object.
#[derive(Debug, Deserialize)]
struct IssueRef {
    number: Option<u64>,
    html_url: String,
    pull_request: Option<serde_json::Value>,
}

impl IssueRef {
    fn noun(&self) -> &'static str {
        if self.pull_request.is_some() {
            "pull request"
        } else {
            "issue"
        }
    }
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    action: String,
    issue: IssueRef,
}

#[derive(Debug, Deserialize)]
struct IssueCommentPayload {
    issue: IssueRef,
    comment: HtmlLink,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: String,
    number: Option<u64>,
    pull_request: HtmlLink,
}

#[derive(Debug, Deserialize)]
struct ForkPayload {
    forkee: HtmlLink,
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    release: Release,
}

fn payload<T: serde::de::DeserializeOwned>(event: &GitHubEvent) -> Option<T> {
    serde_json::from_value(event.payload.clone()).ok()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Text and link for a recognized event, or `None` when the payload does not
/// carry what the description needs.
fn describe_known(event: &GitHubEvent) -> Option<(String, String)> {
    let repo = &event.repo.name;
    let url = repo_url(repo);

    match event.kind() {
        EventKind::Push => {
            let p: PushPayload = payload(event)?;
            let count = p.size.unwrap_or(p.commits.len() as u64);
            let link = p
                .git_ref
                .as_deref()
                .and_then(|r| r.strip_prefix("refs/heads/"))
                .map(|branch| format!("{}/commits/{}", url, branch))
                .unwrap_or(url);
            Some((
                format!("Pushed {} to {}", plural(count, "commit"), repo),
                link,
            ))
        }
        EventKind::Create => {
            let p: RefPayload = payload(event)?;
            let text = match (p.ref_type.as_str(), p.git_ref) {
                ("repository", _) => format!("Created repository {}", repo),
                (ref_type, Some(name)) => format!("Created {} {} in {}", ref_type, name, repo),
                (_, None) => return None,
            };
            Some((text, url))
        }
        EventKind::Delete => {
            let p: RefPayload = payload(event)?;
            let name = p.git_ref?;
            Some((format!("Deleted {} {} in {}", p.ref_type, name, repo), url))
        }
        EventKind::Issues => {
            let p: IssuesPayload = payload(event)?;
            let number = p.issue.number?;
            Some((
                format!("{} issue #{} in {}", capitalize(&p.action), number, repo),
                p.issue.html_url,
            ))
        }
        EventKind::IssueComment => {
            let p: IssueCommentPayload = payload(event)?;
            let number = p.issue.number?;
            Some((
                format!("Commented on {} #{} in {}", p.issue.noun(), number, repo),
                p.comment.html_url,
            ))
        }
        EventKind::PullRequest => {
            let p: PullRequestPayload = payload(event)?;
            let number = p.number.or(p.pull_request.number)?;
            let action = if p.action == "closed" && p.pull_request.merged {
                "Merged".to_string()
            } else {
                capitalize(&p.action)
            };
            Some((
                format!("{} pull request #{} in {}", action, number, repo),
                p.pull_request.html_url,
            ))
        }
        EventKind::Watch => Some((format!("Starred {}", repo), url)),
        EventKind::Fork => {
            let p: ForkPayload = payload(event)?;
            Some((format!("Forked {}", repo), p.forkee.html_url))
        }
        EventKind::Release => {
            let p: ReleasePayload = payload(event)?;
            Some((
                format!("Released {} in {}", p.release.tag_name, repo),
                p.release.html_url,
            ))
        }
        EventKind::Public => Some((format!("Made {} public", repo), url)),
        EventKind::Other(_) => None,
    }
}

/// Describe an event. Unknown types, and known types with an unexpected
/// payload, read "{type} in {repo}" and link to the repository.
pub fn describe(event: &GitHubEvent) -> ActivityItem {
    let (text, link) = describe_known(event).unwrap_or_else(|| {
        (
            format!("{} in {}", event.event_type, event.repo.name),
            repo_url(&event.repo.name),
        )
    });

    ActivityItem {
        text,
        link,
        created_at: event.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn event(event_type: &str, payload: Value) -> GitHubEvent {
        serde_json::from_value(json!({
            "id": "1",
            "type": event_type,
            "repo": { "name": "alice/folio" },
            "created_at": "2024-05-01T12:00:00Z",
            "payload": payload
        }))
        .unwrap()
    }

    #[test]
    fn test_push() {
        let item = describe(&event(
            "PushEvent",
            json!({ "ref": "refs/heads/main", "size": 3, "commits": [] }),
        ));
        assert_eq!(item.text, "Pushed 3 commits to alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio/commits/main");
    }

    #[test]
    fn test_push_single_commit_from_list() {
        let item = describe(&event(
            "PushEvent",
            json!({ "ref": "refs/tags/v1", "commits": [{ "sha": "abc" }] }),
        ));
        assert_eq!(item.text, "Pushed 1 commit to alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio");
    }

    #[test]
    fn test_create_branch_and_repository() {
        let branch = describe(&event(
            "CreateEvent",
            json!({ "ref": "feature", "ref_type": "branch" }),
        ));
        assert_eq!(branch.text, "Created branch feature in alice/folio");

        let repo = describe(&event(
            "CreateEvent",
            json!({ "ref": null, "ref_type": "repository" }),
        ));
        assert_eq!(repo.text, "Created repository alice/folio");
        assert_eq!(repo.link, "https://github.com/alice/folio");
    }

    #[test]
    fn test_create_without_ref_falls_back() {
        let item = describe(&event(
            "CreateEvent",
            json!({ "ref": null, "ref_type": "branch" }),
        ));
        assert_eq!(item.text, "CreateEvent in alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio");
    }

    #[test]
    fn test_issue_comment_on_pull_request() {
        let comment = json!({ "html_url": "https://github.com/alice/folio/pull/9#issuecomment-1" });

        let on_pr = describe(&event(
            "IssueCommentEvent",
            json!({
                "issue": {
                    "number": 9,
                    "html_url": "https://github.com/alice/folio/pull/9",
                    "pull_request": { "url": "https://api.github.com/repos/alice/folio/pulls/9" }
                },
                "comment": comment.clone()
            }),
        ));
        assert_eq!(on_pr.text, "Commented on pull request #9 in alice/folio");
        assert_eq!(on_pr.link, "https://github.com/alice/folio/pull/9#issuecomment-1");

        let on_issue = describe(&event(
            "IssueCommentEvent",
            json!({
                "issue": { "number": 4, "html_url": "https://github.com/alice/folio/issues/4" },
                "comment": comment
            }),
        ));
        assert_eq!(on_issue.text, "Commented on issue #4 in alice/folio");
    }

    #[test]
    fn test_issue() {
        let item = describe(&event(
            "IssuesEvent",
            json!({
                "action": "opened",
                "issue": { "number": 12, "html_url": "https://github.com/alice/folio/issues/12" }
            }),
        ));
        assert_eq!(item.text, "Opened issue #12 in alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio/issues/12");
    }

    #[test]
    fn test_pull_request_merged() {
        let item = describe(&event(
            "PullRequestEvent",
            json!({
                "action": "closed",
                "number": 7,
                "pull_request": {
                    "number": 7,
                    "html_url": "https://github.com/alice/folio/pull/7",
                    "merged": true
                }
            }),
        ));
        assert_eq!(item.text, "Merged pull request #7 in alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio/pull/7");
    }

    #[test]
    fn test_pull_request_opened() {
        let item = describe(&event(
            "PullRequestEvent",
            json!({
                "action": "opened",
                "number": 8,
                "pull_request": { "html_url": "https://github.com/alice/folio/pull/8" }
            }),
        ));
        assert_eq!(item.text, "Opened pull request #8 in alice/folio");
    }

    #[test]
    fn test_watch() {
        let item = describe(&event("WatchEvent", json!({ "action": "started" })));
        assert_eq!(item.text, "Starred alice/folio");
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let item = describe(&event("GollumEvent", json!({ "pages": [] })));
        assert_eq!(item.text, "GollumEvent in alice/folio");
        assert_eq!(item.link, "https://github.com/alice/folio");
    }

    #[test]
    fn test_malformed_payload_falls_back() {
        let item = describe(&event("IssuesEvent", json!({})));
        assert_eq!(item.text, "IssuesEvent in alice/folio");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("reopened"), "Reopened");
        assert_eq!(capitalize(""), "");
    }
}
