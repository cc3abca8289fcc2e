use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio::config::Config;
use folio::github::Project;
use folio::server::{FETCH_FAILED_MESSAGE, ProxyState, router};

const HOUR: Duration = Duration::from_secs(60 * 60);

fn repo(name: &str, fork: bool, private: bool) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("alice/{}", name),
        "html_url": format!("https://github.com/alice/{}", name),
        "description": format!("{} description", name),
        "fork": fork,
        "private": private,
        "stargazers_count": 5,
        "language": "Rust",
        "topics": ["portfolio"],
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

async fn mount_repos(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn state(server: &MockServer, ttl: Duration) -> Arc<ProxyState> {
    let config = Config::new("alice").with_api_base(server.uri());
    Arc::new(ProxyState::new(&config, ttl).unwrap())
}

async fn get(state: Arc<ProxyState>, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router(state, true)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_cache_hit_skips_upstream() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo("folio", false, false)]), 1).await;
    let state = state(&server, HOUR);

    let (status, first) = get(state.clone(), "/api/github").await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = get(state.clone(), "/api/github").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    // `expect(1)` is verified when the mock server drops.
}

#[tokio::test]
async fn test_cache_miss_after_ttl_refetches() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo("folio", false, false)]), 2).await;
    let state = state(&server, HOUR);

    let t0 = Utc::now();
    state.projects_at(t0).await.unwrap();
    assert_eq!(state.cached_at().await, Some(t0));

    let within = t0 + chrono::Duration::minutes(30);
    state.projects_at(within).await.unwrap();
    assert_eq!(state.cached_at().await, Some(t0));

    let after = t0 + chrono::Duration::minutes(61);
    state.projects_at(after).await.unwrap();
    assert_eq!(state.cached_at().await, Some(after));
}

#[tokio::test]
async fn test_forks_and_private_repos_are_filtered() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        json!([
            repo("folio", false, false),
            repo("someone-elses", true, false),
            repo("secret", false, true),
            repo("dotfiles", false, false)
        ]),
        1,
    )
    .await;

    let (status, body) = get(state(&server, HOUR), "/api/github").await;
    assert_eq!(status, StatusCode::OK);

    let projects: Vec<Project> = serde_json::from_slice(&body).unwrap();
    let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["folio", "dotfiles"]);

    let raw: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(raw[0]["url"], "https://github.com/alice/folio");
    assert_eq!(raw[0]["stars"], 5);
    assert_eq!(raw[0]["updatedAt"], "2024-05-01T12:00:00Z");
}

#[tokio::test]
async fn test_empty_upstream_is_empty_list() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([]), 1).await;

    let (status, body) = get(state(&server, HOUR), "/api/github").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn test_upstream_failure_is_generic_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let state = state(&server, HOUR);

    let (status, body) = get(state.clone(), "/api/github").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "error": FETCH_FAILED_MESSAGE })
    );
    assert!(state.cached_at().await.is_none());
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_repos(&server, json!([repo("folio", false, false)]), 1).await;
    let state = state(&server, HOUR);

    assert!(state.projects().await.is_err());
    let projects = state.projects().await.unwrap();
    assert_eq!(projects.len(), 1);
}

#[tokio::test]
async fn test_health_reports_cache_time() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo("folio", false, false)]), 1).await;
    let state = state(&server, HOUR);

    let (status, body) = get(state.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "status": "ok", "cachedAt": null })
    );

    let t0 = Utc::now();
    state.projects_at(t0).await.unwrap();

    let (_, body) = get(state, "/health").await;
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["cachedAt"], serde_json::to_value(t0).unwrap());
}
