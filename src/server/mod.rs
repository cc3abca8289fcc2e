//! Cached repository proxy.
//!
//! Serves the user's public, non-fork repositories as JSON at
//! `GET /api/github`, refetching from GitHub at most once per TTL window.

mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServeConfig};
use crate::error::{FolioError, Result};
use crate::github::Project;

pub use state::ProxyState;

/// Message returned for every upstream failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch repositories";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Upstream failure, reported without its cause.
#[derive(Debug)]
pub struct FetchFailed;

impl IntoResponse for FetchFailed {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: FETCH_FAILED_MESSAGE,
            }),
        )
            .into_response()
    }
}

async fn list_projects(
    State(state): State<Arc<ProxyState>>,
) -> std::result::Result<Json<Vec<Project>>, FetchFailed> {
    match state.projects().await {
        Ok(projects) => Ok(Json(projects)),
        Err(e) => {
            tracing::error!(user = %state.username(), error = %e, "failed to fetch repositories");
            Err(FetchFailed)
        }
    }
}

/// Liveness plus the time of the last successful upstream fetch.
async fn health_check(State(state): State<Arc<ProxyState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "cachedAt": state.cached_at().await,
    }))
}

/// Build the router for the proxy endpoints.
pub fn router(state: Arc<ProxyState>, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/api/github", get(list_projects))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// HTTP server wrapping a [`ProxyState`].
pub struct ProxyServer {
    state: Arc<ProxyState>,
    config: ServeConfig,
}

impl ProxyServer {
    pub fn new(github: &Config, config: ServeConfig) -> Result<Self> {
        let state = ProxyState::new(github, config.cache_ttl)?;
        Ok(Self {
            state: Arc::new(state),
            config,
        })
    }

    /// Bind and serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| FolioError::Other(format!("invalid listen address: {}", e)))?;
        let router = router(self.state.clone(), self.config.enable_cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            user = %self.state.username(),
            ttl_secs = self.config.cache_ttl.as_secs(),
            "proxy listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
