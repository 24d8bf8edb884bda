//! HTTP endpoints for the classifier.
//!
//! `POST /api/ai/parse` takes `{ "input": string }` from an authenticated
//! caller and answers `{ success, action, message }`. Nothing is persisted;
//! the client confirms the proposed action and stores it elsewhere.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::auth::Authenticated;
use crate::classifier::{ProposedAction, classify};
use crate::config::ServerConfig;
use crate::error::ApiError;

/// Utterances are short; anything larger is rejected before parsing.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// Success envelope for `POST /api/ai/parse`.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub action: ProposedAction,
    /// Same text as `action.confirmationMessage`, for clients that only show a toast.
    pub message: String,
}

impl ParseResponse {
    pub fn new(action: ProposedAction) -> Self {
        let message = action.confirmation_message().to_string();
        Self {
            success: true,
            action,
            message,
        }
    }
}

/// Build the Axum router with the health and parse routes.
pub fn router(config: Arc<ServerConfig>) -> Router {
    let cors = cors_layer(&config.cors_origins);
    let state = AppState { config };

    let router = Router::new()
        .route("/health", get(health))
        .route("/api/ai/parse", post(parse_action))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        );

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> crate::error::Result<()> {
    let addr = config.bind_addr()?;
    let app = router(Arc::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Parse API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Parse API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return Some(layer.allow_origin(Any));
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(layer.allow_origin(allowed))
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "fit-intent"
    }))
}

// ── Parse ───────────────────────────────────────────────────────────────

async fn parse_action(
    _auth: Authenticated,
    body: Bytes,
) -> Result<Json<ParseResponse>, ApiError> {
    let request: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Parse request body is not JSON");
        ApiError::InvalidBody
    })?;

    let input = request
        .get("input")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::InputRequired)?;

    let action = classify(input);
    info!(
        kind = %action.kind(),
        confidence = action.confidence(),
        "Classified utterance"
    );

    Ok(Json(ParseResponse::new(action)))
}
