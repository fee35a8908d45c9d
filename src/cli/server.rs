//! HTTP server mode for triggering ingests

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::ingest::Ingestor;
use crate::source::GameQuery;

/// Body returned for a request that does not name a game
pub const INVALID_REQUEST_MESSAGE: &str = "Please enter the appropriate values!";

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    ingestor: Arc<Ingestor>,
}

/// Build the router
pub fn router(ingestor: Arc<Ingestor>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { ingestor }))
}

/// Start the HTTP server
pub async fn serve(ingestor: Arc<Ingestor>, port: u16) -> Result<()> {
    let app = router(ingestor);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Ingest the game named in the JSON body.
///
/// Responds with the plain-text summary: 200 if any entity was exported,
/// 502 if none was or the record could not be fetched.
async fn ingest(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let query = match serde_json::from_slice::<GameQuery>(&body) {
        Ok(query) if query.validate().is_ok() => query,
        Ok(query) => {
            warn!("Rejected ingest request with blank members: {:?}", query);
            return (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE).into_response();
        }
        Err(e) => {
            warn!("Rejected ingest request: {}", e);
            return (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE).into_response();
        }
    };

    match state.ingestor.run(&query).await {
        Ok(summary) => {
            let status = if summary.any_success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_GATEWAY
            };
            (status, summary.to_string()).into_response()
        }
        Err(e) => {
            error!("Ingest failed for {}: {}", query, e);
            (StatusCode::BAD_GATEWAY, format!("Failed to ingest {query}: {e}\n")).into_response()
        }
    }
}
