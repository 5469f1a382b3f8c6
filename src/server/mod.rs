//! HTTP surface of the sync server.
//!
//! A single resource takes snapshot writes (`POST`) and serves snapshot
//! reads (`GET`), both at `/` and `/sync`. Store access is serialized
//! through one lock so at most one operation is in flight.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::db::SheetStore;
use crate::sync::{self, SyncError, SyncFailure, SyncSuccess};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SheetStore>>,
}

impl AppState {
    pub fn new(store: SheetStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Builds the router with all routes and the HTTP trace layer.
///
/// Snapshots carry the full state, so request bodies are not size-limited.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_snapshot).post(write_snapshot))
        .route("/sync", get(read_snapshot).post(write_snapshot))
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn write_snapshot(State(state): State<AppState>, body: Bytes) -> Response {
    let store = state.store.lock().await;
    match sync::write_snapshot(&store, &body).await {
        Ok(summary) => Json(SyncSuccess::new(summary.synced_at)).into_response(),
        Err(e) => failure(e),
    }
}

async fn read_snapshot(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    match sync::read_snapshot(&store, Utc::now()).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => failure(e),
    }
}

async fn dashboard(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    match sync::read_dashboard(&store).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => failure(e),
    }
}

fn failure(e: SyncError) -> Response {
    let status = if e.is_client_error() {
        tracing::warn!("Rejected sync request: {}", e);
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Sync operation failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(SyncFailure::from(&e))).into_response()
}
