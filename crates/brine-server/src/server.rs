//! HTTP surface: routes, handlers, error mapping.
//!
//! Thin plumbing only: every request maps onto one operation of the core
//! store contract and encodes the result. No shared state lives here.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use brine_core::{HashStore, JobId, JobStore, StoreError};

/// How long `GET /hash/{id}` waits for a pending digest before giving up.
const GET_HASH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: HashStore,
}

/// Build the router over a store.
pub fn router(store: HashStore) -> Router {
    Router::new()
        .route("/hash", post(create_hash))
        .route("/hash/{id}", get(get_hash))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

/// Store error mapped to an HTTP status + message body.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound(_) | StoreError::Timeout(_) | StoreError::JobFailed(_) => {
                StatusCode::NOT_FOUND
            }
            StoreError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message)).into_response()
    }
}

/// `POST /hash`: accept a password, respond with the job id. The hash is
/// computed in the background; the id comes back immediately.
async fn create_hash(
    State(state): State<AppState>,
    Json(password): Json<String>,
) -> Result<Json<u64>, ApiError> {
    let id = state.store.submit(password.as_bytes()).await?;
    Ok(Json(id.as_u64()))
}

/// `GET /hash/{id}`: respond with the base64-encoded digest.
async fn get_hash(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<String>, ApiError> {
    let digest = state
        .store
        .get_hash(JobId::new(id), GET_HASH_TIMEOUT)
        .await?;
    Ok(Json(BASE64.encode(digest)))
}

#[derive(Debug, Serialize)]
struct StatsBody {
    total: u64,

    /// Mean compute time in whole milliseconds.
    average: u64,
}

/// `GET /stats`: completed count and average compute time.
async fn get_stats(State(state): State<AppState>) -> Json<StatsBody> {
    let snap = state.store.stats().await;
    Json(StatsBody {
        total: snap.total,
        average: snap.average_millis(),
    })
}
