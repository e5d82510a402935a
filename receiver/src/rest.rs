use crate::errors::Error;
use crate::ingest::ingest;
use crate::metrics::gather_metrics;
use crate::model::{ErrorResponse, HealthResponse};
use crate::store::RecordStore;
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub strict_validation: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(health))
        .route("/metrics/prometheus", get(metrics_handler))
        .route("/ingest", post(ingest_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn metrics_handler() -> String {
    gather_metrics()
}

async fn ingest_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, Error> {
    let outcome = ingest(
        state.store.as_ref(),
        state.strict_validation,
        &body,
        uri.path(),
    )
    .await?;

    Ok(match outcome {
        Some(stored) => Json(stored).into_response(),
        // Wrong shape with strict validation off: no body at all.
        None => StatusCode::OK.into_response(),
    })
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidBody(_) | Error::InvalidShape => StatusCode::BAD_REQUEST,
            Error::StorageWrite(_) | Error::Config(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("API error: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
