//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::ServiceError;
use tracing::error;

use super::state::AppState;

/// Convert a [`ServiceError`] into a plain-text response.
///
/// Only [`ServiceError::public_message`] reaches the client.
pub fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.public_message().to_owned()).into_response()
}

/// `GET /services` — list every service in the catalog.
pub async fn list_services(State(state): State<AppState>) -> Response {
    match state.repository.list_services().await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list services");
            error_response(&ServiceError::StoreFailure(e.to_string()))
        }
    }
}

/// `GET /service/:id` — fetch a single service.
///
/// The id is parsed here rather than by the `Path` extractor so that a bad
/// segment, including one that does not decode as UTF-8, yields the catalog's
/// own `400` body.
pub async fn get_service(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let Some(id) = raw_id.ok().and_then(|Path(raw)| raw.parse::<i64>().ok()) else {
        return error_response(&ServiceError::ClientError("Invalid service ID".into()));
    };

    match state.repository.get_service(id).await {
        Ok(Some(service)) => (StatusCode::OK, Json(service)).into_response(),
        Ok(None) => error_response(&ServiceError::NotFound("Service not found".into())),
        Err(e) => {
            error!(error = %e, id, "failed to fetch service");
            error_response(&ServiceError::StoreFailure(e.to_string()))
        }
    }
}

/// `GET /metrics` — Prometheus text exposition of the request metrics.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok((content_type, body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encode error").into_response()
        }
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
