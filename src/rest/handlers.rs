use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use super::{
    error::ApiError,
    models::{ErrorResponse, HealthResponse},
    AppState,
};
use crate::storage::Storage;

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

const RESOURCES: [&str; 3] = ["coordinators", "courses", "students"];

/// Fallback for unmatched paths. A path under a known resource is malformed
/// (400); anything else is an unknown endpoint (404).
pub async fn unmatched(uri: Uri) -> Response {
    let resource = uri.path().trim_start_matches('/').split('/').next();
    if resource.is_some_and(|r| RESOURCES.contains(&r)) {
        return ApiError::BadRequest(format!("malformed path: {}", uri.path())).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
        .into_response()
}

/// Unwraps a JSON body, turning any extractor rejection into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}
