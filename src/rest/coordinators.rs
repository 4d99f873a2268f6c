use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{
    error::{parse_id, ApiError},
    handlers::json_body,
    AppState,
};
use crate::{
    dto::{CoordinatorDto, StudentDto, TransferObject},
    storage::Storage,
};

pub async fn list_coordinators<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<CoordinatorDto>>, ApiError> {
    Ok(Json(state.coordinators.find_all()?))
}

pub async fn get_coordinator<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<CoordinatorDto>, ApiError> {
    let id = parse_id(&id, "coordinator")?;
    Ok(Json(state.coordinators.find_by_id(id)?))
}

pub async fn create_coordinator<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CoordinatorDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CoordinatorDto>), ApiError> {
    let dto = json_body(payload)?;
    let created = state.coordinators.create(dto)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_coordinator<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<CoordinatorDto>, JsonRejection>,
) -> Result<Json<CoordinatorDto>, ApiError> {
    let id = parse_id(&id, "coordinator")?;
    let mut dto = json_body(payload)?;
    dto.set_id(id);
    Ok(Json(state.coordinators.update(dto)?))
}

pub async fn delete_coordinator<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "coordinator")?;
    state.coordinators.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_coordinator_students<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StudentDto>>, ApiError> {
    let id = parse_id(&id, "coordinator")?;
    Ok(Json(state.coordinators.students_for_coordinator(id)?))
}
