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
    dto::{CourseDto, StudentDto, TransferObject},
    storage::Storage,
};

pub async fn list_courses<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<CourseDto>>, ApiError> {
    Ok(Json(state.courses.find_all()?))
}

pub async fn get_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<CourseDto>, ApiError> {
    let id = parse_id(&id, "course")?;
    Ok(Json(state.courses.find_by_id(id)?))
}

pub async fn create_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CourseDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseDto>), ApiError> {
    let dto = json_body(payload)?;
    let created = state.courses.create(dto)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<CourseDto>, JsonRejection>,
) -> Result<Json<CourseDto>, ApiError> {
    let id = parse_id(&id, "course")?;
    let mut dto = json_body(payload)?;
    dto.set_id(id);
    Ok(Json(state.courses.update(dto)?))
}

pub async fn delete_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "course")?;
    state.courses.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_course_students<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StudentDto>>, ApiError> {
    let id = parse_id(&id, "course")?;
    Ok(Json(state.courses.students_for_course(id)?))
}
