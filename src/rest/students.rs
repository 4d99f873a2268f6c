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

pub async fn list_students<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<StudentDto>>, ApiError> {
    Ok(Json(state.students.find_all()?))
}

pub async fn get_student<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<StudentDto>, ApiError> {
    let id = parse_id(&id, "student")?;
    Ok(Json(state.students.find_by_id(id)?))
}

pub async fn create_student<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<StudentDto>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentDto>), ApiError> {
    let dto = json_body(payload)?;
    let created = state.students.create(dto)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_student<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<StudentDto>, JsonRejection>,
) -> Result<Json<StudentDto>, ApiError> {
    let id = parse_id(&id, "student")?;
    let mut dto = json_body(payload)?;
    dto.set_id(id);
    Ok(Json(state.students.update(dto)?))
}

pub async fn delete_student<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "student")?;
    state.students.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_student_courses<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CourseDto>>, ApiError> {
    let id = parse_id(&id, "student")?;
    Ok(Json(state.courses.courses_for_student(id)?))
}

pub async fn attach_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let student_id = parse_id(&student_id, "student")?;
    let course_id = parse_id(&course_id, "course")?;
    state.students.attach_course(student_id, course_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn detach_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let student_id = parse_id(&student_id, "student")?;
    let course_id = parse_id(&course_id, "course")?;
    state.students.detach_course(student_id, course_id)?;
    Ok(StatusCode::NO_CONTENT)
}
