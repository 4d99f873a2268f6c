use std::{net::SocketAddr, time::SystemTime};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    service::{CoordinatorService, CourseService, StudentService},
    storage::Storage,
};

mod coordinators;
mod courses;
pub mod error;
mod handlers;
pub mod models;
mod students;

use coordinators::{
    create_coordinator, delete_coordinator, get_coordinator, list_coordinator_students,
    list_coordinators, update_coordinator,
};
use courses::{
    create_course, delete_course, get_course, list_course_students, list_courses, update_course,
};
use handlers::{health, unmatched};
use students::{
    attach_course, create_student, delete_student, detach_course, get_student,
    list_student_courses, list_students, update_student,
};

#[derive(Clone)]
pub struct AppState<S> {
    pub coordinators: CoordinatorService<S>,
    pub courses: CourseService<S>,
    pub students: StudentService<S>,
    pub started_at: SystemTime,
}

impl<S: Clone> AppState<S> {
    pub fn new(storage: S) -> Self {
        Self {
            coordinators: CoordinatorService::new(storage.clone()),
            courses: CourseService::new(storage.clone()),
            students: StudentService::new(storage),
            started_at: SystemTime::now(),
        }
    }
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(storage: S) -> Router {
    let coordinators = get(list_coordinators::<S>).post(create_coordinator::<S>);
    let courses = get(list_courses::<S>).post(create_course::<S>);
    let students = get(list_students::<S>).post(create_student::<S>);

    Router::new()
        .route("/health", get(health::<S>))
        .route("/coordinators", coordinators.clone())
        .route("/coordinators/", coordinators)
        .route(
            "/coordinators/:id",
            get(get_coordinator::<S>)
                .put(update_coordinator::<S>)
                .delete(delete_coordinator::<S>),
        )
        .route(
            "/coordinators/:id/students",
            get(list_coordinator_students::<S>),
        )
        .route("/courses", courses.clone())
        .route("/courses/", courses)
        .route(
            "/courses/:id",
            get(get_course::<S>)
                .put(update_course::<S>)
                .delete(delete_course::<S>),
        )
        .route("/courses/:id/students", get(list_course_students::<S>))
        .route("/students", students.clone())
        .route("/students/", students)
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/students/:id/courses", get(list_student_courses::<S>))
        .route(
            "/students/:id/courses/:course_id",
            post(attach_course::<S>).delete(detach_course::<S>),
        )
        .fallback(unmatched)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(storage))
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
