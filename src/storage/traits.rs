use super::error::StorageResult;
use crate::model::{Coordinator, Course, Student};

/// Basic persistence operations shared by every entity.
pub trait CrudRepository<E> {
    fn find_by_id(&self, id: i64) -> StorageResult<Option<E>>;
    fn find_all(&self) -> StorageResult<Vec<E>>;
    /// Inserts the entity and returns it with the store-assigned id.
    fn save(&self, entity: &E) -> StorageResult<E>;
    /// Replaces the row matching the entity id. `None` when no such row exists.
    fn update(&self, entity: &E) -> StorageResult<Option<E>>;
    fn delete_by_id(&self, id: i64) -> StorageResult<bool>;
}

pub trait StudentRepository: CrudRepository<Student> {
    fn add_course_to_student(&self, student_id: i64, course_id: i64) -> StorageResult<()>;
    fn remove_course_from_student(&self, student_id: i64, course_id: i64)
        -> StorageResult<bool>;
    fn find_students_by_course_id(&self, course_id: i64) -> StorageResult<Vec<Student>>;
}

pub trait CourseRepository: CrudRepository<Course> {
    fn find_courses_by_student_id(&self, student_id: i64) -> StorageResult<Vec<Course>>;
}

pub trait CoordinatorRepository: CrudRepository<Coordinator> {
    fn find_students_by_coordinator_id(
        &self,
        coordinator_id: i64,
    ) -> StorageResult<Vec<Student>>;
}

/// Everything the HTTP layer needs from a backing store.
pub trait Storage: CoordinatorRepository + CourseRepository + StudentRepository {}

impl<T> Storage for T where T: CoordinatorRepository + CourseRepository + StudentRepository {}
