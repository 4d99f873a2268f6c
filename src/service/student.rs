use super::{CrudService, ServiceError, ServiceResult};
use crate::{
    dto::StudentDto,
    model::{Course, Entity, Student},
    storage::{CrudRepository, StudentRepository},
};

pub type StudentService<R> = CrudService<R, Student, StudentDto>;

impl<R> CrudService<R, Student, StudentDto>
where
    R: StudentRepository + CrudRepository<Course>,
{
    /// Enrolls the student. An existing enrollment is a conflict, never a
    /// second row.
    pub fn attach_course(&self, student_id: i64, course_id: i64) -> ServiceResult<()> {
        self.load(student_id)?;
        self.require_course(course_id)?;
        self.repository()
            .add_course_to_student(student_id, course_id)
            .map_err(|err| match ServiceError::from(err) {
                ServiceError::Conflict(_) => ServiceError::Conflict(format!(
                    "student {student_id} is already enrolled in course {course_id}"
                )),
                other => other,
            })?;
        log::info!("🔗 Student {} enrolled in course {}", student_id, course_id);
        Ok(())
    }

    pub fn detach_course(&self, student_id: i64, course_id: i64) -> ServiceResult<()> {
        if !self
            .repository()
            .remove_course_from_student(student_id, course_id)?
        {
            return Err(ServiceError::NotFound {
                kind: "enrollment",
                id: course_id,
            });
        }
        log::info!("✂️ Student {} left course {}", student_id, course_id);
        Ok(())
    }

    fn require_course(&self, course_id: i64) -> ServiceResult<()> {
        match CrudRepository::<Course>::find_by_id(self.repository(), course_id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound {
                kind: Course::KIND,
                id: course_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CoordinatorDto;
    use crate::service::CourseService;
    use crate::storage::SqliteStorage;
    use tempfile::TempDir;

    fn services() -> (
        TempDir,
        StudentService<SqliteStorage>,
        CourseService<SqliteStorage>,
    ) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new(dir.path().join("student_service.sqlite"));
        storage.init().unwrap();
        storage.seed().unwrap();
        (
            dir,
            StudentService::new(storage.clone()),
            CourseService::new(storage),
        )
    }

    fn student(name: &str, coordinator_id: i64) -> StudentDto {
        StudentDto {
            name: Some(name.to_string()),
            coordinator: Some(CoordinatorDto {
                id: Some(coordinator_id),
                ..CoordinatorDto::default()
            }),
            ..StudentDto::default()
        }
    }

    #[test]
    fn create_returns_joined_coordinator() {
        let (_dir, students, _) = services();
        let created = students.create(student("Student 6", 3)).unwrap();
        let coordinator = created.coordinator.clone().unwrap();
        assert_eq!(coordinator.id, Some(3));
        assert_eq!(coordinator.name.as_deref(), Some("Coordinator 3"));

        assert_eq!(students.find_by_id(created.id.unwrap()).unwrap(), created);
    }

    #[test]
    fn create_with_unknown_coordinator_conflicts() {
        let (_dir, students, _) = services();
        assert!(matches!(
            students.create(student("Student 7", 99)),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn update_moves_student() {
        let (_dir, students, _) = services();
        let mut dto = student("Student 2 renamed", 4);
        dto.id = Some(2);
        let updated = students.update(dto).unwrap();
        assert_eq!(updated.name.as_deref(), Some("Student 2 renamed"));
        assert_eq!(updated.coordinator.unwrap().id, Some(4));
    }

    #[test]
    fn attach_is_visible_once_and_detach_removes_it() {
        let (_dir, students, courses) = services();
        students.attach_course(3, 4).unwrap();

        let listed = courses.courses_for_student(3).unwrap();
        let hits = listed.iter().filter(|c| c.id == Some(4)).count();
        assert_eq!(hits, 1);
        let enrolled = courses.students_for_course(4).unwrap();
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].id, Some(3));

        students.detach_course(3, 4).unwrap();
        let listed = courses.courses_for_student(3).unwrap();
        assert!(listed.iter().all(|c| c.id != Some(4)));
    }

    #[test]
    fn duplicate_attach_is_rejected() {
        let (_dir, students, courses) = services();
        let err = students.attach_course(4, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "conflict: student 4 is already enrolled in course 1"
        );
        assert_eq!(courses.courses_for_student(4).unwrap().len(), 1);
    }

    #[test]
    fn attach_to_missing_course_is_not_found() {
        let (_dir, students, _) = services();
        assert!(matches!(
            students.attach_course(1, 77),
            Err(ServiceError::NotFound { kind: "course", .. })
        ));
        assert!(matches!(
            students.attach_course(77, 1),
            Err(ServiceError::NotFound { kind: "student", .. })
        ));
    }

    #[test]
    fn detach_missing_enrollment_is_not_found() {
        let (_dir, students, _) = services();
        assert!(matches!(
            students.detach_course(1, 2),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_missing_student_is_not_found() {
        let (_dir, students, _) = services();
        let err = students.delete_by_id(500).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
