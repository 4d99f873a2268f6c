use super::{CrudService, ServiceError, ServiceResult};
use crate::{
    dto::{CourseDto, StudentDto, TransferObject},
    model::{Course, Entity, Student},
    storage::{CourseRepository, CrudRepository, StudentRepository},
};

pub type CourseService<R> = CrudService<R, Course, CourseDto>;

impl<R> CrudService<R, Course, CourseDto>
where
    R: CourseRepository + StudentRepository,
{
    pub fn courses_for_student(&self, student_id: i64) -> ServiceResult<Vec<CourseDto>> {
        if CrudRepository::<Student>::find_by_id(self.repository(), student_id)?.is_none() {
            return Err(ServiceError::NotFound {
                kind: Student::KIND,
                id: student_id,
            });
        }
        let courses = self.repository().find_courses_by_student_id(student_id)?;
        Ok(courses.into_iter().map(CourseDto::from_entity).collect())
    }

    pub fn students_for_course(&self, course_id: i64) -> ServiceResult<Vec<StudentDto>> {
        self.load(course_id)?;
        let students = self.repository().find_students_by_course_id(course_id)?;
        Ok(students.into_iter().map(StudentDto::from_entity).collect())
    }
}
