use rusqlite::{params, Row, ToSql};

use super::{
    error::StorageResult,
    sqlite::{db_list, SqliteStorage, Table},
    traits::StudentRepository,
};
use crate::model::{Coordinator, Student};

/// Maps `student_id, name, coordinator_id, coordinator name` in that order.
pub(super) fn map_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        coordinator: Coordinator {
            id: Some(row.get(2)?),
            name: row.get(3)?,
            students: Vec::new(),
        },
        courses: Vec::new(),
    })
}

impl Table for Student {
    const SELECT_BY_ID: &'static str = r#"
        SELECT s.student_id, s.name, c.coordinator_id, c.name
        FROM student s
        JOIN coordinator c ON c.coordinator_id = s.coordinator_id
        WHERE s.student_id = ?1
        "#;
    const SELECT_ALL: &'static str = r#"
        SELECT s.student_id, s.name, c.coordinator_id, c.name
        FROM student s
        JOIN coordinator c ON c.coordinator_id = s.coordinator_id
        ORDER BY s.student_id
        "#;
    const INSERT: &'static str = "INSERT INTO student (name, coordinator_id) VALUES (?1, ?2)";
    const UPDATE: &'static str =
        "UPDATE student SET name = ?1, coordinator_id = ?2 WHERE student_id = ?3";
    const DELETE: &'static str = "DELETE FROM student WHERE student_id = ?1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        map_student_row(row)
    }

    fn insert_params(&self) -> Vec<&dyn ToSql> {
        vec![&self.name, &self.coordinator.id]
    }
}

impl StudentRepository for SqliteStorage {
    fn add_course_to_student(&self, student_id: i64, course_id: i64) -> StorageResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO course_student (course_id, student_id) VALUES (?1, ?2)",
                params![course_id, student_id],
            )
        })?;
        log::debug!("enrolled student {} in course {}", student_id, course_id);
        Ok(())
    }

    fn remove_course_from_student(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> StorageResult<bool> {
        let rows = self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM course_student WHERE course_id = ?1 AND student_id = ?2",
                params![course_id, student_id],
            )
        })?;
        Ok(rows > 0)
    }

    fn find_students_by_course_id(&self, course_id: i64) -> StorageResult<Vec<Student>> {
        let rows = self.with_conn(|conn| {
            db_list(
                conn,
                r#"
                SELECT s.student_id, s.name, c.coordinator_id, c.name
                FROM student s
                JOIN course_student cs ON s.student_id = cs.student_id
                JOIN coordinator c ON c.coordinator_id = s.coordinator_id
                WHERE cs.course_id = ?1
                ORDER BY s.student_id
                "#,
                params![course_id],
                map_student_row,
            )
        })?;
        Ok(rows)
    }
}
