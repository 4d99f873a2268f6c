use rusqlite::{params, Row, ToSql};

use super::{
    error::StorageResult,
    sqlite::{db_list, SqliteStorage, Table},
    traits::CourseRepository,
};
use crate::model::Course;

fn map_course_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        students: Vec::new(),
    })
}

impl Table for Course {
    const SELECT_BY_ID: &'static str = "SELECT course_id, name FROM course WHERE course_id = ?1";
    const SELECT_ALL: &'static str = "SELECT course_id, name FROM course ORDER BY course_id";
    const INSERT: &'static str = "INSERT INTO course (name) VALUES (?1)";
    const UPDATE: &'static str = "UPDATE course SET name = ?1 WHERE course_id = ?2";
    const DELETE: &'static str = "DELETE FROM course WHERE course_id = ?1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        map_course_row(row)
    }

    fn insert_params(&self) -> Vec<&dyn ToSql> {
        vec![&self.name]
    }
}

impl CourseRepository for SqliteStorage {
    fn find_courses_by_student_id(&self, student_id: i64) -> StorageResult<Vec<Course>> {
        let rows = self.with_conn(|conn| {
            db_list(
                conn,
                r#"
                SELECT c.course_id, c.name
                FROM course c
                JOIN course_student cs ON c.course_id = cs.course_id
                WHERE cs.student_id = ?1
                ORDER BY c.course_id
                "#,
                params![student_id],
                map_course_row,
            )
        })?;
        Ok(rows)
    }
}
