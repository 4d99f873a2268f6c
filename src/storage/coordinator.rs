use rusqlite::{params, Row, ToSql};

use super::{
    error::StorageResult,
    sqlite::{db_list, SqliteStorage, Table},
    student::map_student_row,
    traits::CoordinatorRepository,
};
use crate::model::{Coordinator, Student};

fn map_coordinator_row(row: &Row<'_>) -> rusqlite::Result<Coordinator> {
    Ok(Coordinator {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        students: Vec::new(),
    })
}

impl Table for Coordinator {
    const SELECT_BY_ID: &'static str =
        "SELECT coordinator_id, name FROM coordinator WHERE coordinator_id = ?1";
    const SELECT_ALL: &'static str =
        "SELECT coordinator_id, name FROM coordinator ORDER BY coordinator_id";
    const INSERT: &'static str = "INSERT INTO coordinator (name) VALUES (?1)";
    const UPDATE: &'static str = "UPDATE coordinator SET name = ?1 WHERE coordinator_id = ?2";
    const DELETE: &'static str = "DELETE FROM coordinator WHERE coordinator_id = ?1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        map_coordinator_row(row)
    }

    fn insert_params(&self) -> Vec<&dyn ToSql> {
        vec![&self.name]
    }
}

impl CoordinatorRepository for SqliteStorage {
    fn find_students_by_coordinator_id(
        &self,
        coordinator_id: i64,
    ) -> StorageResult<Vec<Student>> {
        let rows = self.with_conn(|conn| {
            db_list(
                conn,
                r#"
                SELECT s.student_id, s.name, c.coordinator_id, c.name
                FROM student s
                JOIN coordinator c ON c.coordinator_id = s.coordinator_id
                WHERE s.coordinator_id = ?1
                ORDER BY s.student_id
                "#,
                params![coordinator_id],
                map_student_row,
            )
        })?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::CrudRepository;
    use tempfile::TempDir;

    fn temp_storage() -> (TempDir, SqliteStorage) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new(dir.path().join("coordinators.sqlite"));
        storage.init().unwrap();
        (dir, storage)
    }

    #[test]
    fn save_assigns_id_and_find_by_id_reads_it_back() {
        let (_dir, storage) = temp_storage();
        let saved = storage.save(&Coordinator::new("Coordinator 5")).unwrap();
        let id = saved.id.expect("store assigns an id");

        let loaded: Coordinator = storage.find_by_id(id).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.name, "Coordinator 5");
    }

    #[test]
    fn find_by_id_missing_is_none() {
        let (_dir, storage) = temp_storage();
        let loaded: Option<Coordinator> = storage.find_by_id(999).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn update_replaces_name() {
        let (_dir, storage) = temp_storage();
        let mut saved = storage.save(&Coordinator::new("Before")).unwrap();
        saved.name = "After".to_string();

        let updated = storage.update(&saved).unwrap().expect("row exists");
        assert_eq!(updated.name, "After");

        let loaded: Coordinator = storage.find_by_id(saved.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded.name, "After");
    }

    #[test]
    fn update_missing_row_is_none() {
        let (_dir, storage) = temp_storage();
        let ghost = Coordinator {
            id: Some(77),
            name: "Ghost".to_string(),
            students: Vec::new(),
        };
        assert!(storage.update(&ghost).unwrap().is_none());
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let (_dir, storage) = temp_storage();
        let saved = storage.save(&Coordinator::new("Temp")).unwrap();
        let id = saved.id.unwrap();

        assert!(CrudRepository::<Coordinator>::delete_by_id(&storage, id).unwrap());
        assert!(!CrudRepository::<Coordinator>::delete_by_id(&storage, id).unwrap());
    }

    #[test]
    fn delete_with_students_is_rejected() {
        let (_dir, storage) = temp_storage();
        let coordinator = storage.save(&Coordinator::new("Busy")).unwrap();
        let id = coordinator.id.unwrap();
        storage.save(&Student::new("Pupil", id)).unwrap();

        let err = CrudRepository::<Coordinator>::delete_by_id(&storage, id).unwrap_err();
        assert!(err.is_constraint());
    }

    #[test]
    fn students_by_coordinator_filters_on_foreign_key() {
        let (_dir, storage) = temp_storage();
        storage.seed().unwrap();

        let students = storage.find_students_by_coordinator_id(1).unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Student 1", "Student 4"]);
        assert!(students
            .iter()
            .all(|s| s.coordinator.name == "Coordinator 1"));

        assert!(storage.find_students_by_coordinator_id(4).unwrap().is_empty());
    }
}
