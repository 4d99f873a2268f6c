use rusqlite::{params, Connection, OptionalExtension, Params, Row, ToSql};
use std::path::Path;

use super::{
    error::{StorageError, StorageResult},
    traits::CrudRepository,
};
use crate::model::Entity;

const DB_SCHEMA_VERSION: i64 = 1;

/// SQL and row mapping for one entity table. Implementing this is all an
/// entity needs to get the generic [`CrudRepository`] operations.
pub trait Table: Entity {
    const SELECT_BY_ID: &'static str;
    const SELECT_ALL: &'static str;
    const INSERT: &'static str;
    /// Must bind the same parameters as `INSERT`, followed by the id.
    const UPDATE: &'static str;
    const DELETE: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn insert_params(&self) -> Vec<&dyn ToSql>;
}

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub path: String,
}

pub(super) fn db_list<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

impl<E: Table> CrudRepository<E> for SqliteStorage {
    fn find_by_id(&self, id: i64) -> StorageResult<Option<E>> {
        let row = self.with_conn(|conn| {
            conn.query_row(E::SELECT_BY_ID, params![id], E::from_row)
                .optional()
        })?;
        Ok(row)
    }

    fn find_all(&self) -> StorageResult<Vec<E>> {
        let rows = self.with_conn(|conn| db_list(conn, E::SELECT_ALL, [], E::from_row))?;
        Ok(rows)
    }

    fn save(&self, entity: &E) -> StorageResult<E> {
        let id = self.with_conn(|conn| {
            conn.execute(E::INSERT, entity.insert_params().as_slice())?;
            Ok(conn.last_insert_rowid())
        })?;
        log::debug!("saved {} {}", E::KIND, id);

        let mut saved = entity.clone();
        saved.set_id(id);
        Ok(saved)
    }

    fn update(&self, entity: &E) -> StorageResult<Option<E>> {
        let Some(id) = entity.id() else {
            return Ok(None);
        };
        let rows = self.with_conn(|conn| {
            let mut params = entity.insert_params();
            params.push(&id);
            conn.execute(E::UPDATE, params.as_slice())
        })?;
        Ok((rows > 0).then(|| entity.clone()))
    }

    fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let rows = self.with_conn(|conn| conn.execute(E::DELETE, params![id]))?;
        Ok(rows > 0)
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> anyhow::Result<()> {
        for suffix in ["", "-wal", "-shm"] {
            let path = format!("{}{}", self.path, suffix);
            if Path::new(&path).exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    pub fn init(&self) -> anyhow::Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    /// Loads the demo data set. Does nothing once any coordinator exists.
    pub fn seed(&self) -> StorageResult<bool> {
        let seeded = self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM coordinator", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(false);
            }
            conn.execute_batch(
                r#"
                BEGIN;
                INSERT INTO coordinator (name) VALUES
                    ('Coordinator 1'), ('Coordinator 2'), ('Coordinator 3'), ('Coordinator 4');
                INSERT INTO course (name) VALUES
                    ('Course A'), ('Course B'), ('Course C'), ('Course D');
                INSERT INTO student (name, coordinator_id) VALUES
                    ('Student 1', 1), ('Student 2', 2), ('Student 3', 3),
                    ('Student 4', 1), ('Student 5', 2);
                INSERT INTO course_student (course_id, student_id) VALUES
                    (1, 1), (2, 2), (3, 3), (1, 4), (2, 5);
                COMMIT;
                "#,
            )?;
            Ok(true)
        })?;
        if seeded {
            log::info!("🌱 Seeded demo data into {}", self.path);
        }
        Ok(seeded)
    }

    pub(super) fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        Ok(f(&conn)?)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS coordinator (
                coordinator_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS course (
                course_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS student (
                student_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                coordinator_id INTEGER NOT NULL REFERENCES coordinator(coordinator_id)
            );
            CREATE TABLE IF NOT EXISTS course_student (
                course_id INTEGER NOT NULL REFERENCES course(course_id),
                student_id INTEGER NOT NULL REFERENCES student(student_id),
                PRIMARY KEY (course_id, student_id)
            );
            CREATE INDEX IF NOT EXISTS student_coordinator_idx ON student(coordinator_id);
            CREATE INDEX IF NOT EXISTS course_student_student_idx ON course_student(student_id);
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}
