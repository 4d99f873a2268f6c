use rusqlite::ffi::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A foreign key, primary key or NOT NULL constraint rejected the statement.
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),
    /// An insert finished without handing back a row id.
    #[error("no id assigned to new {0}")]
    MissingRowId(&'static str),
}

impl StorageError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, StorageError::Constraint(_))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref code, ref msg)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                let detail = msg.clone().unwrap_or_else(|| code.to_string());
                StorageError::Constraint(detail)
            }
            other => StorageError::Sqlite(other),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
