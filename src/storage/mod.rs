mod coordinator;
mod course;
pub mod error;
pub mod sqlite;
mod student;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStorage;
pub use traits::{
    CoordinatorRepository, CourseRepository, CrudRepository, Storage, StudentRepository,
};
