use std::marker::PhantomData;

use thiserror::Error;

use crate::{
    dto::{InvalidDto, TransferObject},
    model::Entity,
    storage::{CrudRepository, StorageError},
};

mod coordinator;
mod course;
mod student;

pub use coordinator::CoordinatorService;
pub use course::CourseService;
pub use student::StudentService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Invalid(#[from] InvalidDto),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Constraint(detail) => ServiceError::Conflict(detail),
            other => ServiceError::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Create/read/update/delete over one entity, speaking transfer objects.
///
/// `create` and `update` return the row as re-read from the store, so the
/// result carries everything a later `find_by_id` would (the student's
/// coordinator name, for instance).
pub struct CrudService<R, E, D> {
    repository: R,
    _types: PhantomData<fn() -> (E, D)>,
}

impl<R: Clone, E, D> Clone for CrudService<R, E, D> {
    fn clone(&self) -> Self {
        Self::new(self.repository.clone())
    }
}

impl<R, E, D> CrudService<R, E, D> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _types: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R, E, D> CrudService<R, E, D>
where
    R: CrudRepository<E>,
    E: Entity,
    D: TransferObject<E>,
{
    pub fn create(&self, dto: D) -> ServiceResult<D> {
        let entity = dto.into_entity()?;
        let saved = self.repository.save(&entity)?;
        let id = saved
            .id()
            .ok_or(ServiceError::Storage(StorageError::MissingRowId(E::KIND)))?;
        log::info!("➕ Created {} {}", E::KIND, id);
        self.find_by_id(id)
    }

    /// Full replace of the entity named by `dto`'s id.
    pub fn update(&self, dto: D) -> ServiceResult<D> {
        let entity = dto.into_entity()?;
        let Some(id) = entity.id() else {
            return Err(InvalidDto {
                kind: E::KIND,
                reason: "id is required for update",
            }
            .into());
        };
        if self.repository.update(&entity)?.is_none() {
            return Err(ServiceError::NotFound { kind: E::KIND, id });
        }
        log::info!("✏️ Updated {} {}", E::KIND, id);
        self.find_by_id(id)
    }

    pub fn delete_by_id(&self, id: i64) -> ServiceResult<bool> {
        self.load(id)?;
        if !self.repository.delete_by_id(id)? {
            // removed by someone else between the lookup and the delete
            return Err(ServiceError::NotFound { kind: E::KIND, id });
        }
        log::info!("🗑️ Deleted {} {}", E::KIND, id);
        Ok(true)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<D>> {
        let all = self.repository.find_all()?;
        Ok(all.into_iter().map(D::from_entity).collect())
    }

    pub fn find_by_id(&self, id: i64) -> ServiceResult<D> {
        self.load(id).map(D::from_entity)
    }

    pub(crate) fn load(&self, id: i64) -> ServiceResult<E> {
        self.repository
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound { kind: E::KIND, id })
    }
}
