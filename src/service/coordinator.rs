use super::{CrudService, ServiceResult};
use crate::{
    dto::{CoordinatorDto, StudentDto, TransferObject},
    model::Coordinator,
    storage::CoordinatorRepository,
};

pub type CoordinatorService<R> = CrudService<R, Coordinator, CoordinatorDto>;

impl<R: CoordinatorRepository> CrudService<R, Coordinator, CoordinatorDto> {
    pub fn students_for_coordinator(&self, coordinator_id: i64) -> ServiceResult<Vec<StudentDto>> {
        self.load(coordinator_id)?;
        let students = self
            .repository()
            .find_students_by_coordinator_id(coordinator_id)?;
        Ok(students.into_iter().map(StudentDto::from_entity).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;
    use crate::storage::SqliteStorage;
    use tempfile::TempDir;

    fn service() -> (TempDir, CoordinatorService<SqliteStorage>) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new(dir.path().join("coordinator_service.sqlite"));
        storage.init().unwrap();
        storage.seed().unwrap();
        (dir, CoordinatorService::new(storage))
    }

    fn named(name: &str) -> CoordinatorDto {
        CoordinatorDto {
            name: Some(name.to_string()),
            ..CoordinatorDto::default()
        }
    }

    #[test]
    fn create_assigns_id_and_starts_without_students() {
        let (_dir, service) = service();
        let created = service.create(named("Coordinator 5")).unwrap();
        let id = created.id.expect("new id");
        assert_eq!(id, 5);
        assert_eq!(created.name.as_deref(), Some("Coordinator 5"));

        assert_eq!(service.find_by_id(id).unwrap(), created);
        assert!(service.students_for_coordinator(id).unwrap().is_empty());
    }

    #[test]
    fn update_persists_new_name() {
        let (_dir, service) = service();
        let mut dto = named("Renamed");
        dto.id = Some(2);

        let updated = service.update(dto).unwrap();
        assert_eq!(updated.name.as_deref(), Some("Renamed"));
        assert_eq!(
            service.find_by_id(2).unwrap().name.as_deref(),
            Some("Renamed")
        );
    }

    #[test]
    fn update_missing_is_not_found() {
        let (_dir, service) = service();
        let mut dto = named("Nobody");
        dto.id = Some(404);
        assert!(matches!(
            service.update(dto),
            Err(ServiceError::NotFound { id: 404, .. })
        ));
    }

    #[test]
    fn update_without_id_is_invalid() {
        let (_dir, service) = service();
        assert!(matches!(
            service.update(named("Anonymous")),
            Err(ServiceError::Invalid(_))
        ));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let (_dir, service) = service();
        let err = service.delete_by_id(99).unwrap_err();
        assert_eq!(err.to_string(), "coordinator 99 not found");
    }

    #[test]
    fn delete_unreferenced_coordinator() {
        let (_dir, service) = service();
        assert!(service.delete_by_id(4).unwrap());
        assert!(matches!(
            service.find_by_id(4),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_referenced_coordinator_conflicts() {
        let (_dir, service) = service();
        assert!(matches!(
            service.delete_by_id(1),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn students_for_missing_coordinator_is_not_found() {
        let (_dir, service) = service();
        assert!(matches!(
            service.students_for_coordinator(42),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn find_all_returns_seeded_coordinators() {
        let (_dir, service) = service();
        let all = service.find_all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name.as_deref(), Some("Coordinator 1"));
    }
}
