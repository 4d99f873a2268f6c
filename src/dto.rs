use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Coordinator, Course, Student};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind}: {reason}")]
pub struct InvalidDto {
    pub kind: &'static str,
    pub reason: &'static str,
}

/// Conversion between a JSON transfer object and its entity record.
///
/// Nested relationship lists on incoming objects are ignored; relationships
/// are changed through their own endpoints.
pub trait TransferObject<E>: Sized {
    fn from_entity(entity: E) -> Self;
    fn into_entity(self) -> Result<E, InvalidDto>;
    fn set_id(&mut self, id: i64);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<StudentDto>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<StudentDto>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<CoordinatorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<CourseDto>>,
}

fn required_name(name: Option<String>, kind: &'static str) -> Result<String, InvalidDto> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(InvalidDto {
            kind,
            reason: "name is required",
        }),
    }
}

fn non_empty<T, U>(items: Vec<T>, f: impl Fn(T) -> U) -> Option<Vec<U>> {
    if items.is_empty() {
        None
    } else {
        Some(items.into_iter().map(f).collect())
    }
}

impl TransferObject<Coordinator> for CoordinatorDto {
    fn from_entity(entity: Coordinator) -> Self {
        Self {
            id: entity.id,
            name: Some(entity.name).filter(|n| !n.is_empty()),
            students: non_empty(entity.students, StudentDto::from_entity),
        }
    }

    fn into_entity(self) -> Result<Coordinator, InvalidDto> {
        Ok(Coordinator {
            id: self.id,
            name: required_name(self.name, "coordinator")?,
            students: Vec::new(),
        })
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl TransferObject<Course> for CourseDto {
    fn from_entity(entity: Course) -> Self {
        Self {
            id: entity.id,
            name: Some(entity.name).filter(|n| !n.is_empty()),
            students: non_empty(entity.students, StudentDto::from_entity),
        }
    }

    fn into_entity(self) -> Result<Course, InvalidDto> {
        Ok(Course {
            id: self.id,
            name: required_name(self.name, "course")?,
            students: Vec::new(),
        })
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl TransferObject<Student> for StudentDto {
    fn from_entity(entity: Student) -> Self {
        Self {
            id: entity.id,
            name: Some(entity.name).filter(|n| !n.is_empty()),
            coordinator: Some(CoordinatorDto::from_entity(entity.coordinator)),
            courses: non_empty(entity.courses, CourseDto::from_entity),
        }
    }

    fn into_entity(self) -> Result<Student, InvalidDto> {
        let name = required_name(self.name, "student")?;
        let coordinator_id = self
            .coordinator
            .and_then(|c| c.id)
            .ok_or(InvalidDto {
                kind: "student",
                reason: "coordinator id is required",
            })?;
        Ok(Student {
            id: self.id,
            name,
            coordinator: Coordinator::reference(coordinator_id),
            courses: Vec::new(),
        })
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
