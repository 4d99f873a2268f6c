/// A persisted record with a store-assigned identifier.
pub trait Entity: Clone {
    /// Lowercase name used in logs and not-found messages.
    const KIND: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coordinator {
    pub id: Option<i64>,
    pub name: String,
    pub students: Vec<Student>,
}

impl Coordinator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            students: Vec::new(),
        }
    }

    /// A reference carrying only the identifier, as used when a student
    /// points at its coordinator before the name is known.
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

impl Entity for Coordinator {
    const KIND: &'static str = "coordinator";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Course {
    pub id: Option<i64>,
    pub name: String,
    pub students: Vec<Student>,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            students: Vec::new(),
        }
    }
}

impl Entity for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Student {
    pub id: Option<i64>,
    pub name: String,
    pub coordinator: Coordinator,
    pub courses: Vec<Course>,
}

impl Student {
    pub fn new(name: impl Into<String>, coordinator_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            coordinator: Coordinator::reference(coordinator_id),
            courses: Vec::new(),
        }
    }
}

impl Entity for Student {
    const KIND: &'static str = "student";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
