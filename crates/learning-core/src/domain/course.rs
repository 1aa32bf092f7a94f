//! Course entity

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryId};
use super::entity::{entity_id, Entity, EntityKind};

entity_id!(
    /// Server-assigned course identifier
    CourseId
);

/// A course in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Server-assigned identifier
    pub id: CourseId,
    /// Course title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Foreign key into the categories; `0` means no category
    #[serde(default)]
    pub category_id: CategoryId,
    /// Resolved category. Derived on the client and never sent to the server.
    #[serde(skip)]
    pub category: Option<Category>,
}

impl Course {
    /// Create a course that has not been persisted yet
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: CourseId::UNASSIGNED,
            title: title.into(),
            description: description.into(),
            category_id,
            category: None,
        }
    }

    /// Same course with the given identifier
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = CourseId(id);
        self
    }
}

impl Entity for Course {
    type Id = CourseId;
    const KIND: EntityKind = EntityKind::Course;

    fn id(&self) -> CourseId {
        self.id
    }

    fn set_id(&mut self, id: CourseId) {
        self.id = id;
    }

    fn detached(&self) -> Self {
        Self {
            category: None,
            ..self.clone()
        }
    }
}
