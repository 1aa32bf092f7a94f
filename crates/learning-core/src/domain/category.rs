//! Category entity

use serde::{Deserialize, Serialize};

use super::entity::{entity_id, Entity, EntityKind};

entity_id!(
    /// Server-assigned category identifier
    CategoryId
);

/// A category courses can be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
}

impl Category {
    /// Create a category that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::UNASSIGNED,
            name: name.into(),
        }
    }

    /// Same category with the given identifier
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = CategoryId(id);
        self
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn set_id(&mut self, id: CategoryId) {
        self.id = id;
    }
}
