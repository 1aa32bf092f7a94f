//! Shared entity abstractions
//!
//! Courses and categories are both remotely-persisted entities with a
//! numeric, server-assigned identifier. The gateway and the in-memory
//! implementations are written once against [`Entity`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A domain object with a stable server-assigned identifier
pub trait Entity: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Identifier type; the raw value `0` means "not assigned yet"
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + From<u64> + Into<u64> + 'static;

    /// Which collection this entity belongs to
    const KIND: EntityKind;

    /// The entity identifier
    fn id(&self) -> Self::Id;

    /// Replace the identifier, used by the server side when creating
    fn set_id(&mut self, id: Self::Id);

    /// A copy stripped of transient, derived fields
    fn detached(&self) -> Self {
        self.clone()
    }
}

/// Kind of entity held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A course
    Course,
    /// A category
    Category,
}

impl EntityKind {
    /// Singular lowercase name
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Course => "course",
            EntityKind::Category => "category",
        }
    }

    /// Plural lowercase name
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Course => "courses",
            EntityKind::Category => "categories",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Store operation, used for log context and fallback error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Initial bulk load
    Load,
    /// Create through the gateway
    Create,
    /// Update through the gateway
    Update,
    /// Delete through the gateway
    Delete,
}

impl Operation {
    /// Message used when a failure of this operation carries nothing better
    pub fn fallback(&self, kind: EntityKind) -> String {
        match self {
            Operation::Load => format!("Failed to load {}", kind.plural()),
            Operation::Create => format!("Failed to create {}", kind.singular()),
            Operation::Update => format!("Failed to update {}", kind.singular()),
            Operation::Delete => format!("Failed to delete {}", kind.singular()),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Declares a numeric entity identifier newtype
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The "no entity" sentinel
            pub const UNASSIGNED: $name = $name(0);

            /// True for the `0` sentinel, which never matches a stored entity
            pub fn is_unassigned(&self) -> bool {
                self.0 == 0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use entity_id;
