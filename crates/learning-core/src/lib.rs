//!
//! Learning Core - client-side catalogue store for the Learning Center
//!
//! This crate defines the course and category domain model, the gateway
//! interface towards the remote API, and the reactive store that keeps both
//! collections cached and synchronized. Consumers share one store instance
//! and read its state synchronously; every write goes through the gateway
//! first and only touches the cache once the remote call has succeeded.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - entities, identifiers, the gateway contract and relation resolution
pub mod domain;

/// Application services - the store, its derived views and retry handling
pub mod application;

/// Store configuration
pub mod config;

/// Error types
pub mod error;

// Re-export key types
pub use config::StoreConfig;
pub use error::{format_error, GatewayError, LearningError, LearningResult};

pub use application::retry::RetryPolicy;
pub use application::store::{LearningStore, MutationHandle};
pub use application::views::Memo;

pub use domain::category::{Category, CategoryId};
pub use domain::course::{Course, CourseId};
pub use domain::entity::{Entity, EntityKind, Operation};
pub use domain::gateway::EntityGateway;
pub use domain::relation::{resolve, resolve_all};
