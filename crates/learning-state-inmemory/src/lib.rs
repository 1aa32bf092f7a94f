//! In-memory entity gateways for the Learning Center
//!
//! This crate provides in-memory implementations of the gateway interface
//! defined in learning-core. They behave like the remote API (server-side
//! id assignment, not-found failures on unknown ids) without any transport,
//! which makes them useful for development, tests and the demo binary.

use std::sync::Arc;
use tracing::debug;

use learning_core::{Category, Course, EntityGateway};

pub mod gateways;
pub use gateways::InMemoryEntityGateway;

pub mod seed;
pub use seed::{sample_catalogue, Catalogue};

#[cfg(test)]
mod tests;

/// Provider for a matching pair of in-memory gateways
pub struct InMemoryGatewayProvider {
    courses: Arc<InMemoryEntityGateway<Course>>,
    categories: Arc<InMemoryEntityGateway<Category>>,
}

impl InMemoryGatewayProvider {
    /// Create a provider with empty collections
    pub fn new() -> Self {
        Self {
            courses: Arc::new(InMemoryEntityGateway::new()),
            categories: Arc::new(InMemoryEntityGateway::new()),
        }
    }

    /// Create a provider pre-populated with a catalogue.
    ///
    /// Entities keep the ids they carry; new ids continue after the highest.
    pub fn with_catalogue(catalogue: Catalogue) -> Self {
        debug!(
            "Seeding in-memory gateways with {} courses and {} categories",
            catalogue.courses.len(),
            catalogue.categories.len()
        );
        Self {
            courses: Arc::new(InMemoryEntityGateway::with_entities(catalogue.courses)),
            categories: Arc::new(InMemoryEntityGateway::with_entities(catalogue.categories)),
        }
    }

    /// Gateways in the shape the store expects
    pub fn create_gateways(
        &self,
    ) -> (
        Arc<dyn EntityGateway<Course>>,
        Arc<dyn EntityGateway<Category>>,
    ) {
        (self.courses.clone(), self.categories.clone())
    }

    /// Direct access to the course gateway for inspection in tests
    pub fn courses(&self) -> Arc<InMemoryEntityGateway<Course>> {
        self.courses.clone()
    }

    /// Direct access to the category gateway for inspection in tests
    pub fn categories(&self) -> Arc<InMemoryEntityGateway<Category>> {
        self.categories.clone()
    }
}

impl Default for InMemoryGatewayProvider {
    fn default() -> Self {
        Self::new()
    }
}
