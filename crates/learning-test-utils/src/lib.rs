//! Testing utilities for the Learning Center catalogue store.
//!
//! This crate provides mockall mocks of the entity gateways, a scriptable
//! fake gateway for failure and latency injection, entity builders, and a
//! tracing setup helper.

pub mod builders;
pub mod fakes;
pub mod mocks;
pub mod util;

/// Re-export commonly used types for convenience
pub use mockall;

pub use builders::{CategoryBuilder, CourseBuilder};
pub use fakes::{GatewayCall, ScriptedGateway};
pub use mocks::{MockCategoryGateway, MockCourseGateway};
pub use util::init_test_tracing;
