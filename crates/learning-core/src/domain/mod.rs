/// Entity trait, entity kinds and store operations
pub mod entity;

/// Category domain model
pub mod category;

/// Course domain model
pub mod course;

/// Gateway interface towards the remote API
pub mod gateway;

/// Course to category relation resolution
pub mod relation;
