//! Gateway interface towards the remote API
//!
//! The store never talks to the transport directly. Each entity kind gets
//! its own gateway; DTO mapping, HTTP status handling and framing live in
//! the implementations.

use async_trait::async_trait;

use super::entity::Entity;
use crate::error::GatewayError;

/// Async CRUD access to one remote collection
#[async_trait]
pub trait EntityGateway<E: Entity>: Send + Sync {
    /// Fetch the whole collection in server order
    async fn get_all(&self) -> Result<Vec<E>, GatewayError>;

    /// Persist a new entity; the returned copy carries the server-assigned id
    async fn create(&self, entity: &E) -> Result<E, GatewayError>;

    /// Replace an existing entity
    async fn update(&self, entity: &E) -> Result<E, GatewayError>;

    /// Remove an entity, failing with `NotFound` if the id is unknown
    async fn delete(&self, id: E::Id) -> Result<(), GatewayError>;
}
