use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use learning_core::{Entity, EntityGateway, GatewayError};

/// In-memory implementation of the EntityGateway, standing in for the server
pub struct InMemoryEntityGateway<E: Entity> {
    entities: Arc<RwLock<Vec<E>>>,
    next_id: AtomicU64,
}

impl<E: Entity> InMemoryEntityGateway<E> {
    /// Create an empty gateway
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a gateway holding `entities` as already persisted
    pub fn with_entities(entities: Vec<E>) -> Self {
        let highest = entities
            .iter()
            .map(|e| Into::<u64>::into(e.id()))
            .max()
            .unwrap_or(0);
        let entities = entities.iter().map(Entity::detached).collect();
        Self {
            entities: Arc::new(RwLock::new(entities)),
            next_id: AtomicU64::new(highest + 1),
        }
    }

    /// Current server-side contents
    pub async fn snapshot(&self) -> Vec<E> {
        self.entities.read().await.clone()
    }

    /// Number of stored entities
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

impl<E: Entity> Default for InMemoryEntityGateway<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityGateway<E> for InMemoryEntityGateway<E> {
    async fn get_all(&self) -> Result<Vec<E>, GatewayError> {
        let entities = self.entities.read().await;
        Ok(entities.clone())
    }

    async fn create(&self, entity: &E) -> Result<E, GatewayError> {
        let mut created = entity.detached();
        created.set_id(E::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst)));

        let mut entities = self.entities.write().await;
        entities.push(created.clone());
        debug!("Created {} {}", E::KIND, created.id());
        Ok(created)
    }

    async fn update(&self, entity: &E) -> Result<E, GatewayError> {
        let mut entities = self.entities.write().await;
        match entities.iter_mut().find(|stored| stored.id() == entity.id()) {
            Some(stored) => {
                *stored = entity.detached();
                Ok(stored.clone())
            }
            None => {
                warn!("Update of unknown {} {}", E::KIND, entity.id());
                Err(GatewayError::not_found(E::KIND, entity.id()))
            }
        }
    }

    async fn delete(&self, id: E::Id) -> Result<(), GatewayError> {
        let mut entities = self.entities.write().await;
        match entities.iter().position(|stored| stored.id() == id) {
            Some(index) => {
                entities.remove(index);
                Ok(())
            }
            None => {
                warn!("Delete of unknown {} {}", E::KIND, id);
                Err(GatewayError::not_found(E::KIND, id))
            }
        }
    }
}
