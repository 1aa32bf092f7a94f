//! Scriptable fake gateway.
//!
//! [`ScriptedGateway`] wraps any gateway (by default the in-memory one) and
//! lets a test inject failures and per-call latency while still exercising
//! real storage behaviour underneath.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use learning_core::{Entity, EntityGateway, GatewayError};
use learning_state_inmemory::InMemoryEntityGateway;

/// Gateway method a script entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    /// `get_all`
    GetAll,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

#[derive(Debug, Clone)]
struct FailureScript {
    /// `None` means fail forever
    remaining: Option<u32>,
    error: GatewayError,
}

/// Gateway fake with injectable failures and latency
pub struct ScriptedGateway<E: Entity> {
    inner: Arc<dyn EntityGateway<E>>,
    failures: Mutex<HashMap<GatewayCall, FailureScript>>,
    delays: Mutex<HashMap<GatewayCall, VecDeque<Duration>>>,
    calls: Mutex<HashMap<GatewayCall, usize>>,
}

impl<E: Entity> ScriptedGateway<E> {
    /// Wrap an existing gateway
    pub fn wrap(inner: Arc<dyn EntityGateway<E>>) -> Self {
        Self {
            inner,
            failures: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Wrap a fresh in-memory gateway seeded with `entities`
    pub fn in_memory(entities: Vec<E>) -> Self {
        Self::wrap(Arc::new(InMemoryEntityGateway::with_entities(entities)))
    }

    /// Fail the next `times` invocations of `call` with `error`
    pub fn fail_times(&self, call: GatewayCall, times: u32, error: GatewayError) -> &Self {
        self.failures.lock().insert(
            call,
            FailureScript {
                remaining: Some(times),
                error,
            },
        );
        self
    }

    /// Fail every invocation of `call` with `error`
    pub fn fail_always(&self, call: GatewayCall, error: GatewayError) -> &Self {
        self.failures.lock().insert(
            call,
            FailureScript {
                remaining: None,
                error,
            },
        );
        self
    }

    /// Delay the next invocation of `call` by `delay`; queued per call
    pub fn delay_next(&self, call: GatewayCall, delay: Duration) -> &Self {
        self.delays.lock().entry(call).or_default().push_back(delay);
        self
    }

    /// How often `call` has been invoked, failures included
    pub fn call_count(&self, call: GatewayCall) -> usize {
        self.calls.lock().get(&call).copied().unwrap_or(0)
    }

    /// Count the call, apply latency, and return the scripted failure if any
    async fn intercept(&self, call: GatewayCall) -> Result<(), GatewayError> {
        *self.calls.lock().entry(call).or_insert(0) += 1;

        let delay = self.delays.lock().get_mut(&call).and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut failures = self.failures.lock();
        let Some(script) = failures.get_mut(&call) else {
            return Ok(());
        };
        let error = script.error.clone();
        match script.remaining {
            None => {}
            Some(0) => {
                failures.remove(&call);
                return Ok(());
            }
            Some(n) => {
                script.remaining = Some(n - 1);
                if n == 1 {
                    failures.remove(&call);
                }
            }
        }
        debug!("Scripted {:?} failure for {}: {}", call, E::KIND, error);
        Err(error)
    }
}

#[async_trait]
impl<E: Entity> EntityGateway<E> for ScriptedGateway<E> {
    async fn get_all(&self) -> Result<Vec<E>, GatewayError> {
        self.intercept(GatewayCall::GetAll).await?;
        self.inner.get_all().await
    }

    async fn create(&self, entity: &E) -> Result<E, GatewayError> {
        self.intercept(GatewayCall::Create).await?;
        self.inner.create(entity).await
    }

    async fn update(&self, entity: &E) -> Result<E, GatewayError> {
        self.intercept(GatewayCall::Update).await?;
        self.inner.update(entity).await
    }

    async fn delete(&self, id: E::Id) -> Result<(), GatewayError> {
        self.intercept(GatewayCall::Delete).await?;
        self.inner.delete(id).await
    }
}
