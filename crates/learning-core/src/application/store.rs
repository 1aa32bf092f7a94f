//! The catalogue store
//!
//! [`LearningStore`] owns the cached course and category collections plus
//! one shared `loading` flag and one shared error slot. Construction kicks
//! off two independent load pipelines. Every mutation runs as its own tokio
//! task: the gateway is called under the retry policy and the cache is only
//! touched once the call has succeeded. Callers may ignore the returned
//! [`MutationHandle`] and watch the shared state instead, or await it.
//!
//! Overlapping mutations are not serialized. When two updates for the same
//! id are in flight, whichever response arrives last is what stays cached.
//!
//! Every pipeline is bound to the store's lifetime: once the store is
//! disposed (or dropped) the initial loads are aborted, new mutations are
//! refused before reaching the gateway, and results that still arrive from
//! in-flight mutations are discarded.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, warn};

use super::retry::RetryPolicy;
use super::state::{SharedState, StoreState};
use super::views::{Memo, Source};
use crate::config::StoreConfig;
use crate::domain::category::{Category, CategoryId};
use crate::domain::course::{Course, CourseId};
use crate::domain::entity::{Entity, EntityKind, Operation};
use crate::domain::gateway::EntityGateway;
use crate::domain::relation::{find_category, resolve, resolve_all};
use crate::error::{format_error, GatewayError, LearningError, LearningResult};

/// Client-side cache of the course and category collections
pub struct LearningStore {
    inner: Arc<StoreInner>,
    load_aborts: Vec<AbortHandle>,
}

struct StoreInner {
    state: SharedState,
    courses_api: Arc<dyn EntityGateway<Course>>,
    categories_api: Arc<dyn EntityGateway<Category>>,
    retry: RetryPolicy,
    refresh_relations: bool,
    disposed: AtomicBool,
    changes: watch::Sender<u64>,
}

impl StoreInner {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Apply `change` and notify subscribers, unless the store is disposed.
    fn commit<R>(&self, change: impl FnOnce(&mut StoreState) -> R) -> Option<R> {
        let mut state = self.state.write();
        if self.is_disposed() {
            return None;
        }
        let result = change(&mut state);
        state.revision += 1;
        let revision = state.revision;
        drop(state);

        self.changes.send_replace(revision);
        Some(result)
    }

    fn begin(&self) {
        self.commit(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn fail(&self, error: &GatewayError, fallback: &str, settle: impl FnOnce(&mut StoreState)) {
        let message = format_error(error, fallback);
        error!("{}", message);
        let recorded = self.commit(|state| {
            state.error = Some(message);
            settle(state);
        });
        if recorded.is_none() {
            debug!("Store disposed; failure not recorded");
        }
    }
}

/// Clears `loading` if a pipeline is dropped before it settles
struct SettleGuard {
    inner: Arc<StoreInner>,
    load: bool,
    armed: bool,
}

impl SettleGuard {
    fn mutation(inner: Arc<StoreInner>) -> Self {
        Self {
            inner,
            load: false,
            armed: true,
        }
    }

    fn load(inner: Arc<StoreInner>) -> Self {
        Self {
            inner,
            load: true,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if self.load {
            self.inner.commit(StoreState::finish_load);
        } else {
            self.inner.commit(|state| state.loading = false);
        }
    }
}

/// Handle on one in-flight mutation.
///
/// Dropping it detaches the task; the store still applies the outcome.
/// A mutation refused by a disposed store carries no task at all.
#[derive(Debug)]
pub struct MutationHandle {
    operation: Operation,
    kind: EntityKind,
    task: Option<JoinHandle<()>>,
}

impl MutationHandle {
    /// Operation this handle tracks
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Entity kind this handle tracks
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Whether the task has finished
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel the mutation. Nothing is applied if the gateway call has not
    /// settled yet.
    pub fn abort(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Wait until the outcome has been written to the store.
    ///
    /// A gateway failure is not an error here; it lands in the store's
    /// error slot like it does for callers that never await. Mutations
    /// aborted or refused by a disposed store yield [`LearningError::Cancelled`].
    pub async fn settled(self) -> LearningResult<()> {
        let Some(task) = self.task else {
            return Err(LearningError::Cancelled);
        };
        task.await.map_err(|e| {
            if e.is_cancelled() {
                LearningError::Cancelled
            } else {
                LearningError::TaskFailed(e.to_string())
            }
        })
    }
}

impl LearningStore {
    /// Create the store and start loading both collections.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        courses_api: Arc<dyn EntityGateway<Course>>,
        categories_api: Arc<dyn EntityGateway<Category>>,
        config: &StoreConfig,
    ) -> Self {
        let (changes, _) = watch::channel(0);
        let inner = Arc::new(StoreInner {
            state: StoreState::shared(),
            courses_api,
            categories_api,
            retry: config.retry_policy(),
            refresh_relations: config.refresh_relations_on_category_change,
            disposed: AtomicBool::new(false),
            changes,
        });

        info!(
            "Creating learning store ({} attempts per mutation)",
            inner.retry.attempts()
        );

        inner.state.write().loads_pending = 2;
        let categories = Self::spawn_load_categories(inner.clone());
        let courses = Self::spawn_load_courses(inner.clone());

        Self {
            inner,
            load_aborts: vec![categories.abort_handle(), courses.abort_handle()],
        }
    }

    fn spawn_load_courses(inner: Arc<StoreInner>) -> JoinHandle<()> {
        inner.begin();
        let guard = SettleGuard::load(inner.clone());
        tokio::spawn(async move {
            match inner.courses_api.get_all().await {
                Ok(mut courses) => {
                    debug!("Loaded {} courses", courses.len());
                    inner.commit(|state| {
                        resolve_all(&mut courses, &state.categories);
                        state.replace_courses(courses);
                        state.finish_load();
                    });
                }
                Err(e) => inner.fail(
                    &e,
                    &Operation::Load.fallback(EntityKind::Course),
                    StoreState::finish_load,
                ),
            }
            guard.disarm();
        })
    }

    fn spawn_load_categories(inner: Arc<StoreInner>) -> JoinHandle<()> {
        inner.begin();
        let guard = SettleGuard::load(inner.clone());
        tokio::spawn(async move {
            match inner.categories_api.get_all().await {
                Ok(categories) => {
                    debug!("Loaded {} categories", categories.len());
                    inner.commit(|state| {
                        state.replace_categories(categories);
                        // courses that arrived first were resolved against nothing
                        if !state.courses.is_empty() {
                            let categories = state.categories.clone();
                            resolve_all(state.courses_mut(), &categories);
                        }
                        state.finish_load();
                    });
                }
                Err(e) => inner.fail(
                    &e,
                    &Operation::Load.fallback(EntityKind::Category),
                    StoreState::finish_load,
                ),
            }
            guard.disarm();
        })
    }

    /// Wait for both initial loads to settle, or for the store to be
    /// disposed. Any number of callers may wait at once.
    pub async fn ready(&self) {
        let mut changes = self.subscribe();
        loop {
            let pending = self.inner.state.read().loads_pending;
            if pending == 0 {
                return;
            }
            debug!("Waiting for {} initial load(s)", pending);
            if changes.changed().await.is_err() {
                return;
            }
        }
    }

    /// Sever every pipeline from the store. Idempotent.
    pub fn dispose(&self) {
        let revision = {
            let mut state = self.inner.state.write();
            if self.inner.disposed.swap(true, Ordering::AcqRel) {
                return;
            }
            state.loading = false;
            state.loads_pending = 0;
            state.revision += 1;
            state.revision
        };
        self.inner.changes.send_replace(revision);
        for load in &self.load_aborts {
            load.abort();
        }
        info!("Learning store disposed");
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Snapshot of the cached courses
    pub fn courses(&self) -> Arc<Vec<Course>> {
        self.inner.state.read().courses.clone()
    }

    /// Snapshot of the cached categories
    pub fn categories(&self) -> Arc<Vec<Category>> {
        self.inner.state.read().categories.clone()
    }

    /// Whether an operation is in progress
    pub fn loading(&self) -> bool {
        self.inner.state.read().loading
    }

    /// Message of the most recent failure, cleared when an operation starts
    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    /// Receiver that observes the state revision after every settled change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    /// Number of cached courses
    pub fn course_count(&self) -> Memo<usize> {
        Memo::new(self.inner.state.clone(), Source::Courses, |state| state.courses.len())
    }

    /// Number of cached categories
    pub fn category_count(&self) -> Memo<usize> {
        Memo::new(self.inner.state.clone(), Source::Categories, |state| {
            state.categories.len()
        })
    }

    /// View of the course with `id`. An id of `0` never matches.
    pub fn get_course_by_id(&self, id: CourseId) -> Memo<Option<Course>> {
        Memo::new(self.inner.state.clone(), Source::Courses, move |state| {
            if id.is_unassigned() {
                return None;
            }
            state.courses.iter().find(|course| course.id == id).cloned()
        })
    }

    /// View of the category with `id`. An id of `0` never matches.
    pub fn get_category_by_id(&self, id: CategoryId) -> Memo<Option<Category>> {
        Memo::new(self.inner.state.clone(), Source::Categories, move |state| {
            find_category(&state.categories, id).cloned()
        })
    }

    /// Create a course and append it, with its category resolved against
    /// the categories cached when the response arrives.
    pub fn add_course(&self, course: Course) -> MutationHandle {
        let api = self.inner.courses_api.clone();
        let course = course.detached();
        self.spawn_mutation(
            EntityKind::Course,
            Operation::Create,
            move || {
                let api = api.clone();
                let course = course.clone();
                async move { api.create(&course).await }
            },
            |state, created: Course| {
                let created = resolve(created, &state.categories);
                state.courses_mut().push(created);
            },
        )
    }

    /// Update a course and replace the cached entry in place
    pub fn update_course(&self, course: Course) -> MutationHandle {
        let api = self.inner.courses_api.clone();
        let course = course.detached();
        self.spawn_mutation(
            EntityKind::Course,
            Operation::Update,
            move || {
                let api = api.clone();
                let course = course.clone();
                async move { api.update(&course).await }
            },
            |state, updated: Course| {
                let updated = resolve(updated, &state.categories);
                match state.courses.iter().position(|c| c.id == updated.id) {
                    Some(index) => state.courses_mut()[index] = updated,
                    None => debug!("Course {} is not cached; nothing to replace", updated.id),
                }
            },
        )
    }

    /// Delete a course and drop it from the cache
    pub fn delete_course(&self, id: CourseId) -> MutationHandle {
        let api = self.inner.courses_api.clone();
        self.spawn_mutation(
            EntityKind::Course,
            Operation::Delete,
            move || {
                let api = api.clone();
                async move { api.delete(id).await }
            },
            move |state, ()| {
                if state.courses.iter().any(|c| c.id == id) {
                    state.courses_mut().retain(|c| c.id != id);
                }
            },
        )
    }

    /// Create a category and append it
    pub fn add_category(&self, category: Category) -> MutationHandle {
        let api = self.inner.categories_api.clone();
        self.spawn_mutation(
            EntityKind::Category,
            Operation::Create,
            move || {
                let api = api.clone();
                let category = category.clone();
                async move { api.create(&category).await }
            },
            |state, created: Category| state.categories_mut().push(created),
        )
    }

    /// Update a category and replace the cached entry in place.
    ///
    /// Cached courses keep their previously resolved category unless
    /// `refresh_relations_on_category_change` is configured.
    pub fn update_category(&self, category: Category) -> MutationHandle {
        let api = self.inner.categories_api.clone();
        let refresh = self.inner.refresh_relations;
        self.spawn_mutation(
            EntityKind::Category,
            Operation::Update,
            move || {
                let api = api.clone();
                let category = category.clone();
                async move { api.update(&category).await }
            },
            move |state, updated: Category| {
                let id = updated.id;
                match state.categories.iter().position(|c| c.id == id) {
                    Some(index) => state.categories_mut()[index] = updated,
                    None => debug!("Category {} is not cached; nothing to replace", id),
                }
                if refresh {
                    refresh_courses_of(state, id);
                }
            },
        )
    }

    /// Delete a category and drop it from the cache.
    ///
    /// Courses pointing at it keep their foreign key and, unless
    /// `refresh_relations_on_category_change` is configured, their stale
    /// resolved category.
    pub fn delete_category(&self, id: CategoryId) -> MutationHandle {
        let api = self.inner.categories_api.clone();
        let refresh = self.inner.refresh_relations;
        self.spawn_mutation(
            EntityKind::Category,
            Operation::Delete,
            move || {
                let api = api.clone();
                async move { api.delete(id).await }
            },
            move |state, ()| {
                if state.categories.iter().any(|c| c.id == id) {
                    state.categories_mut().retain(|c| c.id != id);
                }
                if refresh {
                    refresh_courses_of(state, id);
                }
            },
        )
    }

    fn spawn_mutation<T, Call, Fut, Apply>(
        &self,
        kind: EntityKind,
        operation: Operation,
        call: Call,
        apply: Apply,
    ) -> MutationHandle
    where
        T: Send + 'static,
        Call: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
        Apply: FnOnce(&mut StoreState, T) + Send + 'static,
    {
        let inner = self.inner.clone();
        if inner.is_disposed() {
            warn!("Store disposed; {} {} refused", operation, kind);
            return MutationHandle {
                operation,
                kind,
                task: None,
            };
        }
        inner.begin();
        debug!("Starting {} {}", operation, kind);

        // created outside the task so an abort before the first poll still settles
        let guard = SettleGuard::mutation(inner.clone());
        let task = tokio::spawn(async move {
            let fallback = operation.fallback(kind);
            match inner.retry.run(&fallback, call).await {
                Ok(value) => {
                    let applied = inner.commit(|state| {
                        apply(state, value);
                        state.loading = false;
                    });
                    match applied {
                        Some(()) => debug!("{} {} applied", operation, kind),
                        None => warn!("Store disposed before {} {} settled; result discarded", operation, kind),
                    }
                }
                Err(e) => inner.fail(&e, &fallback, |state| state.loading = false),
            }
            guard.disarm();
        });

        MutationHandle {
            operation,
            kind,
            task: Some(task),
        }
    }
}

/// Re-resolve every cached course that references category `id`
fn refresh_courses_of(state: &mut StoreState, id: CategoryId) {
    if !state.courses.iter().any(|course| course.category_id == id) {
        return;
    }
    let categories = state.categories.clone();
    for course in state.courses_mut().iter_mut().filter(|c| c.category_id == id) {
        course.category = find_category(&categories, id).cloned();
    }
}

impl Drop for LearningStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for LearningStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("LearningStore")
            .field("courses", &state.courses.len())
            .field("categories", &state.categories.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .field("disposed", &self.inner.is_disposed())
            .finish()
    }
}
