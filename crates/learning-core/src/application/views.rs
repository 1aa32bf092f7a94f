//! Memoized projections over store state
//!
//! A [`Memo`] remembers the version of the collection it was computed from
//! and only runs its projection again once that collection has changed.
//! Reads are synchronous and always reflect the latest settled mutation.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::state::{SharedState, StoreState};

/// Collection a view depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Courses,
    Categories,
}

impl Source {
    fn version(&self, state: &StoreState) -> u64 {
        match self {
            Source::Courses => state.courses_version,
            Source::Categories => state.categories_version,
        }
    }
}

type Projection<T> = Box<dyn Fn(&StoreState) -> T + Send + Sync>;

/// Read-only, always-current view derived from the store
pub struct Memo<T> {
    state: SharedState,
    source: Source,
    project: Projection<T>,
    cache: Mutex<Option<(u64, T)>>,
    computations: AtomicUsize,
}

impl<T: Clone> Memo<T> {
    pub(crate) fn new<F>(state: SharedState, source: Source, project: F) -> Self
    where
        F: Fn(&StoreState) -> T + Send + Sync + 'static,
    {
        Self {
            state,
            source,
            project: Box::new(project),
            cache: Mutex::new(None),
            computations: AtomicUsize::new(0),
        }
    }

    /// Current value, recomputed only if the source collection changed
    pub fn get(&self) -> T {
        let state = self.state.read();
        let version = self.source.version(&state);

        let mut cache = self.cache.lock();
        if let Some((seen, value)) = cache.as_ref() {
            if *seen == version {
                return value.clone();
            }
        }

        let value = (self.project)(&state);
        self.computations.fetch_add(1, Ordering::Relaxed);
        *cache = Some((version, value.clone()));
        value
    }

    /// How many times the projection has actually run
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("source", &self.source)
            .field("cached", &*self.cache.lock())
            .finish()
    }
}
