use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::category::Category;
use crate::domain::course::Course;

pub(crate) type SharedState = Arc<RwLock<StoreState>>;

/// Latest settled state of the store.
///
/// Collections sit behind `Arc` so readers take cheap snapshots while
/// writers copy on write. Each collection carries its own version, bumped
/// on every structural or content change, which is what memoized views key
/// on.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) courses: Arc<Vec<Course>>,
    pub(crate) categories: Arc<Vec<Category>>,
    pub(crate) courses_version: u64,
    pub(crate) categories_version: u64,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    /// Initial loads that have not settled yet
    pub(crate) loads_pending: u8,
    /// Bumped on every commit, broadcast to subscribers
    pub(crate) revision: u64,
}

impl StoreState {
    pub(crate) fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Mark one initial load as settled
    pub(crate) fn finish_load(&mut self) {
        self.loading = false;
        self.loads_pending = self.loads_pending.saturating_sub(1);
    }

    pub(crate) fn courses_mut(&mut self) -> &mut Vec<Course> {
        self.courses_version += 1;
        Arc::make_mut(&mut self.courses)
    }

    pub(crate) fn categories_mut(&mut self) -> &mut Vec<Category> {
        self.categories_version += 1;
        Arc::make_mut(&mut self.categories)
    }

    pub(crate) fn replace_courses(&mut self, courses: Vec<Course>) {
        self.courses_version += 1;
        self.courses = Arc::new(courses);
    }

    pub(crate) fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories_version += 1;
        self.categories = Arc::new(categories);
    }
}
