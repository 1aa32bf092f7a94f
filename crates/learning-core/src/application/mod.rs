/// Retry policy applied to every mutation
pub mod retry;

/// Settled store state shared between the store and its views
pub(crate) mod state;

/// Memoized projections over store state
pub mod views;

/// The catalogue store
pub mod store;
