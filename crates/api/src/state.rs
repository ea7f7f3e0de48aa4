use std::sync::Arc;

use catalog_db::store::MovieStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Movie persistence. PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn MovieStore>,
}
