//! Application state.

use std::sync::Arc;

use idoit_store::RocksStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
///
/// The store is the only shared resource; handlers are otherwise stateless,
/// so concurrent requests never contend on in-process mutable state.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}
