//! Shared application state for all routes.

use crate::store::ProducerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected backend; Postgres in production, memory in tests.
    pub store: Arc<dyn ProducerStore>,
}

impl AppState {
    pub fn new<S: ProducerStore + 'static>(store: S) -> Self {
        AppState { store: Arc::new(store) }
    }
}
