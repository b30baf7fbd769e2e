//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the one in-memory store behind an `Arc`, so cloning the state
//! per request clones a handle, not the data.

use std::sync::Arc;

use crate::store::MemoryStore;

#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
