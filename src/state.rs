//! Application state shared by the HTTP handlers

use std::sync::Arc;

use crate::modules::lookup::Resolver;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only resolution pipeline; no per-request mutable state
    pub resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
