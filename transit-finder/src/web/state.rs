//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::engine::EngineConfig;

/// How long a search request waits for line lookups before answering
/// with partial results.
pub const DEFAULT_SEARCH_DEADLINE: Duration = Duration::from_secs(20);

/// Shared application state.
///
/// Contains all the services needed to handle requests. The server runs
/// with a cached AMap client; tests substitute a scripted provider.
pub struct AppState<P> {
    /// Geodata provider shared by every request
    pub provider: Arc<P>,

    /// Default city, radius and visibility for new sessions
    pub config: Arc<EngineConfig>,

    /// Upper bound on one search request
    pub search_deadline: Duration,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: Arc::clone(&self.config),
            search_deadline: self.search_deadline,
        }
    }
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(provider: P, config: EngineConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config: Arc::new(config),
            search_deadline: DEFAULT_SEARCH_DEADLINE,
        }
    }

    /// Set the search deadline.
    pub fn with_search_deadline(mut self, deadline: Duration) -> Self {
        self.search_deadline = deadline;
        self
    }
}
