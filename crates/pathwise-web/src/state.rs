//! Application state for the web server.
//!
//! The engine is immutable, so handlers share it through an `Arc` with no
//! locking. Scoring may block on the query encoder, so it runs on the
//! blocking thread pool.

use pathwise_rank::PathEngine;
use std::sync::Arc;

/// Results returned by `/api/search` when the request names no `top_k`.
pub const DEFAULT_SEARCH_TOP_K: usize = 20;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PathEngine>,
    search_top_k: usize,
}

impl AppState {
    pub fn new(engine: PathEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            search_top_k: DEFAULT_SEARCH_TOP_K,
        }
    }

    pub fn with_search_top_k(mut self, top_k: usize) -> Self {
        self.search_top_k = top_k;
        self
    }

    pub fn engine(&self) -> &PathEngine {
        &self.engine
    }

    pub fn search_top_k(&self) -> usize {
        self.search_top_k
    }

    /// Run `f` against the engine on the blocking pool.
    pub async fn with_engine<F, T>(&self, f: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&PathEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || f(&engine)).await
    }
}
