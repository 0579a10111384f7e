//! Server state shared across handlers

use std::sync::{Arc, Mutex, PoisonError};

use crate::component::Renderer;
use crate::config::DemoConfig;

/// Counter value shared by every request
///
/// Increments and decrements are serialized through the mutex.
pub type SharedCounter = Arc<Mutex<i64>>;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    /// Renderer holding the template engine
    pub(super) renderer: Arc<Renderer>,
    /// Current counter value
    pub(super) counter: SharedCounter,
    /// Sample data settings for the index page
    pub(super) demo: DemoConfig,
}

impl AppState {
    pub fn new(renderer: Arc<Renderer>, demo: DemoConfig) -> Self {
        let counter = Arc::new(Mutex::new(demo.initial_count));
        Self {
            renderer,
            counter,
            demo,
        }
    }

    /// Current counter value
    pub fn count(&self) -> i64 {
        *self.counter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `delta` to the counter and return the new value
    pub(super) fn adjust(&self, delta: i64) -> i64 {
        let mut count = self.counter.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_add(delta);
        *count
    }
}
