//! Counter component: the current count and its +/- controls

use serde::{Deserialize, Serialize};

use crate::component::Component;

pub const DEFAULT_TITLE: &str = "HTMX Counter SPA";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// A component representing the current count and its controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// The current count value
    pub count: i64,
    /// The title for the counter section
    #[serde(default = "default_title")]
    pub title: String,
}

impl Counter {
    pub fn new(count: i64) -> Self {
        Self {
            count,
            title: default_title(),
        }
    }

    /// Replace the default heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Component for Counter {
    const NAME: &'static str = "Counter";
    const SOURCE: &'static str = file!();
}
