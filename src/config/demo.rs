//! Demo data configuration
//!
//! Controls the sample components shown on the index page.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::components::flow::FlowKind;

/// Sample data settings
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Number of generated users in the table
    pub table_rows: usize,
    /// Flow diagram shown when the request does not ask for one
    pub flow_kind: FlowKind,
    /// Counter value at process start
    pub initial_count: i64,
    /// Heading for the counter section, when not the component default
    pub counter_title: Option<String>,
    /// Heading for the flow diagram, replacing the flow kind's own title
    pub flow_title: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            table_rows: 15,
            flow_kind: FlowKind::Random,
            initial_count: 0,
            counter_title: None,
            flow_title: None,
        }
    }
}

/// Demo settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub table_rows: Option<usize>,
    pub flow_kind: Option<String>,
    pub initial_count: Option<i64>,
    pub counter_title: Option<String>,
    pub flow_title: Option<String>,
}

impl DemoConfig {
    /// Create from file config with defaults
    ///
    /// Unknown flow kinds are rejected here so a typo fails at startup
    /// instead of on every page load.
    pub fn from_file(file: Option<FileDemo>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let flow_kind = match file.flow_kind {
            Some(kind) => kind.parse().context("Invalid [demo] flow_kind")?,
            None => defaults.flow_kind,
        };

        Ok(Self {
            table_rows: file.table_rows.unwrap_or(defaults.table_rows),
            flow_kind,
            initial_count: file.initial_count.unwrap_or(defaults.initial_count),
            counter_title: file.counter_title,
            flow_title: file.flow_title,
        })
    }
}
