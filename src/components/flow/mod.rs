//! Flow diagram component
//!
//! Nodes and edges are handed to the browser as JSON for the client-side
//! diagram to draw. Nothing here checks that edges point at real nodes;
//! that is up to whoever builds the diagram.

pub mod generate;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::Component;

pub use generate::{generate_flow, generate_flow_data_by_type, FlowData, FlowKind, GenerateError};

pub const DEFAULT_TITLE: &str = "Flow Diagram";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    /// Node style understood by the client (`input`, `default`, `output`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Free-form node data; the client reads `data.label`
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Free-form position, conventionally `{x, y}`
    #[serde(default)]
    pub position: Map<String, Value>,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, x: i64, y: i64) -> Self {
        let mut data = Map::new();
        data.insert("label".to_string(), Value::String(label.into()));

        let mut position = Map::new();
        position.insert("x".to_string(), Value::from(x));
        position.insert("y".to_string(), Value::from(y));

        Self {
            id: id.into(),
            kind: None,
            data,
            position,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    /// Edge `e<source>-<target>`
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e{source}-{target}"),
            source,
            target,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A component representing a flow diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowComponent {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowComponent {
    pub fn new(title: impl Into<String>, nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        Self {
            title: title.into(),
            nodes,
            edges,
        }
    }
}

impl Default for FlowComponent {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, Vec::new(), Vec::new())
    }
}

impl From<FlowData> for FlowComponent {
    fn from(data: FlowData) -> Self {
        Self::new(data.title, data.nodes, data.edges)
    }
}

impl Component for FlowComponent {
    const NAME: &'static str = "FlowComponent";
    const SOURCE: &'static str = file!();
}
