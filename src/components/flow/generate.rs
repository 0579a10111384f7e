//! Sample flow diagrams
//!
//! Three fixed layouts plus a random chain. Every generator returns nodes
//! whose edges only reference ids that exist in the same diagram.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{FlowEdge, FlowNode};

/// Number of nodes in the `random` diagram
pub const RANDOM_FLOW_NODES: usize = 5;

const NODE_TYPES: &[&str] = &["input", "default", "output"];

const NODE_LABELS: &[&str] = &[
    "Start", "Process", "Validate", "Review", "Approve", "Reject", "Complete", "End",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("unknown flow type: '{0}' (expected simple, decision, workflow or random)")]
    UnknownFlowKind(String),
}

/// Which sample diagram to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Simple,
    Decision,
    Workflow,
    #[default]
    Random,
}

impl FlowKind {
    pub const ALL: [FlowKind; 4] = [Self::Simple, Self::Decision, Self::Workflow, Self::Random];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Decision => "decision",
            Self::Workflow => "workflow",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenerateError::UnknownFlowKind(s.to_string()))
    }
}

/// Title, nodes and edges of one diagram
#[derive(Debug, Clone, PartialEq)]
pub struct FlowData {
    pub title: String,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowData {
    /// Replace the kind's built-in title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Build the diagram named by `kind`, failing on names that are not a `FlowKind`
pub fn generate_flow_data_by_type(kind: &str) -> Result<FlowData, GenerateError> {
    Ok(generate_flow(kind.parse()?))
}

pub fn generate_flow(kind: FlowKind) -> FlowData {
    match kind {
        FlowKind::Simple => simple_flow(),
        FlowKind::Decision => decision_flow(),
        FlowKind::Workflow => workflow_flow(),
        FlowKind::Random => random_flow(RANDOM_FLOW_NODES),
    }
}

/// Start -> Process -> End
pub fn simple_flow() -> FlowData {
    FlowData {
        title: "Simple Flow".to_string(),
        nodes: vec![
            FlowNode::new("1", "Start", 250, 25).with_kind("input"),
            FlowNode::new("2", "Process", 100, 125),
            FlowNode::new("3", "End", 250, 250).with_kind("output"),
        ],
        edges: vec![FlowEdge::new("1", "2"), FlowEdge::new("2", "3")],
    }
}

/// One decision splitting into two paths that rejoin
pub fn decision_flow() -> FlowData {
    FlowData {
        title: "Decision Flow".to_string(),
        nodes: vec![
            FlowNode::new("1", "Start", 250, 25).with_kind("input"),
            FlowNode::new("2", "Decision", 250, 125).with_kind("default"),
            FlowNode::new("3", "Yes Path", 100, 225),
            FlowNode::new("4", "No Path", 400, 225),
            FlowNode::new("5", "End", 250, 325).with_kind("output"),
        ],
        edges: vec![
            FlowEdge::new("1", "2"),
            FlowEdge::new("2", "3").with_label("Yes"),
            FlowEdge::new("2", "4").with_label("No"),
            FlowEdge::new("3", "5"),
            FlowEdge::new("4", "5"),
        ],
    }
}

/// Request handling with validation, rejection and review
pub fn workflow_flow() -> FlowData {
    FlowData {
        title: "Workflow Process".to_string(),
        nodes: vec![
            FlowNode::new("1", "Submit Request", 250, 25).with_kind("input"),
            FlowNode::new("2", "Validate", 250, 100),
            FlowNode::new("3", "Valid?", 250, 175).with_kind("default"),
            FlowNode::new("4", "Reject", 100, 250),
            FlowNode::new("5", "Process", 400, 250),
            FlowNode::new("6", "Review", 400, 325),
            FlowNode::new("7", "Complete", 400, 400).with_kind("output"),
        ],
        edges: vec![
            FlowEdge::new("1", "2"),
            FlowEdge::new("2", "3"),
            FlowEdge::new("3", "4").with_label("No"),
            FlowEdge::new("3", "5").with_label("Yes"),
            FlowEdge::new("5", "6"),
            FlowEdge::new("6", "7"),
        ],
    }
}

/// A chain of `num_nodes` nodes with random types, labels and x offsets
///
/// The first node is always `input`/"Start" and the last `output`/"End".
pub fn random_flow(num_nodes: usize) -> FlowData {
    let mut rng = rand::thread_rng();
    let mut nodes = Vec::with_capacity(num_nodes);
    let mut edges = Vec::with_capacity(num_nodes.saturating_sub(1));

    for i in 0..num_nodes {
        let (kind, label) = if i == 0 {
            ("input", "Start")
        } else if i == num_nodes - 1 {
            ("output", "End")
        } else {
            (
                NODE_TYPES.choose(&mut rng).copied().unwrap_or("default"),
                NODE_LABELS.choose(&mut rng).copied().unwrap_or("Process"),
            )
        };

        let x = rng.gen_range(50..=450);
        let y = 25 + (i as i64) * 75;
        nodes.push(FlowNode::new((i + 1).to_string(), label, x, y).with_kind(kind));

        if i > 0 {
            edges.push(FlowEdge::new(i.to_string(), (i + 1).to_string()));
        }
    }

    FlowData {
        title: "Random Flow".to_string(),
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_edges_reference_nodes(data: &FlowData) {
        let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &data.edges {
            assert!(ids.contains(edge.source.as_str()), "dangling source in {}", edge.id);
            assert!(ids.contains(edge.target.as_str()), "dangling target in {}", edge.id);
        }
    }

    #[test]
    fn test_workflow_shape() {
        let data = generate_flow_data_by_type("workflow").unwrap();
        assert_eq!(data.title, "Workflow Process");
        assert_eq!(data.nodes.first().unwrap().kind.as_deref(), Some("input"));
        assert_eq!(data.nodes.last().unwrap().kind.as_deref(), Some("output"));
        assert_edges_reference_nodes(&data);
    }

    #[test]
    fn test_every_kind_is_consistent() {
        for kind in FlowKind::ALL {
            let data = generate_flow_data_by_type(kind.as_str()).unwrap();
            assert!(!data.nodes.is_empty(), "{kind} has no nodes");
            assert_eq!(data.nodes[0].kind.as_deref(), Some("input"));
            assert_edges_reference_nodes(&data);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let result = generate_flow_data_by_type("nonexistent");
        assert_eq!(
            result,
            Err(GenerateError::UnknownFlowKind("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_kind_round_trips_through_display() {
        for kind in FlowKind::ALL {
            assert_eq!(kind.to_string().parse::<FlowKind>(), Ok(kind));
        }
        assert!("Workflow".parse::<FlowKind>().is_err());
    }

    #[test]
    fn test_decision_edges_are_labelled() {
        let data = decision_flow();
        let labelled: Vec<&str> = data
            .edges
            .iter()
            .filter_map(|e| e.label.as_deref())
            .collect();
        assert_eq!(labelled, vec!["Yes", "No"]);
    }

    #[test]
    fn test_random_flow_is_a_chain() {
        let data = random_flow(6);
        assert_eq!(data.nodes.len(), 6);
        assert_eq!(data.edges.len(), 5);
        assert_eq!(data.nodes[0].data["label"], "Start");
        assert_eq!(data.nodes[5].data["label"], "End");
        assert_eq!(data.nodes[5].kind.as_deref(), Some("output"));

        for (i, node) in data.nodes.iter().enumerate() {
            let x = node.position["x"].as_i64().unwrap();
            assert!((50..=450).contains(&x));
            assert_eq!(node.position["y"], 25 + 75 * i as i64);
        }
        for (i, edge) in data.edges.iter().enumerate() {
            assert_eq!(edge.id, format!("e{}-{}", i + 1, i + 2));
        }
        assert_edges_reference_nodes(&data);
    }

    #[test]
    fn test_title_override_keeps_layout() {
        let data = simple_flow().with_title("Onboarding");
        assert_eq!(data.title, "Onboarding");
        assert_eq!(data.nodes, simple_flow().nodes);
    }

    #[test]
    fn test_random_flow_edge_cases() {
        let empty = random_flow(0);
        assert!(empty.nodes.is_empty() && empty.edges.is_empty());

        let single = random_flow(1);
        assert_eq!(single.nodes.len(), 1);
        assert_eq!(single.nodes[0].kind.as_deref(), Some("input"));
        assert!(single.edges.is_empty());
    }
}
