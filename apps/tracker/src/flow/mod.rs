//! Status flow: the node/edge graph behind the application Sankey view.
//!
//! `aggregate` derives the graph from in-memory records and never fails;
//! `source` fetches those records through a `TrackerSource` first.

pub mod aggregate;
pub mod source;

use serde::{Deserialize, Serialize};

pub use aggregate::build_status_flow;
pub use source::{load_status_flow, TrackerSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub name: String,
}

/// Directed, weighted edge between two node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFlow {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub has_valid_data: bool,
}

impl StatusFlow {
    /// The safe default a view renders as "not enough data".
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            has_valid_data: false,
        }
    }

    pub fn total_transitions(&self) -> u64 {
        self.edges.iter().map(|e| e.value).sum()
    }

    /// Looks up an edge by status names. Mostly useful in tests and the CLI.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&FlowEdge> {
        let index = |name: &str| self.nodes.iter().position(|n| n.name == name);
        let (s, t) = (index(source)?, index(target)?);
        self.edges.iter().find(|e| e.source == s && e.target == t)
    }
}

impl Default for StatusFlow {
    fn default() -> Self {
        Self::empty()
    }
}
