//! Structured output tree populated by decoders.
//!
//! The tree is the only thing a decoder produces; rendering it (widgets,
//! colors, indentation) belongs to whatever consumes the report. Child
//! order always matches wire order.

use serde::{Deserialize, Serialize};

/// One labeled node in a dissection tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Human-readable field or record label, e.g. `Enabled: True`.
    pub label: String,
    /// Set when this node reports an unknown code or a decode failure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub anomalous: bool,
    /// Child nodes in wire order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Leaf node with no children.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            anomalous: false,
            children: Vec::new(),
        }
    }

    /// Node expecting children (starts empty).
    pub fn branch(label: impl Into<String>) -> Self {
        Self::leaf(label)
    }

    /// Leaf flagged anomalous, used for unknown codes and decode errors.
    pub fn anomaly(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            anomalous: true,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Whether this node or any descendant is flagged anomalous.
    pub fn contains_anomaly(&self) -> bool {
        self.anomalous || self.children.iter().any(Node::contains_anomaly)
    }

    /// Single post-pass that flags every node on a path to an anomaly.
    ///
    /// Decoders only flag the node they create; this walk lets a viewer
    /// scanning shallow levels discover every subtree that holds one.
    pub fn flag_anomalous_branches(&mut self) -> bool {
        let mut found = self.anomalous;
        for child in &mut self.children {
            found |= child.flag_anomalous_branches();
        }
        self.anomalous = found;
        found
    }
}
