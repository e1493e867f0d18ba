//! Edge definitions for the authoring graph.

use serde::{Deserialize, Serialize};

use crate::graph::node::NodeId;

/// Unique identifier for an edge within a graph.
pub type EdgeId = String;

/// A directed connection between two placed nodes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// Presentation flag for the canvas; always true on creation.
    pub animated: bool,
}
