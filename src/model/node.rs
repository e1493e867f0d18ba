use serde::{Deserialize, Serialize};

use crate::graph::{Node, NodeConfig, NodeKind, Position};

/// Persistence model of a placed node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeModel {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub config: NodeConfig,
}

impl From<Node> for NodeModel {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            kind: node.kind,
            label: node.label,
            x: node.position.x,
            y: node.position.y,
            config: node.config,
        }
    }
}

impl From<NodeModel> for Node {
    fn from(model: NodeModel) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            position: Position::new(model.x, model.y),
            label: model.label,
            config: model.config,
        }
    }
}
