use serde::{Deserialize, Serialize};

use crate::graph::Edge;

/// Persistence model of a directed connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeModel {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

impl From<Edge> for EdgeModel {
    fn from(edge: Edge) -> Self {
        Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            animated: edge.animated,
        }
    }
}

impl From<EdgeModel> for Edge {
    fn from(model: EdgeModel) -> Self {
        Self {
            id: model.id,
            source: model.source,
            target: model.target,
            animated: model.animated,
        }
    }
}
