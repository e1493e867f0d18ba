//! Authoring graph backed by a directed graph structure.
//!
//! The graph is a pure data container: it exposes accessors and snapshots,
//! while every mutation goes through the `GraphEditor` so validation stays
//! centralized. Internally it wraps a petgraph `DiGraph`, whose node removal
//! also removes incident edges, which keeps the no-dangling-edge invariant
//! structural rather than bookkept.

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::{
    FlowcraftError, Result, ShareLock,
    graph::{
        edge::{Edge, EdgeId},
        node::{Node, NodeId},
    },
    model::{AutomationModel, EdgeModel, NodeModel},
};

/// Edges touching one node, split by direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connections {
    pub incoming: Vec<Edge>,
    pub outgoing: Vec<Edge>,
}

/// Full `{nodes, edges}` view handed to the canvas after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// One automation's authoring graph: placed nodes, directed connections,
/// and the automation name.
#[derive(Clone)]
pub struct Graph {
    /// Thread-safe directed graph storing nodes and edges.
    graph: ShareLock<DiGraph<Node, Edge>>,
    /// Automation display name; survives `clear`.
    name: ShareLock<String>,
}

impl Graph {
    /// create an empty graph
    pub fn new(name: &str) -> Self {
        Self {
            graph: ShareLock::new(DiGraph::new().into()),
            name: ShareLock::new(name.to_string().into()),
        }
    }

    /// automation display name
    pub fn name(&self) -> String {
        self.name.read().unwrap().clone()
    }

    pub(crate) fn set_name(
        &self,
        name: &str,
    ) {
        *self.name.write().unwrap() = name.to_string();
    }

    /// get node by id
    pub fn get_node(
        &self,
        id: &NodeId,
    ) -> Option<Node> {
        let graph = self.graph.read().unwrap();
        graph.node_indices().find(|idx| graph[*idx].id.eq(id)).map(|idx| graph[idx].clone())
    }

    /// get edge by id
    pub fn get_edge(
        &self,
        id: &EdgeId,
    ) -> Option<Edge> {
        let graph = self.graph.read().unwrap();
        graph.edge_indices().find(|idx| graph[*idx].id.eq(id)).map(|idx| graph[idx].clone())
    }

    /// check whether a node id is present
    pub fn contains_node(
        &self,
        id: &NodeId,
    ) -> bool {
        let graph = self.graph.read().unwrap();
        graph.node_indices().any(|idx| graph[idx].id.eq(id))
    }

    /// number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.read().unwrap().node_count()
    }

    /// number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.read().unwrap().edge_count()
    }

    /// Edges touching the given node, split into incoming and outgoing.
    ///
    /// An absent id yields empty connections on both sides.
    pub fn connections(
        &self,
        id: &NodeId,
    ) -> Connections {
        let graph = self.graph.read().unwrap();
        graph
            .node_indices()
            .find(|idx| graph[*idx].id.eq(id))
            .map(|idx| Connections {
                incoming: graph.edges_directed(idx, Direction::Incoming).map(|e| e.weight().clone()).collect(),
                outgoing: graph.edges_directed(idx, Direction::Outgoing).map(|e| e.weight().clone()).collect(),
            })
            .unwrap_or_default()
    }

    /// Full `{nodes, edges}` snapshot for rendering.
    pub fn snapshot(&self) -> GraphSnapshot {
        let graph = self.graph.read().unwrap();
        GraphSnapshot {
            nodes: graph.node_indices().map(|idx| graph[idx].clone()).collect(),
            edges: graph.edge_indices().map(|idx| graph[idx].clone()).collect(),
        }
    }

    pub(crate) fn add_node(
        &self,
        node: Node,
    ) {
        let mut graph = self.graph.write().unwrap();
        graph.add_node(node);
    }

    pub(crate) fn add_edge(
        &self,
        edge: Edge,
    ) -> Result<()> {
        let mut graph = self.graph.write().unwrap();
        let source = Self::index_of(&graph, &edge.source).ok_or(FlowcraftError::NodeNotFound(edge.source.clone()))?;
        let target = Self::index_of(&graph, &edge.target).ok_or(FlowcraftError::NodeNotFound(edge.target.clone()))?;
        graph.add_edge(source, target, edge);
        Ok(())
    }

    /// Applies `f` to the node in place; `f` must not write before its own
    /// validation succeeds, so a failed update leaves the node untouched.
    pub(crate) fn update_node<F>(
        &self,
        id: &NodeId,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Node) -> Result<()>,
    {
        let mut graph = self.graph.write().unwrap();
        let idx = Self::index_of(&graph, id).ok_or(FlowcraftError::NodeNotFound(id.clone()))?;
        f(&mut graph[idx])
    }

    /// Removes a node and every edge referencing it. Returns false when the
    /// id was already absent.
    pub(crate) fn remove_node(
        &self,
        id: &NodeId,
    ) -> bool {
        let mut graph = self.graph.write().unwrap();
        match Self::index_of(&graph, id) {
            Some(idx) => {
                graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    /// Empties nodes and edges; the automation name is untouched.
    pub(crate) fn clear(&self) {
        let mut graph = self.graph.write().unwrap();
        graph.clear();
    }

    /// Atomically swaps in the contents of another graph.
    pub(crate) fn replace_with(
        &self,
        other: Graph,
    ) {
        let incoming = other.graph.read().unwrap().clone();
        let name = other.name();
        *self.graph.write().unwrap() = incoming;
        *self.name.write().unwrap() = name;
    }

    /// Serializes the graph into the persistence model.
    pub fn to_model(
        &self,
        automation_id: &str,
    ) -> AutomationModel {
        let snapshot = self.snapshot();
        AutomationModel {
            id: automation_id.to_string(),
            name: self.name(),
            nodes: snapshot.nodes.into_iter().map(NodeModel::from).collect(),
            edges: snapshot.edges.into_iter().map(EdgeModel::from).collect(),
        }
    }

    fn index_of(
        graph: &DiGraph<Node, Edge>,
        id: &NodeId,
    ) -> Option<NodeIndex> {
        graph.node_indices().find(|idx| graph[*idx].id.eq(id))
    }
}

impl TryFrom<&AutomationModel> for Graph {
    type Error = FlowcraftError;

    fn try_from(model: &AutomationModel) -> Result<Self> {
        let mut graph: DiGraph<Node, Edge> = DiGraph::new();

        let mut nodes = HashMap::new();

        for node in model.nodes.iter() {
            let node = Node::from(node.clone());
            let nid = node.id.clone();
            if nodes.contains_key(&nid) {
                return Err(FlowcraftError::InvalidOperation(format!("duplicate node id: {}", nid)));
            }
            let node_idx = graph.add_node(node);
            nodes.insert(nid, node_idx);
        }
        for edge in model.edges.iter() {
            let edge = Edge::from(edge.clone());
            let source = nodes.get(&edge.source).ok_or(FlowcraftError::NodeNotFound(format!("edge source {}", edge.source)))?;
            let target = nodes.get(&edge.target).ok_or(FlowcraftError::NodeNotFound(format!("edge target {}", edge.target)))?;
            graph.add_edge(*source, *target, edge);
        }
        Ok(Self {
            graph: ShareLock::new(graph.into()),
            name: ShareLock::new(model.name.clone().into()),
        })
    }
}
