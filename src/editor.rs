//! Graph mutation engine - the single path through which a graph changes.
//!
//! Every panel of the flow builder (palette, canvas, inspector) issues
//! commands against `GraphEditor` and receives read-only snapshots back.
//! Each operation validates all of its preconditions before the first write,
//! so a failed operation leaves the graph exactly as it was.
//!
//! Id generation uses nanoid rather than timestamps, so rapid successive
//! insertions cannot collide within a session.

use nanoid::nanoid;
use tracing::{debug, trace};

use crate::{
    FlowcraftError, Result, ShareLock,
    catalog::ModuleDefinition,
    events::{ChangeChannel, ChangeEvent, ChangeHandle, ChangeMessage},
    graph::{Edge, Graph, GraphSnapshot, Node, NodeConfig, NodeId, Position},
    model::AutomationModel,
};

/// Length of generated node and edge ids.
const ID_LENGTH: usize = 10;

/// The authoring command interface over one automation graph.
///
/// Owns the graph and the at-most-one node selection. All operations are
/// synchronous and either fully apply or fully fail.
pub struct GraphEditor {
    /// The single source of truth for the authored graph.
    graph: Graph,
    /// Currently inspected node, if any. Never persisted.
    selection: ShareLock<Option<NodeId>>,
    /// Outbound change notifications for rendering panels.
    channel: ChangeChannel,
}

impl GraphEditor {
    /// Creates an editor over an empty graph.
    pub fn new(name: &str) -> Self {
        Self {
            graph: Graph::new(name),
            selection: ShareLock::default(),
            channel: ChangeChannel::new(),
        }
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Full `{nodes, edges}` snapshot for rendering.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }

    /// Registers a subscriber for change notifications.
    pub fn on_change(
        &self,
        handle: ChangeHandle,
    ) {
        self.channel.on_change(handle);
    }

    /// Places a new node instantiated from the given module.
    ///
    /// The node gets a fresh unique id, its kind from the module category,
    /// its label from the module name, and an empty configuration for the
    /// module sub-type. Fails with `InvalidModule` on a malformed snapshot.
    pub fn add_node(
        &self,
        module: &ModuleDefinition,
        position: Position,
    ) -> Result<Node> {
        if module.id.is_empty() || module.name.is_empty() {
            return Err(FlowcraftError::InvalidModule("missing id or name in module snapshot".to_string()));
        }
        let config = NodeConfig::for_module(&module.id)?;

        let node = Node {
            id: nanoid!(ID_LENGTH),
            kind: module.category.into(),
            position,
            label: module.name.clone(),
            config,
        };
        debug!("editor::add_node({}, module={})", node.id, module.id);
        self.graph.add_node(node.clone());
        self.emit(ChangeEvent::NodeAdded(node.id.clone()));
        Ok(node)
    }

    /// Moves a node to a new canvas position.
    ///
    /// Writes only the position; kind, label, and config are untouched.
    pub fn move_node(
        &self,
        id: &NodeId,
        position: Position,
    ) -> Result<()> {
        self.graph.update_node(id, |node| {
            node.position = position;
            Ok(())
        })?;
        trace!("editor::move_node({}, {:?})", id, position);
        self.emit(ChangeEvent::NodeMoved(id.clone()));
        Ok(())
    }

    /// Connects two placed nodes with a directed edge.
    ///
    /// Fails with `NodeNotFound` when either endpoint is missing and with
    /// `InvalidOperation` on a self-loop. Multiple edges between the same
    /// ordered pair are allowed; branches may fan out freely.
    pub fn connect(
        &self,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<Edge> {
        if !self.graph.contains_node(source) {
            return Err(FlowcraftError::NodeNotFound(source.clone()));
        }
        if !self.graph.contains_node(target) {
            return Err(FlowcraftError::NodeNotFound(target.clone()));
        }
        if source == target {
            return Err(FlowcraftError::InvalidOperation(format!("self-loop on node {}", source)));
        }

        let edge = Edge {
            id: nanoid!(ID_LENGTH),
            source: source.clone(),
            target: target.clone(),
            animated: true,
        };
        debug!("editor::connect({} -> {})", source, target);
        self.graph.add_edge(edge.clone())?;
        self.emit(ChangeEvent::EdgeAdded(edge.id.clone()));
        Ok(edge)
    }

    /// Writes one field of a node.
    ///
    /// `"label"` edits the display name; any other key merge-writes the
    /// matching config field, preserving the rest. An unrecognized key for
    /// the node's module fails with `InvalidOperation` before any write.
    pub fn update_node_field(
        &self,
        id: &NodeId,
        key: &str,
        value: &str,
    ) -> Result<()> {
        self.graph.update_node(id, |node| {
            if key == "label" {
                node.label = value.to_string();
                Ok(())
            } else {
                node.config.set_field(key, value)
            }
        })?;
        trace!("editor::update_node_field({}, {})", id, key);
        self.emit(ChangeEvent::FieldUpdated {
            node: id.clone(),
            key: key.to_string(),
        });
        Ok(())
    }

    /// Removes a node and every edge referencing it as source or target.
    ///
    /// Idempotent: an absent id is a no-op. Removing the currently selected
    /// node resets the selection.
    pub fn remove_node(
        &self,
        id: &NodeId,
    ) {
        if !self.graph.remove_node(id) {
            trace!("editor::remove_node({}) already absent", id);
            return;
        }
        debug!("editor::remove_node({})", id);
        let deselected = {
            let mut selection = self.selection.write().unwrap();
            if selection.as_ref() == Some(id) {
                *selection = None;
                true
            } else {
                false
            }
        };
        self.emit(ChangeEvent::NodeRemoved(id.clone()));
        if deselected {
            self.emit(ChangeEvent::SelectionChanged(None));
        }
    }

    /// Removes the currently selected node, if any.
    pub fn remove_selected(&self) {
        if let Some(id) = self.selected() {
            self.remove_node(&id);
        }
    }

    /// Empties nodes and edges, preserving the automation name.
    pub fn clear(&self) {
        debug!("editor::clear()");
        self.graph.clear();
        *self.selection.write().unwrap() = None;
        self.emit(ChangeEvent::Cleared);
    }

    /// Renames the automation.
    pub fn rename(
        &self,
        name: &str,
    ) {
        self.graph.set_name(name);
        self.emit(ChangeEvent::Renamed(name.to_string()));
    }

    /// Atomically replaces the whole graph from a persistence model.
    ///
    /// Used by load; the selection is reset. Fails without touching the
    /// current graph when the model is malformed.
    pub fn replace(
        &self,
        model: &AutomationModel,
    ) -> Result<()> {
        let incoming = Graph::try_from(model)?;
        debug!("editor::replace({})", model.id);
        self.graph.replace_with(incoming);
        *self.selection.write().unwrap() = None;
        self.emit(ChangeEvent::Replaced);
        Ok(())
    }

    /// Marks a node as the inspected one.
    ///
    /// Valid even when the id is not currently in the graph; the inspector
    /// resolves a vanished node by reverting to no selection.
    pub fn select(
        &self,
        id: &NodeId,
    ) {
        *self.selection.write().unwrap() = Some(id.clone());
        self.emit(ChangeEvent::SelectionChanged(Some(id.clone())));
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        *self.selection.write().unwrap() = None;
        self.emit(ChangeEvent::SelectionChanged(None));
    }

    /// Currently selected node id, if any.
    pub fn selected(&self) -> Option<NodeId> {
        self.selection.read().unwrap().clone()
    }

    fn emit(
        &self,
        event: ChangeEvent,
    ) {
        self.channel.dispatch(ChangeMessage {
            event,
            snapshot: self.graph.snapshot(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;
    use crate::{ModuleCatalog, ModuleDefinition, NodeKind};

    fn editor() -> GraphEditor {
        GraphEditor::new("Test automation")
    }

    fn place(
        editor: &GraphEditor,
        module_id: &str,
    ) -> Node {
        let catalog = ModuleCatalog::builtin();
        let module = catalog.get_module(module_id).unwrap();
        editor.add_node(module, Position::new(250.0, 100.0)).unwrap()
    }

    // ==================== add_node tests ====================

    #[test]
    fn test_add_webhook_node() {
        let editor = editor();
        let node = place(&editor, "webhook");
        assert_eq!(node.kind, NodeKind::Trigger);
        assert_eq!(node.label, "Webhook");
        assert!(node.config.is_empty());
        assert_eq!(node.position, Position::new(250.0, 100.0));
    }

    #[test]
    fn test_add_node_ids_unique() {
        let editor = editor();
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let node = place(&editor, "email");
            ids.insert(node.id);
        }
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_add_node_malformed_module() {
        let editor = editor();
        let module = ModuleDefinition::new("", "", "", "", crate::ModuleCategory::Action);
        let err = editor.add_node(&module, Position::default()).unwrap_err();
        assert!(matches!(err, FlowcraftError::InvalidModule(_)));
        assert_eq!(editor.graph().node_count(), 0);
    }

    // ==================== move_node tests ====================

    #[test]
    fn test_move_node_changes_only_position() {
        let editor = editor();
        let node = place(&editor, "email");
        editor.update_node_field(&node.id, "subject", "Hi").unwrap();

        editor.move_node(&node.id, Position::new(400.0, 300.0)).unwrap();

        let moved = editor.graph().get_node(&node.id).unwrap();
        assert_eq!(moved.position, Position::new(400.0, 300.0));
        assert_eq!(moved.kind, node.kind);
        assert_eq!(moved.label, node.label);
        assert_eq!(moved.config.get_field("subject"), Some("Hi"));
    }

    #[test]
    fn test_move_missing_node() {
        let editor = editor();
        let err = editor.move_node(&"ghost".to_string(), Position::default()).unwrap_err();
        assert_eq!(err, FlowcraftError::NodeNotFound("ghost".to_string()));
    }

    // ==================== connect tests ====================

    #[test]
    fn test_connect_two_nodes() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let b = place(&editor, "email");

        let edge = editor.connect(&a.id, &b.id).unwrap();
        assert_eq!(edge.source, a.id);
        assert_eq!(edge.target, b.id);
        assert!(edge.animated);

        let incoming = editor.graph().connections(&b.id).incoming;
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].id, edge.id);
    }

    #[test]
    fn test_connect_missing_nodes() {
        let editor = editor();
        let err = editor.connect(&"missing-1".to_string(), &"missing-2".to_string()).unwrap_err();
        assert_eq!(err, FlowcraftError::NodeNotFound("missing-1".to_string()));
        assert_eq!(editor.graph().edge_count(), 0);
    }

    #[test]
    fn test_connect_self_loop_rejected() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let err = editor.connect(&a.id, &a.id).unwrap_err();
        assert!(matches!(err, FlowcraftError::InvalidOperation(_)));
        assert_eq!(editor.graph().edge_count(), 0);

        // Policy holds on repeated attempts.
        assert!(editor.connect(&a.id, &a.id).is_err());
        assert_eq!(editor.graph().edge_count(), 0);
    }

    #[test]
    fn test_connect_duplicate_pair_allowed() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let b = place(&editor, "email");
        let e1 = editor.connect(&a.id, &b.id).unwrap();
        let e2 = editor.connect(&a.id, &b.id).unwrap();
        assert_ne!(e1.id, e2.id);
        assert_eq!(editor.graph().edge_count(), 2);
    }

    // ==================== update_node_field tests ====================

    #[test]
    fn test_update_fields_merge() {
        let editor = editor();
        let node = place(&editor, "email");
        editor.update_node_field(&node.id, "subject", "Hi").unwrap();
        editor.update_node_field(&node.id, "body", "text").unwrap();

        let updated = editor.graph().get_node(&node.id).unwrap();
        assert_eq!(updated.config.get_field("subject"), Some("Hi"));
        assert_eq!(updated.config.get_field("body"), Some("text"));
    }

    #[test]
    fn test_update_label() {
        let editor = editor();
        let node = place(&editor, "filter");
        editor.update_node_field(&node.id, "label", "VIP only").unwrap();
        assert_eq!(editor.graph().get_node(&node.id).unwrap().label, "VIP only");
    }

    #[test]
    fn test_update_unknown_field() {
        let editor = editor();
        let node = place(&editor, "webhook");
        let err = editor.update_node_field(&node.id, "subject", "Hi").unwrap_err();
        assert!(matches!(err, FlowcraftError::InvalidOperation(_)));
        assert!(editor.graph().get_node(&node.id).unwrap().config.is_empty());
    }

    #[test]
    fn test_update_missing_node() {
        let editor = editor();
        let err = editor.update_node_field(&"ghost".to_string(), "label", "x").unwrap_err();
        assert_eq!(err, FlowcraftError::NodeNotFound("ghost".to_string()));
    }

    // ==================== remove_node tests ====================

    #[test]
    fn test_remove_node_cascades_edges() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let b = place(&editor, "email");
        let c = place(&editor, "http");

        // A has two outgoing and one incoming edge.
        editor.connect(&a.id, &b.id).unwrap();
        editor.connect(&a.id, &c.id).unwrap();
        editor.connect(&c.id, &a.id).unwrap();

        editor.remove_node(&a.id);

        assert_eq!(editor.graph().edge_count(), 0);
        let connections = editor.graph().connections(&a.id);
        assert!(connections.incoming.is_empty());
        assert!(connections.outgoing.is_empty());
        let snapshot = editor.snapshot();
        assert!(snapshot.edges.iter().all(|e| e.source != a.id && e.target != a.id));
    }

    #[test]
    fn test_remove_node_idempotent() {
        let editor = editor();
        let node = place(&editor, "email");
        editor.remove_node(&node.id);
        editor.remove_node(&node.id);
        assert_eq!(editor.graph().node_count(), 0);
    }

    #[test]
    fn test_remove_selected_node_clears_selection() {
        let editor = editor();
        let node = place(&editor, "email");
        editor.select(&node.id);
        assert_eq!(editor.selected(), Some(node.id.clone()));

        editor.remove_node(&node.id);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_remove_other_node_keeps_selection() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let b = place(&editor, "email");
        editor.select(&a.id);
        editor.remove_node(&b.id);
        assert_eq!(editor.selected(), Some(a.id));
    }

    #[test]
    fn test_remove_selected_command() {
        let editor = editor();
        let node = place(&editor, "email");
        editor.select(&node.id);
        editor.remove_selected();
        assert_eq!(editor.graph().node_count(), 0);
        assert_eq!(editor.selected(), None);
    }

    // ==================== clear / replace tests ====================

    #[test]
    fn test_clear_preserves_name() {
        let editor = editor();
        let a = place(&editor, "webhook");
        let b = place(&editor, "email");
        editor.connect(&a.id, &b.id).unwrap();
        editor.select(&a.id);

        editor.clear();

        assert_eq!(editor.graph().node_count(), 0);
        assert_eq!(editor.graph().edge_count(), 0);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.graph().name(), "Test automation");
    }

    #[test]
    fn test_replace_resets_selection() {
        let editor = editor();
        let node = place(&editor, "webhook");
        editor.select(&node.id);

        let other = GraphEditor::new("Other");
        place(&other, "email");
        editor.replace(&other.graph().to_model("auto-2")).unwrap();

        assert_eq!(editor.selected(), None);
        assert_eq!(editor.graph().name(), "Other");
        assert_eq!(editor.graph().node_count(), 1);
    }

    // ==================== change notification tests ====================

    #[test]
    fn test_mutations_dispatch_snapshots() {
        let editor = editor();
        let count = Arc::new(AtomicUsize::new(0));
        let seen_nodes = Arc::new(AtomicUsize::new(0));
        {
            let count = count.clone();
            let seen_nodes = seen_nodes.clone();
            editor.on_change(Arc::new(move |message| {
                count.fetch_add(1, Ordering::Relaxed);
                seen_nodes.store(message.snapshot.nodes.len(), Ordering::Relaxed);
            }));
        }

        let node = place(&editor, "email");
        editor.move_node(&node.id, Position::new(10.0, 20.0)).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 2);
        assert_eq!(seen_nodes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_failed_mutation_dispatches_nothing() {
        let editor = editor();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = count.clone();
            editor.on_change(Arc::new(move |_| {
                count.fetch_add(1, Ordering::Relaxed);
            }));
        }

        assert!(editor.move_node(&"ghost".to_string(), Position::default()).is_err());
        assert_eq!(count.load(Ordering::Relaxed), 0);
    }
}
