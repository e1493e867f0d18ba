//! Change notifications emitted after every successful graph mutation.
//!
//! The editor is a pure state holder; rendering is entirely external. Each
//! mutation dispatches a `ChangeMessage` carrying the event plus the full
//! `{nodes, edges}` snapshot, so subscribing panels re-render from scratch
//! instead of patching their own copies.

use std::sync::Arc;

use crate::{
    ShareLock,
    graph::{EdgeId, GraphSnapshot, NodeId},
};

/// What changed in the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    NodeAdded(NodeId),
    NodeMoved(NodeId),
    NodeRemoved(NodeId),
    EdgeAdded(EdgeId),
    FieldUpdated {
        node: NodeId,
        key: String,
    },
    SelectionChanged(Option<NodeId>),
    Renamed(String),
    Cleared,
    Replaced,
}

/// Event message handed to subscribers.
#[derive(Debug, Clone)]
pub struct ChangeMessage {
    /// The mutation that occurred.
    pub event: ChangeEvent,
    /// Full graph snapshot after the mutation.
    pub snapshot: GraphSnapshot,
}

/// Subscriber callback invoked on the mutating thread.
pub type ChangeHandle = Arc<dyn Fn(&ChangeMessage) + Send + Sync>;

/// Dispatches change messages to registered subscribers.
#[derive(Clone, Default)]
pub(crate) struct ChangeChannel {
    handles: ShareLock<Vec<ChangeHandle>>,
}

impl ChangeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a change handler
    pub fn on_change(
        &self,
        handle: ChangeHandle,
    ) {
        let mut handles = self.handles.write().unwrap();
        handles.push(handle);
    }

    /// dispatch a message to all handlers
    pub fn dispatch(
        &self,
        message: ChangeMessage,
    ) {
        let handles = self.handles.read().unwrap();
        for handle in handles.iter() {
            (handle)(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn test_dispatch_reaches_all_handlers() {
        let channel = ChangeChannel::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let count = count.clone();
            channel.on_change(Arc::new(move |_| {
                count.fetch_add(1, Ordering::Relaxed);
            }));
        }

        channel.dispatch(ChangeMessage {
            event: ChangeEvent::Cleared,
            snapshot: GraphSnapshot::default(),
        });
        assert_eq!(count.load(Ordering::Relaxed), 3);
    }
}
