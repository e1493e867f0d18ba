//! Placement interaction: dragging a module from the palette onto the canvas.
//!
//! The drag transfer is a typed `DragPayload` message rather than an opaque
//! string; host UIs that must marshal it through a string channel use its
//! serde round-trip. A drop is validated against the catalog before any node
//! is constructed, and a bad drop degrades to a logged no-op instead of
//! throwing into the UI event loop.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    FlowcraftError, Result,
    catalog::{ModuleCatalog, ModuleCategory},
    editor::GraphEditor,
    graph::{Node, Position},
};

/// Typed drag transfer message carried from palette to canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DragPayload {
    pub module_id: String,
    pub category: ModuleCategory,
}

impl DragPayload {
    /// Serializes the payload for a string-marshalled transfer channel.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a payload from a transfer channel.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| FlowcraftError::InvalidModule(format!("malformed drag payload: {}", e)))
    }
}

/// Palette-to-canvas placement interaction.
pub struct Palette<'a> {
    catalog: &'a ModuleCatalog,
    editor: &'a GraphEditor,
}

impl<'a> Palette<'a> {
    pub fn new(
        catalog: &'a ModuleCatalog,
        editor: &'a GraphEditor,
    ) -> Self {
        Self {
            catalog,
            editor,
        }
    }

    /// Captures the dragged module into a transfer payload.
    ///
    /// Fails with `ModuleNotFound` when the id is not on the palette.
    pub fn begin_drag(
        &self,
        module_id: &str,
    ) -> Result<DragPayload> {
        let module = self.catalog.get_module(module_id)?;
        Ok(DragPayload {
            module_id: module.id.clone(),
            category: module.category,
        })
    }

    /// Resolves a drop into an `add_node` call.
    ///
    /// A payload that is malformed, references an unknown module, or carries
    /// a category that disagrees with the catalog entry is ignored: no node
    /// is created and `None` is returned.
    pub fn drop(
        &self,
        payload: &DragPayload,
        position: Position,
    ) -> Option<Node> {
        match self.place(payload, position) {
            Ok(node) => Some(node),
            Err(e) => {
                warn!("palette: drop ignored: {}", e);
                None
            }
        }
    }

    fn place(
        &self,
        payload: &DragPayload,
        position: Position,
    ) -> Result<Node> {
        let module = self.catalog.get_module(&payload.module_id)?;
        if module.category != payload.category {
            return Err(FlowcraftError::InvalidModule(format!(
                "payload category {} does not match module {}",
                payload.category.as_ref(),
                module.id
            )));
        }
        self.editor.add_node(module, position)
    }
}
