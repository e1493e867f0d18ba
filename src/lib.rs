//! # Flowcraft
//!
//! Flowcraft is an embeddable authoring engine for automation workflow
//! graphs. It owns the node/edge graph a visual flow builder edits: module
//! palette, node placement, connections, per-node configuration, and
//! persistence of the authored automation.
//!
//! ## Core Features
//!
//! - **Single mutation path**: every graph change goes through `GraphEditor`,
//!   so structural invariants are enforced in one place
//! - **Typed configuration**: per-module config is a tagged sum type with an
//!   explicit field schema, not a stringly-typed bag
//! - **Pluggable storage**: in-memory storage (testing) and file-backed
//!   storage behind a collection trait
//! - **Snapshot outbound**: every successful mutation hands subscribers the
//!   full `{nodes, edges}` snapshot for re-rendering
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowcraft::{GraphEditor, ModuleCatalog, Palette, Position};
//!
//! let catalog = ModuleCatalog::builtin();
//! let editor = GraphEditor::new("My automation");
//! let palette = Palette::new(&catalog, &editor);
//!
//! let payload = palette.begin_drag("webhook")?;
//! let node = palette.drop(&payload, Position::new(250.0, 100.0));
//! ```

mod catalog;
mod config;
mod editor;
mod error;
mod events;
mod graph;
mod inspector;
mod model;
mod palette;
mod session;
mod store;
mod utils;

use std::sync::{Arc, RwLock};

pub use catalog::{ModuleCatalog, ModuleCategory, ModuleDefinition};
pub use config::{Config, FileConfig, StoreConfig, StoreType};
pub use editor::GraphEditor;
pub use error::FlowcraftError;
pub use events::{ChangeEvent, ChangeHandle, ChangeMessage};
pub use graph::{
    Connections, Edge, EdgeId, EmailConfig, FilterConfig, Graph, GraphSnapshot, HttpConfig, Node, NodeConfig, NodeId, NodeKind, Position,
    ScheduleConfig, WebhookConfig,
};
pub use inspector::{Control, FieldSpec, FieldValue, Inspector, InspectorView, field_schema, webhook_url};
pub use model::{AutomationModel, EdgeModel, NodeModel};
pub use palette::{DragPayload, Palette};
pub use session::{LoadTicket, Session};
pub use store::{AutomationCollection, AutomationRecord, FileStore, MemStore, Store};

/// Result type alias for Flowcraft operations.
pub type Result<T> = std::result::Result<T, FlowcraftError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
