//! Selection-bound property panel backing.
//!
//! The inspector resolves the currently selected node, renders a field set
//! determined by the node's config variant, and routes field edits back
//! through the mutation engine. The field schema is a static table keyed by
//! variant, so the recognized keys are an exhaustive match rather than a
//! stringly-typed lookup.

use tracing::trace;

use crate::{
    FlowcraftError, Result,
    catalog::{ModuleCatalog, ModuleDefinition},
    editor::GraphEditor,
    graph::{Node, NodeConfig, NodeId},
};

/// Base URL for derived webhook endpoints.
const WEBHOOK_BASE_URL: &str = "https://hooks.flowcraft.dev/automations";

/// Input control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text,
    TextArea,
    Select,
    /// Read-only, computed from the node rather than stored.
    Derived,
}

/// One row of the inspector's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Config key routed through `update_node_field`.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    pub control: Control,
}

/// A field together with its current value for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub spec: FieldSpec,
    pub value: String,
}

/// Resolved view of the selected node.
#[derive(Debug, Clone)]
pub struct InspectorView {
    /// The inspected node.
    pub node: Node,
    /// Catalog entry the node was instantiated from, when still registered.
    pub module: Option<ModuleDefinition>,
    /// Editable label shown above the field set.
    pub label: String,
    /// Field rows in render order.
    pub fields: Vec<FieldValue>,
}

const WEBHOOK_FIELDS: &[FieldSpec] = &[FieldSpec {
    key: "url",
    label: "Webhook URL",
    control: Control::Derived,
}];

const SCHEDULE_FIELDS: &[FieldSpec] = &[FieldSpec {
    key: "cron",
    label: "Schedule",
    control: Control::Text,
}];

const EMAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "recipient",
        label: "Recipient",
        control: Control::Text,
    },
    FieldSpec {
        key: "subject",
        label: "Subject",
        control: Control::Text,
    },
    FieldSpec {
        key: "body",
        label: "Body",
        control: Control::TextArea,
    },
];

const HTTP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "url",
        label: "URL",
        control: Control::Text,
    },
    FieldSpec {
        key: "method",
        label: "Method",
        control: Control::Select,
    },
    FieldSpec {
        key: "payload",
        label: "Payload",
        control: Control::TextArea,
    },
];

const FILTER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "condition",
        label: "Condition",
        control: Control::Select,
    },
    FieldSpec {
        key: "comparison_value",
        label: "Comparison value",
        control: Control::Text,
    },
];

/// Field rows recognized for a config variant.
pub fn field_schema(config: &NodeConfig) -> &'static [FieldSpec] {
    match config {
        NodeConfig::Webhook(_) => WEBHOOK_FIELDS,
        NodeConfig::Schedule(_) => SCHEDULE_FIELDS,
        NodeConfig::Email(_) => EMAIL_FIELDS,
        NodeConfig::Http(_) => HTTP_FIELDS,
        NodeConfig::Filter(_) => FILTER_FIELDS,
    }
}

/// Inbound URL of a webhook trigger node.
pub fn webhook_url(id: &NodeId) -> String {
    format!("{}/{}", WEBHOOK_BASE_URL, id)
}

/// Property panel bound to the editor's selection.
pub struct Inspector<'a> {
    catalog: &'a ModuleCatalog,
    editor: &'a GraphEditor,
}

impl<'a> Inspector<'a> {
    pub fn new(
        catalog: &'a ModuleCatalog,
        editor: &'a GraphEditor,
    ) -> Self {
        Self {
            catalog,
            editor,
        }
    }

    /// Resolves the selected node into a renderable view.
    ///
    /// Returns `None` when nothing is selected. A selected node that has
    /// vanished from the graph (deleted while selected from another panel)
    /// reverts the selection and also yields `None`.
    pub fn inspect(&self) -> Option<InspectorView> {
        let id = self.editor.selected()?;
        let Some(node) = self.editor.graph().get_node(&id) else {
            trace!("inspector: selected node {} vanished", id);
            self.editor.clear_selection();
            return None;
        };

        let fields = field_schema(&node.config)
            .iter()
            .map(|spec| FieldValue {
                spec: *spec,
                value: match spec.control {
                    Control::Derived => webhook_url(&node.id),
                    _ => node.config.get_field(spec.key).unwrap_or_default().to_string(),
                },
            })
            .collect();

        Some(InspectorView {
            module: self.catalog.get_module(node.config.module()).ok().cloned(),
            label: node.label.clone(),
            fields,
            node,
        })
    }

    /// Routes one field edit to the mutation engine.
    ///
    /// Derived fields are read-only and rejected with `InvalidOperation`.
    pub fn edit_field(
        &self,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let id = self.editor.selected().ok_or(FlowcraftError::InvalidOperation("no node selected".to_string()))?;
        if let Some(node) = self.editor.graph().get_node(&id)
            && field_schema(&node.config).iter().any(|spec| spec.key == key && spec.control == Control::Derived)
        {
            return Err(FlowcraftError::InvalidOperation(format!("field '{}' is read-only", key)));
        }
        self.editor.update_node_field(&id, key, value)
    }
}
