//! Node definitions for the authoring graph.
//!
//! A node is a placed instance of a catalog module. Its configuration is a
//! tagged sum type over the module sub-type, so the set of recognized fields
//! for each node is an exhaustive match rather than a stringly-typed lookup.

use serde::{Deserialize, Serialize};

use crate::{FlowcraftError, ModuleCategory, Result};

/// Unique identifier for a node within a graph.
pub type NodeId = String;

/// Kind of a placed node, mirroring the category of its originating module.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Trigger,
    Action,
    Filter,
}

impl From<ModuleCategory> for NodeKind {
    fn from(category: ModuleCategory) -> Self {
        match category {
            ModuleCategory::Trigger => NodeKind::Trigger,
            ModuleCategory::Action => NodeKind::Action,
            ModuleCategory::Filter => NodeKind::Filter,
        }
    }
}

/// Canvas coordinates of a node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Webhook trigger configuration.
///
/// Carries no stored fields; the inbound URL is derived from the node id and
/// surfaced by the inspector as a read-only field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WebhookConfig {}

/// Schedule trigger configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScheduleConfig {
    /// Cron expression describing when the automation fires.
    #[serde(default)]
    pub cron: String,
}

/// Email action configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EmailConfig {
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// HTTP request action configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HttpConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub payload: String,
}

/// Filter configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub comparison_value: String,
}

/// Kind-dependent configuration of a node, tagged by module sub-type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum NodeConfig {
    Webhook(WebhookConfig),
    Schedule(ScheduleConfig),
    Email(EmailConfig),
    Http(HttpConfig),
    Filter(FilterConfig),
}

impl NodeConfig {
    /// Creates the empty configuration for a module id.
    ///
    /// The set of configurable modules is closed; an id outside it cannot be
    /// placed on the canvas.
    pub fn for_module(module_id: &str) -> Result<Self> {
        match module_id {
            "webhook" => Ok(NodeConfig::Webhook(WebhookConfig::default())),
            "schedule" => Ok(NodeConfig::Schedule(ScheduleConfig::default())),
            "email" => Ok(NodeConfig::Email(EmailConfig::default())),
            "http" => Ok(NodeConfig::Http(HttpConfig::default())),
            "filter" => Ok(NodeConfig::Filter(FilterConfig::default())),
            other => Err(FlowcraftError::InvalidModule(format!("no configuration schema for module: {}", other))),
        }
    }

    /// Module sub-type tag of this configuration.
    pub fn module(&self) -> &str {
        match self {
            NodeConfig::Webhook(_) => "webhook",
            NodeConfig::Schedule(_) => "schedule",
            NodeConfig::Email(_) => "email",
            NodeConfig::Http(_) => "http",
            NodeConfig::Filter(_) => "filter",
        }
    }

    /// True when every stored field is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            NodeConfig::Webhook(_) => true,
            NodeConfig::Schedule(c) => c.cron.is_empty(),
            NodeConfig::Email(c) => c.recipient.is_empty() && c.subject.is_empty() && c.body.is_empty(),
            NodeConfig::Http(c) => c.url.is_empty() && c.method.is_empty() && c.payload.is_empty(),
            NodeConfig::Filter(c) => c.condition.is_empty() && c.comparison_value.is_empty(),
        }
    }

    /// Writes one recognized field, preserving all others.
    ///
    /// Fails with `InvalidOperation` before any write when `key` is not a
    /// recognized field of this variant.
    pub fn set_field(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<()> {
        match (self, key) {
            (NodeConfig::Schedule(c), "cron") => c.cron = value.to_string(),
            (NodeConfig::Email(c), "recipient") => c.recipient = value.to_string(),
            (NodeConfig::Email(c), "subject") => c.subject = value.to_string(),
            (NodeConfig::Email(c), "body") => c.body = value.to_string(),
            (NodeConfig::Http(c), "url") => c.url = value.to_string(),
            (NodeConfig::Http(c), "method") => c.method = value.to_string(),
            (NodeConfig::Http(c), "payload") => c.payload = value.to_string(),
            (NodeConfig::Filter(c), "condition") => c.condition = value.to_string(),
            (NodeConfig::Filter(c), "comparison_value") => c.comparison_value = value.to_string(),
            (config, key) => {
                return Err(FlowcraftError::InvalidOperation(format!("unknown field '{}' for module '{}'", key, config.module())));
            }
        }
        Ok(())
    }

    /// Reads one recognized field.
    pub fn get_field(
        &self,
        key: &str,
    ) -> Option<&str> {
        match (self, key) {
            (NodeConfig::Schedule(c), "cron") => Some(&c.cron),
            (NodeConfig::Email(c), "recipient") => Some(&c.recipient),
            (NodeConfig::Email(c), "subject") => Some(&c.subject),
            (NodeConfig::Email(c), "body") => Some(&c.body),
            (NodeConfig::Http(c), "url") => Some(&c.url),
            (NodeConfig::Http(c), "method") => Some(&c.method),
            (NodeConfig::Http(c), "payload") => Some(&c.payload),
            (NodeConfig::Filter(c), "condition") => Some(&c.condition),
            (NodeConfig::Filter(c), "comparison_value") => Some(&c.comparison_value),
            _ => None,
        }
    }
}

/// A placed, configured instance of a module on the canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique node id within the graph.
    pub id: NodeId,
    /// Node kind, copied from the originating module's category.
    pub kind: NodeKind,
    /// Canvas position, mutated by drag.
    pub position: Position,
    /// User-editable display name, defaults to the module name.
    pub label: String,
    /// Module-specific configuration.
    pub config: NodeConfig,
}
