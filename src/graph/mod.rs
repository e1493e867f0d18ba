mod edge;
#[allow(clippy::module_inception)]
mod graph;
mod node;

pub use edge::{Edge, EdgeId};
pub use graph::{Connections, Graph, GraphSnapshot};
pub use node::{EmailConfig, FilterConfig, HttpConfig, Node, NodeConfig, NodeId, NodeKind, Position, ScheduleConfig, WebhookConfig};
