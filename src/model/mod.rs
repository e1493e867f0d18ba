mod automation;
mod edge;
mod node;

pub use automation::AutomationModel;
pub use edge::EdgeModel;
pub use node::NodeModel;
