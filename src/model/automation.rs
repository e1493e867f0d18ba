use serde::{Deserialize, Serialize};

use crate::{
    FlowcraftError, Result,
    model::{EdgeModel, NodeModel},
};

/// Persistence model of one automation: the full `{nodes, edges, name}`
/// snapshot saved and loaded as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AutomationModel {
    pub id: String,
    pub name: String,
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

impl AutomationModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let automation = serde_json::from_str::<AutomationModel>(s);
        match automation {
            Ok(v) => Ok(v),
            Err(e) => Err(FlowcraftError::Convert(format!("{}", e))),
        }
    }
}
