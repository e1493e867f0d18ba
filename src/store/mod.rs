//! Storage layer for persisting authored automations.
//!
//! Provides an abstraction over different storage backends:
//! - `MemStore`: In-memory storage for testing
//! - `FileStore`: One JSON document per automation on disk
//!
//! The store is an external collaborator from the editor's point of view: it
//! receives the full `{nodes, edges, name}` snapshot on save and hands back a
//! whole model on load. Store failures never touch the in-memory graph.

mod file;
mod mem;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{FlowcraftError, Result, model::AutomationModel, utils};

pub use file::FileStore;
pub use mem::MemStore;

/// Stored record of one automation.
///
/// `data` holds the serialized `AutomationModel`; name is duplicated for
/// listing without parsing the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationRecord {
    pub id: String,
    pub name: String,
    /// JSON text of the full automation model.
    pub data: String,
    /// Creation time in epoch millis.
    pub create_time: i64,
    /// Last update time in epoch millis; 0 until the first update.
    pub update_time: i64,
}

/// Trait for automation collection operations.
pub trait AutomationCollection: Send + Sync {
    /// Checks if a record with the given ID exists.
    fn exists(
        &self,
        id: &str,
    ) -> Result<bool>;

    /// Finds a record by ID.
    fn find(
        &self,
        id: &str,
    ) -> Result<AutomationRecord>;

    /// Lists all records.
    fn list(&self) -> Result<Vec<AutomationRecord>>;

    /// Creates a new record.
    fn create(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool>;

    /// Updates an existing record.
    fn update(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool>;

    /// Deletes a record by ID.
    fn delete(
        &self,
        id: &str,
    ) -> Result<bool>;
}

/// Persistence adapter over an automation collection.
pub struct Store {
    automations: Box<dyn AutomationCollection>,
}

impl Store {
    pub fn new(automations: Box<dyn AutomationCollection>) -> Self {
        Self {
            automations,
        }
    }

    /// Upserts the full snapshot of one automation.
    pub fn save(
        &self,
        model: &AutomationModel,
    ) -> Result<bool> {
        trace!("store::save({})", model.id);
        if model.id.is_empty() {
            return Err(FlowcraftError::Store("missing id in automation".into()));
        }
        let text = serde_json::to_string(model)?;
        match self.automations.find(&model.id) {
            Ok(m) => {
                let data = AutomationRecord {
                    id: model.id.clone(),
                    name: model.name.clone(),
                    data: text,
                    create_time: m.create_time,
                    update_time: utils::time::time_millis(),
                };
                self.automations.update(&data)
            }
            Err(_) => {
                let data = AutomationRecord {
                    id: model.id.clone(),
                    name: model.name.clone(),
                    data: text,
                    create_time: utils::time::time_millis(),
                    update_time: 0,
                };
                self.automations.create(&data)
            }
        }
    }

    /// Loads the full snapshot of one automation.
    pub fn load(
        &self,
        id: &str,
    ) -> Result<AutomationModel> {
        trace!("store::load({})", id);
        let record = self.automations.find(id).map_err(|_| FlowcraftError::AutomationNotFound(id.to_string()))?;
        AutomationModel::from_json(&record.data)
    }

    /// Deletes one automation. Returns false when it was absent.
    pub fn remove(
        &self,
        id: &str,
    ) -> Result<bool> {
        trace!("store::remove({})", id);
        self.automations.delete(id)
    }

    /// Lists stored automations (id, name), most recently created last.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let mut records = self.automations.list()?;
        records.sort_by_key(|r| r.create_time);
        Ok(records.into_iter().map(|r| (r.id, r.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphEditor, ModuleCatalog, Position};

    fn store() -> Store {
        Store::new(Box::new(MemStore::new()))
    }

    fn sample_model(id: &str) -> AutomationModel {
        let catalog = ModuleCatalog::builtin();
        let editor = GraphEditor::new("Onboarding");
        let a = editor.add_node(catalog.get_module("webhook").unwrap(), Position::new(250.0, 100.0)).unwrap();
        let b = editor.add_node(catalog.get_module("email").unwrap(), Position::new(250.0, 260.0)).unwrap();
        editor.update_node_field(&b.id, "subject", "Welcome!").unwrap();
        editor.connect(&a.id, &b.id).unwrap();
        editor.graph().to_model(id)
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = store();
        let model = sample_model("auto-1");
        assert!(store.save(&model).unwrap());

        let loaded = store.load("auto-1").unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_save_twice_updates() {
        let store = store();
        let mut model = sample_model("auto-1");
        store.save(&model).unwrap();

        model.name = "Onboarding v2".to_string();
        assert!(store.save(&model).unwrap());
        assert_eq!(store.load("auto-1").unwrap().name, "Onboarding v2");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_save_missing_id() {
        let store = store();
        let mut model = sample_model("auto-1");
        model.id = String::new();
        assert!(store.save(&model).is_err());
    }

    #[test]
    fn test_load_missing_automation() {
        let store = store();
        let err = store.load("nope").unwrap_err();
        assert_eq!(err, FlowcraftError::AutomationNotFound("nope".to_string()));
    }

    #[test]
    fn test_remove() {
        let store = store();
        store.save(&sample_model("auto-1")).unwrap();
        assert!(store.remove("auto-1").unwrap());
        assert!(!store.remove("auto-1").unwrap());
        assert!(store.load("auto-1").is_err());
    }
}
