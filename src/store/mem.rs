//! In-memory automation storage, used for tests and as the default backend.

use std::collections::HashMap;

use crate::{
    FlowcraftError, Result, ShareLock,
    store::{AutomationCollection, AutomationRecord},
};

#[derive(Debug, Clone, Default)]
pub struct MemStore {
    automations: ShareLock<HashMap<String, AutomationRecord>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AutomationCollection for MemStore {
    fn exists(
        &self,
        id: &str,
    ) -> Result<bool> {
        let automations = self.automations.read().unwrap();
        Ok(automations.contains_key(id))
    }

    fn find(
        &self,
        id: &str,
    ) -> Result<AutomationRecord> {
        let automations = self.automations.read().unwrap();
        automations.get(id).cloned().ok_or(FlowcraftError::Store(format!("record not found: {}", id)))
    }

    fn list(&self) -> Result<Vec<AutomationRecord>> {
        let automations = self.automations.read().unwrap();
        Ok(automations.values().cloned().collect())
    }

    fn create(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool> {
        let mut automations = self.automations.write().unwrap();
        if automations.contains_key(&data.id) {
            return Err(FlowcraftError::Store(format!("record already exists: {}", data.id)));
        }
        automations.insert(data.id.clone(), data.clone());
        Ok(true)
    }

    fn update(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool> {
        let mut automations = self.automations.write().unwrap();
        if !automations.contains_key(&data.id) {
            return Err(FlowcraftError::Store(format!("record not found: {}", data.id)));
        }
        automations.insert(data.id.clone(), data.clone());
        Ok(true)
    }

    fn delete(
        &self,
        id: &str,
    ) -> Result<bool> {
        let mut automations = self.automations.write().unwrap();
        Ok(automations.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AutomationRecord {
        AutomationRecord {
            id: id.to_string(),
            name: "Test".to_string(),
            data: "{}".to_string(),
            create_time: 1,
            update_time: 0,
        }
    }

    #[test]
    fn test_create_find_delete() {
        let store = MemStore::new();
        assert!(store.create(&record("a")).unwrap());
        assert!(store.exists("a").unwrap());
        assert_eq!(store.find("a").unwrap().name, "Test");
        assert!(store.delete("a").unwrap());
        assert!(!store.exists("a").unwrap());
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let store = MemStore::new();
        store.create(&record("a")).unwrap();
        assert!(store.create(&record("a")).is_err());
    }

    #[test]
    fn test_update_missing_rejected() {
        let store = MemStore::new();
        assert!(store.update(&record("a")).is_err());
    }
}
