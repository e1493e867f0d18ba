//! File-backed automation storage: one JSON document per automation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    FlowcraftError, Result,
    store::{AutomationCollection, AutomationRecord},
};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a file store rooted at `dir`, creating the directory if needed.
    pub fn new<T: AsRef<Path>>(dir: T) -> Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path_of(
        &self,
        id: &str,
    ) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn write(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool> {
        let text = serde_json::to_string_pretty(data)?;
        fs::write(self.path_of(&data.id), text)?;
        Ok(true)
    }
}

impl AutomationCollection for FileStore {
    fn exists(
        &self,
        id: &str,
    ) -> Result<bool> {
        Ok(self.path_of(id).is_file())
    }

    fn find(
        &self,
        id: &str,
    ) -> Result<AutomationRecord> {
        let path = self.path_of(id);
        if !path.is_file() {
            return Err(FlowcraftError::Store(format!("record not found: {}", id)));
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| FlowcraftError::Store(format!("corrupt record {}: {}", id, e)))
    }

    fn list(&self) -> Result<Vec<AutomationRecord>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                records.push(self.find(stem)?);
            }
        }
        Ok(records)
    }

    fn create(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool> {
        if self.exists(&data.id)? {
            return Err(FlowcraftError::Store(format!("record already exists: {}", data.id)));
        }
        self.write(data)
    }

    fn update(
        &self,
        data: &AutomationRecord,
    ) -> Result<bool> {
        if !self.exists(&data.id)? {
            return Err(FlowcraftError::Store(format!("record not found: {}", data.id)));
        }
        self.write(data)
    }

    fn delete(
        &self,
        id: &str,
    ) -> Result<bool> {
        let path = self.path_of(id);
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}
