use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    FlowcraftError, Result,
    store::{FileStore, MemStore, Store},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// store config
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// store type
    #[serde(default)]
    pub store_type: StoreType,
    /// file store config
    pub file: Option<FileConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Mem,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// directory holding one JSON document per automation
    pub path: String,
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<Config>(toml_str).map_err(|e| FlowcraftError::Config(e.to_string()))
    }

    /// Builds the configured store backend.
    pub fn open_store(&self) -> Result<Store> {
        match self.store.store_type {
            StoreType::Mem => Ok(Store::new(Box::new(MemStore::new()))),
            StoreType::File => {
                let file = self.store.file.as_ref().ok_or(FlowcraftError::Config("file store requires [store.file] path".to_string()))?;
                Ok(Store::new(Box::new(FileStore::new(&file.path)?)))
            }
        }
    }
}
