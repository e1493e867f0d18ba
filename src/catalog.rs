//! Module catalog - the palette of trigger, action, and filter modules.
//!
//! The catalog is an explicitly constructed, immutable registry. It is built
//! once at startup and passed by reference into the palette and the
//! inspector, which keeps tests free to substitute a fake catalog.

use serde::{Deserialize, Serialize};

use crate::{FlowcraftError, Result};

/// Category of a catalog module, mirrored onto nodes instantiated from it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModuleCategory {
    Trigger,
    Action,
    Filter,
}

/// Immutable catalog entry describing one module available on the palette.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModuleDefinition {
    /// Unique module id within the catalog.
    pub id: String,
    /// Display name, used as the default node label.
    pub name: String,
    /// Short description shown on the palette.
    pub desc: String,
    /// Symbolic icon identifier.
    pub icon: String,
    /// Module category.
    pub category: ModuleCategory,
}

impl ModuleDefinition {
    pub fn new(
        id: &str,
        name: &str,
        desc: &str,
        icon: &str,
        category: ModuleCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            desc: desc.to_string(),
            icon: icon.to_string(),
            category,
        }
    }
}

/// Read-only registry of module definitions.
pub struct ModuleCatalog {
    modules: Vec<ModuleDefinition>,
}

impl ModuleCatalog {
    /// Creates a catalog from the given definitions.
    ///
    /// Fails with `InvalidModule` when two definitions share an id.
    pub fn new(modules: Vec<ModuleDefinition>) -> Result<Self> {
        for (i, module) in modules.iter().enumerate() {
            if modules.iter().skip(i + 1).any(|m| m.id == module.id) {
                return Err(FlowcraftError::InvalidModule(format!("duplicate module id: {}", module.id)));
            }
        }
        Ok(Self {
            modules,
        })
    }

    /// The stock palette shipped with the flow builder.
    pub fn builtin() -> Self {
        Self {
            modules: vec![
                ModuleDefinition::new("webhook", "Webhook", "Start when a webhook is received", "webhook", ModuleCategory::Trigger),
                ModuleDefinition::new("schedule", "Schedule", "Start on a recurring schedule", "clock", ModuleCategory::Trigger),
                ModuleDefinition::new("email", "Send Email", "Send an email to a recipient", "mail", ModuleCategory::Action),
                ModuleDefinition::new("http", "HTTP Request", "Call an external HTTP endpoint", "globe", ModuleCategory::Action),
                ModuleDefinition::new("filter", "Filter", "Continue only when a condition matches", "filter", ModuleCategory::Filter),
            ],
        }
    }

    /// Lists modules, optionally restricted to one category.
    pub fn list_modules(
        &self,
        category: Option<ModuleCategory>,
    ) -> Vec<&ModuleDefinition> {
        self.modules.iter().filter(|m| category.is_none_or(|c| m.category == c)).collect()
    }

    /// Looks up a module by id.
    pub fn get_module(
        &self,
        id: &str,
    ) -> Result<&ModuleDefinition> {
        self.modules.iter().find(|m| m.id == id).ok_or(FlowcraftError::ModuleNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_categories() {
        let catalog = ModuleCatalog::builtin();
        assert_eq!(catalog.list_modules(None).len(), 5);
        assert_eq!(catalog.list_modules(Some(ModuleCategory::Trigger)).len(), 2);
        assert_eq!(catalog.list_modules(Some(ModuleCategory::Action)).len(), 2);
        assert_eq!(catalog.list_modules(Some(ModuleCategory::Filter)).len(), 1);
    }

    #[test]
    fn test_get_module() {
        let catalog = ModuleCatalog::builtin();
        let module = catalog.get_module("webhook").unwrap();
        assert_eq!(module.name, "Webhook");
        assert_eq!(module.category, ModuleCategory::Trigger);
    }

    #[test]
    fn test_get_module_not_found() {
        let catalog = ModuleCatalog::builtin();
        let err = catalog.get_module("missing").unwrap_err();
        assert_eq!(err, FlowcraftError::ModuleNotFound("missing".to_string()));
    }

    #[test]
    fn test_duplicate_module_id_rejected() {
        let modules = vec![
            ModuleDefinition::new("email", "Send Email", "", "mail", ModuleCategory::Action),
            ModuleDefinition::new("email", "Send Email v2", "", "mail", ModuleCategory::Action),
        ];
        assert!(ModuleCatalog::new(modules).is_err());
    }
}
