//! Inventory configuration.
//!
//! Settings are plain serde data so they can live in a TOML file next to the
//! rest of an application's configuration:
//!
//! ```toml
//! version = 1
//! arena_capacity = 256
//! children_capacity = 15
//! log_mutations = false
//! ```

use pathminder_common::config::{from_toml_str, read_toml, to_toml_string, write_toml};
use pathminder_common::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for the arena pre-allocation.
pub const MAX_ARENA_CAPACITY: usize = 1 << 20;

/// Upper bound for per-container child pre-allocation.
pub const MAX_CHILDREN_CAPACITY: usize = 4096;

/// Tuning knobs for an [`Inventory`](crate::Inventory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Config format version.
    pub version: u32,
    /// Item slots pre-allocated in the arena.
    pub arena_capacity: usize,
    /// Direct-child slots pre-allocated per container.
    pub children_capacity: usize,
    /// Emit a debug event for every structural mutation.
    pub log_mutations: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            version: 1,
            arena_capacity: 64,
            children_capacity: 15,
            log_mutations: true,
        }
    }
}

impl InventoryConfig {
    /// Clamps all values into their supported ranges.
    pub fn validate(&mut self) {
        self.arena_capacity = self.arena_capacity.min(MAX_ARENA_CAPACITY);
        self.children_capacity = self.children_capacity.min(MAX_CHILDREN_CAPACITY);
    }

    /// Serializes to TOML string.
    pub fn to_toml(&self) -> ConfigResult<String> {
        to_toml_string(self)
    }

    /// Deserializes from TOML string. Missing keys take their defaults.
    pub fn from_toml(toml: &str) -> ConfigResult<Self> {
        let mut config: Self = from_toml_str(toml)?;
        config.validate();
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut config: Self = read_toml(path)?;
        config.validate();
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        write_toml(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathminder_common::ConfigError;

    #[test]
    fn test_config_default() {
        let config = InventoryConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.children_capacity, 15);
        assert!(config.log_mutations);
    }

    #[test]
    fn test_config_partial_toml() {
        let config = InventoryConfig::from_toml("log_mutations = false\n").expect("parse");
        assert!(!config.log_mutations);
        assert_eq!(config.arena_capacity, 64);
    }

    #[test]
    fn test_config_validate_clamps() {
        let toml = "arena_capacity = 99999999\nchildren_capacity = 99999\n";
        let config = InventoryConfig::from_toml(toml).expect("parse");
        assert_eq!(config.arena_capacity, MAX_ARENA_CAPACITY);
        assert_eq!(config.children_capacity, MAX_CHILDREN_CAPACITY);
    }

    #[test]
    fn test_config_bad_type() {
        let result = InventoryConfig::from_toml("arena_capacity = \"lots\"\n");
        assert!(matches!(result, Err(ConfigError::TomlDeserialize(_))));
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("inventory.toml");

        let config = InventoryConfig {
            arena_capacity: 512,
            log_mutations: false,
            ..InventoryConfig::default()
        };
        config.save(&path).expect("save");

        let loaded = InventoryConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }
}
