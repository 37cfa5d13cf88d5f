//! TOML file helpers for configuration types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Parses a configuration value from a TOML string.
pub fn from_toml_str<T: DeserializeOwned>(toml: &str) -> ConfigResult<T> {
    Ok(toml::from_str(toml)?)
}

/// Serializes a configuration value to a pretty TOML string.
pub fn to_toml_string<T: Serialize>(value: &T) -> ConfigResult<String> {
    Ok(toml::to_string_pretty(value)?)
}

/// Reads and parses a TOML file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path)?;
    let value = from_toml_str(&contents)?;
    info!("Configuration loaded from {:?}", path);
    Ok(value)
}

/// Serializes a value and writes it to a TOML file, creating parent
/// directories as needed.
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml = to_toml_string(value)?;
    fs::write(path, toml)?;
    debug!("Configuration saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        slots: u32,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("sample.toml");
        let sample = Sample {
            name: "pack".to_string(),
            slots: 12,
        };

        write_toml(&path, &sample).expect("write");
        let loaded: Sample = read_toml(&path).expect("read");
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result: ConfigResult<Sample> = read_toml(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_error() {
        let result: ConfigResult<Sample> = from_toml_str("name = ");
        assert!(matches!(result, Err(ConfigError::TomlDeserialize(_))));
    }
}
