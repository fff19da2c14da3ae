//! haul.toml configuration parser.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default truck capacity in kilograms.
pub const DEFAULT_CAPACITY_KG: f64 = 5000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid haul.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaulConfig {
    pub packing: PackingConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Capacity shared by every truck. Checked by the packer, not here.
    pub capacity_kg: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            capacity_kg: DEFAULT_CAPACITY_KG,
        }
    }
}

/// Column names in the clustered pickup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub id_column: String,
    pub load_column: String,
    pub cluster_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id_column: "farmer_id".to_string(),
            load_column: "load_kg".to_string(),
            cluster_column: "cluster".to_string(),
        }
    }
}

impl HaulConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: HaulConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a haul.toml with every default spelled out.
    pub fn scaffold() -> Self {
        Self::default()
    }
}
