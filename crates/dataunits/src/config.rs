//! Configuration management for dataunits.
//!
//! Configuration lives in a YAML file (`dataunits.yaml` by default). Every
//! section is optional; missing keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dataunits.yaml";

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataUnitsConfig {
    /// Engine options
    #[serde(default)]
    pub engine: EngineConfig,

    /// CLI output options
    #[serde(default)]
    pub output: OutputSettings,
}

/// Options applied by [`crate::engine::Engine`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Collapse repeated references to the same unit into one edge
    #[serde(default = "default_true")]
    pub dedupe_dependencies: bool,

    /// Validate filter-logic expressions along with references
    #[serde(default)]
    pub check_filter_logic: bool,
}

/// Output section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputSettings {
    /// Colorize terminal output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dedupe_dependencies: true,
            check_filter_logic: false,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl DataUnitsConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Config`] if it
    /// cannot be parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration if the file exists, defaults otherwise
    ///
    /// # Errors
    ///
    /// As [`DataUnitsConfig::load`] when the file exists.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on serialization failure, [`Error::Io`] on write failure.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}
