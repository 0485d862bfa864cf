//! Global configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{TodayError, TodayResult};

static DEFAULT_STORE: &str = "ics";

fn default_store() -> String {
    DEFAULT_STORE.to_string()
}

fn is_default_store(s: &String) -> bool {
    s == DEFAULT_STORE
}

/// Global configuration at ~/.config/today/config.toml
///
/// Backend-specific configuration lives with each backend (under
/// ~/.config/today/stores/) instead.
#[derive(Serialize, Deserialize, Clone)]
pub struct TodayConfig {
    /// Which store backend to query (a `today-store-<name>` executable
    /// on PATH).
    #[serde(default = "default_store", skip_serializing_if = "is_default_store")]
    pub store: String,
}

impl Default for TodayConfig {
    fn default() -> Self {
        TodayConfig {
            store: default_store(),
        }
    }
}

impl TodayConfig {
    pub fn load() -> TodayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: TodayConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| TodayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TodayError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn config_path() -> TodayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TodayError::Config("Could not determine config directory".into()))?
            .join("today");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TodayResult<()> {
        let contents = format!(
            "\
# today configuration

# Which calendar store backend to query.
# Backends are `today-store-<name>` executables on your PATH.
# store = \"{}\"
",
            DEFAULT_STORE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TodayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TodayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
