//! Backend configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};
use today_core::{TodayError, TodayResult};

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

/// Backend configuration at ~/.config/today/stores/ics.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,
}

impl StoreConfig {
    pub fn load() -> TodayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: StoreConfig = Config::builder()
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
            .join("today")
            .join("stores");

        Ok(config_dir.join("ics.toml"))
    }

    /// The calendar directory with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TodayResult<()> {
        let contents = format!(
            "\
# today-store-ics configuration

# Where your .ics files live:
# calendar_dir = \"{}\"
",
            DEFAULT_CALENDAR_DIR
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
