//! Global monthcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::persistence::{FileSlot, DEFAULT_SLOT_NAME};

static DEFAULT_DATA_DIR: &str = "~/.local/share/monthcal";
static DEFAULT_EXPORT_DIR: &str = ".";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_slot_name() -> String {
    DEFAULT_SLOT_NAME.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Configuration at ~/.config/monthcal/config.toml
///
/// Every key can also be set through a `MONTHCAL_` environment variable,
/// e.g. `MONTHCAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the events slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Slot name; events live in `<data_dir>/<slot_name>.json`
    #[serde(default = "default_slot_name")]
    pub slot_name: String,

    /// Where `export` writes month files
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            slot_name: default_slot_name(),
            export_dir: default_export_dir(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("monthcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file
    /// there first if none exists.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file. Missing files fall back to defaults.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("MONTHCAL"))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        expand(&self.export_dir)
    }

    /// The file slot holding the events.
    pub fn slot(&self) -> FileSlot {
        FileSlot::in_dir(&self.data_path(), &self.slot_name)
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> CalendarResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# monthcal configuration

# Where events are stored:
# data_dir = \"{}\"

# Name of the events file inside data_dir (without .json):
# slot_name = \"{}\"

# Where month exports are written:
# export_dir = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_SLOT_NAME, DEFAULT_EXPORT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
