// Settings service
// Reads and writes the grid constants as settings.toml in the config directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::GridSettings;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory
    pub fn from_project_dirs() -> Self {
        Self::new(default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields the defaults; an unreadable or
    /// invalid one is an error.
    pub fn load(&self) -> Result<GridSettings> {
        if !self.path.exists() {
            log::debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(GridSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;

        let settings = GridSettings::from_toml(&content)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;

        Ok(settings)
    }

    /// Validate and write settings, creating the parent directory if needed
    pub fn save(&self, settings: &GridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }

        fs::write(&self.path, settings.to_toml())
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// `settings.toml` under the platform config directory, or the current
/// directory when none can be resolved
pub fn default_settings_path() -> PathBuf {
    match ProjectDirs::from("com", "TimetablePlanner", "TimetablePlanner") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILE_NAME),
        None => {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE_NAME)
        }
    }
}

/// Load settings, falling back to the defaults with a warning on any error
pub fn load_settings_or_default(service: &SettingsService) -> GridSettings {
    match service.load() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings: {:#}. Using defaults.", err);
            GridSettings::default()
        }
    }
}
