//! Render settings for prgview
//!
//! Settings are stored as JSON or TOML, picked by file extension, under the
//! platform config directory by default. Every field is optional in a file;
//! missing fields take their default values.

use prgview_core::PrgError;
use prgview_visualizer::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Directory created under the platform config dir
pub const CONFIG_DIR_NAME: &str = "prgview";
/// File name of the default config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by a path's extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(SettingsError::UnsupportedFormat(ext.to_string())),
            None => Err(SettingsError::UnsupportedFormat(format!(
                "{} has no extension, expected .json or .toml",
                path.display()
            ))),
        }
    }
}

/// Output settings for SVG rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Pixel width of the SVG element
    pub width: u32,
    /// Pixel height of the SVG element
    pub height: u32,
    /// Stroke width of printing paths in program units
    pub line_thickness: f64,
    /// Padding around the fitted bounding box in program units
    pub padding: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(RenderOptions::default())
    }
}

impl From<RenderOptions> for RenderSettings {
    fn from(options: RenderOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            line_thickness: options.line_thickness,
            padding: options.padding,
        }
    }
}

impl RenderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON or TOML file and validate them
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Validate and write settings, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Load from `path` if given, otherwise from the default location if a
    /// file exists there, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                debug!("No config file found, using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Check every value is in range
    pub fn validate(&self) -> SettingsResult<()> {
        self.to_render_options()
            .validate()
            .map_err(|err| match err {
                PrgError::InvalidOption { name, reason } => SettingsError::InvalidSetting {
                    key: name,
                    reason,
                },
                other => SettingsError::InvalidSetting {
                    key: "render".to_string(),
                    reason: other.to_string(),
                },
            })
    }

    pub fn to_render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            line_thickness: self.line_thickness,
            padding: self.padding,
        }
    }
}

/// Default config file location: `<config dir>/prgview/config.toml`
///
/// Returns `None` on platforms without a config or home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
