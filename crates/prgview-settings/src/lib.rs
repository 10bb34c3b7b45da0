//! prgview Settings Crate
//!
//! Render settings with JSON/TOML persistence and validation.

pub mod config;
pub mod error;

pub use config::{default_config_path, ConfigFormat, RenderSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
