//! User settings
//!
//! Read from `<config dir>/roi-tracker/config.toml` when present, then
//! overridden by `ROI_TRACKER_*` environment variables. Every field has a
//! default, so a missing file is not an error.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::export::DEFAULT_REPORT_NAME;

pub const ENV_CONFIG: &str = "ROI_TRACKER_CONFIG";
pub const ENV_OUTPUT: &str = "ROI_TRACKER_OUTPUT";
pub const ENV_PERCENT_DECIMALS: &str = "ROI_TRACKER_PERCENT_DECIMALS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where `report` writes the workbook
    pub output: PathBuf,
    /// Decimals shown for ROI percentages in terminal output
    pub percent_decimals: usize,
    /// chrono format for dates in terminal output
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: PathBuf::from(DEFAULT_REPORT_NAME),
            percent_decimals: 2,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Default config file location
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }
    dir_spec::config_home().map(|dir| dir.join("roi-tracker").join("config.toml"))
}

/// Load settings from the default location plus environment overrides
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = match config_path() {
        Some(path) => load_settings_from(&path)?,
        None => Settings::default(),
    };
    apply_env_overrides(settings, |var| std::env::var(var).ok())
}

/// Load settings from a TOML file; a missing file yields defaults
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&text)?;
    if StrftimeItems::new(&settings.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::DateFormat(settings.date_format));
    }
    debug!("Loaded settings from {:?}: {:?}", path, settings);
    Ok(settings)
}

/// Apply `ROI_TRACKER_*` overrides looked up through `lookup`
pub fn apply_env_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(output) = lookup(ENV_OUTPUT).filter(|v| !v.trim().is_empty()) {
        settings.output = PathBuf::from(output);
    }
    if let Some(value) = lookup(ENV_PERCENT_DECIMALS) {
        settings.percent_decimals = value.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_PERCENT_DECIMALS,
            value,
        })?;
    }
    Ok(settings)
}
