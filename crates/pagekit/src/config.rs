//! Page configuration

use pagekit_autosave::AutosaveConfig;
use pagekit_sidebar::SidebarOptions;
use pagekit_toggle::ToggleConfig;
use serde::Deserialize;

/// Which behaviours a page gets. `null` for `toggle` or `autosave` turns
/// that behaviour off; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toggle: Option<ToggleConfig>,
    pub autosave: Option<AutosaveConfig>,
    pub sidebars: Vec<SidebarBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toggle: Some(ToggleConfig::default()),
            autosave: Some(AutosaveConfig::default()),
            sidebars: Vec::new(),
        }
    }
}

/// Sidebar options for every element matching `container`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SidebarBinding {
    pub container: String,
    #[serde(default)]
    pub options: SidebarOptions,
}

impl SidebarBinding {
    pub fn new(container: &str, options: SidebarOptions) -> Self {
        Self {
            container: container.to_string(),
            options,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Nothing enabled
    pub fn empty() -> Self {
        Self {
            toggle: None,
            autosave: None,
            sidebars: Vec::new(),
        }
    }
}
