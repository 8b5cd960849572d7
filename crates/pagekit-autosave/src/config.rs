//! Autosave configuration

use serde::Deserialize;

/// Autosave options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Cookie that holds the saved values
    pub cookie_name: String,
    /// Quiet period after the last keystroke before saving
    pub save_delay_ms: u64,
    /// How long a saved cookie lives
    pub lifetime_days: u64,
    /// Question asked before restoring
    pub restore_prompt: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            cookie_name: "FormsSavedData".to_string(),
            save_delay_ms: 500,
            lifetime_days: 30,
            restore_prompt: "Restore saved contents of this form?".to_string(),
        }
    }
}

impl AutosaveConfig {
    pub(crate) fn lifetime_secs(&self) -> u64 {
        self.lifetime_days * 24 * 60 * 60
    }
}
