//! Toggle configuration

use serde::Deserialize;

/// Class tokens that drive the toggles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Marks a clickable toggle control
    pub trigger: String,
    /// Marks a trigger as collapsed
    pub closed_state: String,
    /// Marks a target as hidden
    pub hidden_state: String,
}

impl ToggleConfig {
    pub fn new(trigger: &str, closed_state: &str, hidden_state: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            closed_state: closed_state.to_string(),
            hidden_state: hidden_state.to_string(),
        }
    }

    /// Check the tokens are usable. A failing config is still run: empty
    /// tokens simply never match.
    pub fn validate(&self) -> Result<(), ToggleConfigError> {
        let tokens = [
            ("trigger", &self.trigger),
            ("closed_state", &self.closed_state),
            ("hidden_state", &self.hidden_state),
        ];
        for (field, token) in tokens {
            if token.trim().is_empty() {
                return Err(ToggleConfigError::EmptyToken(field));
            }
            if token.contains(char::is_whitespace) {
                return Err(ToggleConfigError::Whitespace(field, token.clone()));
            }
        }
        if self.trigger == self.closed_state || self.trigger == self.hidden_state {
            return Err(ToggleConfigError::Collision(self.trigger.clone()));
        }
        if self.closed_state == self.hidden_state {
            return Err(ToggleConfigError::Collision(self.closed_state.clone()));
        }
        Ok(())
    }

    /// Whether the trigger token can match anything at all
    pub fn is_enabled(&self) -> bool {
        !self.trigger.is_empty()
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self::new("toggle", "closed", "hidden")
    }
}

/// Problems with a toggle configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleConfigError {
    #[error("{0} class token is empty")]
    EmptyToken(&'static str),

    #[error("{0} class token contains whitespace: {1:?}")]
    Whitespace(&'static str, String),

    #[error("class token {0:?} is used for more than one role")]
    Collision(String),
}
