//! pagekit autosave
//!
//! Keeps a copy of what the user typed into a page's forms in a cookie, so
//! a crashed tab or an accidental navigation does not lose it.

mod autosave;
mod config;
mod escape;
mod prompt;

pub use autosave::{FormAutosave, is_text_input};
pub use config::AutosaveConfig;
pub use escape::{escape, unescape};
pub use prompt::{FixedAnswer, Prompt, RecordingPrompt};
