//! pagekit toggles
//!
//! Finds elements marked as toggle triggers and makes a click on each one
//! flip the visibility of the element that follows it.
//!
//! # Example
//! ```rust
//! use pagekit_dom::Document;
//! use pagekit_toggle::{init, ToggleConfig};
//!
//! let mut doc = Document::new("http://example.com/").unwrap();
//! let body = doc.body();
//! let trigger = doc.tree.create_element_with("h3", &[("class", "toggle closed")]);
//! let panel = doc.tree.create_element_with("div", &[("class", "panel")]);
//! doc.tree.append_child(body, trigger).unwrap();
//! doc.tree.append_child(body, panel).unwrap();
//!
//! let report = init(&mut doc, ToggleConfig::default());
//! assert_eq!(report.bindings.len(), 1);
//! assert!(doc.tree().has_class(panel, "hidden"));
//!
//! doc.click(trigger);
//! assert!(!doc.tree().has_class(panel, "hidden"));
//! ```

mod config;
mod crawler;
mod host;

pub use config::{ToggleConfig, ToggleConfigError};
pub use crawler::{CrawlReport, ToggleCrawler, TriggerBinding, init};
pub use host::{ClickHandler, ToggleTree};
