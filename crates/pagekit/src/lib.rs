//! pagekit
//!
//! Small progressive-enhancement behaviours for server-rendered pages:
//! - click-to-toggle sections driven by class markers
//! - cookie-backed form autosave with a restore prompt
//! - collapsible sidebars with animated show/hide
//!
//! # Example
//! ```rust
//! use std::rc::Rc;
//! use pagekit::{Config, Page};
//! use pagekit::autosave::FixedAnswer;
//! use pagekit::dom::Document;
//! use pagekit::sidebar::InstantAnimator;
//!
//! let mut doc = Document::new("http://example.com/").unwrap();
//! let body = doc.body();
//! let trigger = doc.tree.create_element_with("h3", &[("class", "toggle")]);
//! let panel = doc.tree.create_element("div");
//! doc.tree.append_child(body, trigger).unwrap();
//! doc.tree.append_child(body, panel).unwrap();
//!
//! let page = Page::install(&mut doc, Config::default(), Rc::new(FixedAnswer(false)), Rc::new(InstantAnimator));
//! doc.content_loaded();
//! doc.load();
//!
//! assert_eq!(page.toggles().unwrap().bindings.len(), 1);
//! doc.click(trigger);
//! assert!(doc.tree().has_class(panel, "hidden"));
//! ```

mod config;
mod page;

pub use config::{Config, ConfigError, SidebarBinding};
pub use page::Page;

pub use pagekit_autosave as autosave;
pub use pagekit_dom as dom;
pub use pagekit_sidebar as sidebar;
pub use pagekit_toggle as toggle;

/// pagekit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
