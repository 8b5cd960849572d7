//! pagekit sidebar
//!
//! Collapsible sidebar panels. A trigger link is inserted in front of the
//! panel; activating it slides the panel out of view and widens the main
//! content, or the reverse.
//!
//! # Example
//! ```rust
//! use std::rc::Rc;
//! use pagekit_dom::Document;
//! use pagekit_sidebar::{InstantAnimator, SidebarOptions, SidebarToggler};
//!
//! let mut doc = Document::new("http://example.com/").unwrap();
//! let body = doc.body();
//! let content = doc.tree.create_element_with("div", &[("id", "content")]);
//! let main = doc.tree.create_element_with("div", &[("id", "main")]);
//! let panel = doc.tree.create_element_with("div", &[("class", "slide"), ("style", "width: 200px")]);
//! doc.tree.append_child(body, content).unwrap();
//! doc.tree.append_child(content, main).unwrap();
//! doc.tree.append_child(content, panel).unwrap();
//!
//! let sidebar = SidebarToggler::apply(&mut doc, content, SidebarOptions::default(), Rc::new(InstantAnimator)).unwrap();
//! assert!(sidebar.is_shown(doc.tree()));
//!
//! doc.click(sidebar.parts().trigger);
//! assert!(!sidebar.is_shown(doc.tree()));
//! ```

mod animations;
mod animator;
mod effects;
mod options;
mod toggler;

use pagekit_dom::{DomError, NodeId};

pub use animations::{COLLAPSED, build as build_animation};
pub use animator::{Animator, InstantAnimator, RecordingAnimator, TimedAnimator};
pub use effects::{EffectSequence, EffectStep, FAST_MS};
pub use options::{AnimationKind, InitState, Position, SidebarOptions};
pub use toggler::{SidebarParts, SidebarToggler};

/// Sidebar installation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SidebarError {
    #[error("Sidebar container is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Sidebar panel not found: {0}")]
    PanelNotFound(String),

    #[error("Wrapper not found: {0}")]
    WrapperNotFound(String),

    #[error("Main content not found: {0}")]
    MainContentNotFound(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
