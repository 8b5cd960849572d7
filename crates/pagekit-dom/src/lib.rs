//! pagekit DOM - Document host for page behaviours
//!
//! Arena-based document tree plus the handful of browser services the page
//! behaviours rely on: class lists, inline style, event listeners with
//! bubbling, timers on a deterministic clock, and a cookie jar.

mod classlist;
mod cookies;
mod document;
mod events;
mod node;
mod query;
mod style;
mod timers;
mod tree;

pub use classlist::ClassList;
pub use cookies::{Cookie, CookieJar, SameSite, http_date, parse_http_date, unix_now};
pub use document::Document;
pub use events::{DomEvent, EventListeners, EventType, Listener, ListenerId};
pub use node::{ElementData, Node, NodeData};
pub use query::Selector;
pub use style::{InlineStyle, StyleProp};
pub use timers::{TimerCallback, TimerId, Timers};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Node is not a child")]
    NotAChild,

    #[error("Invalid node type")]
    InvalidNodeType,

    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    #[error("Invalid document URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;
