//! Tree capabilities the crawler needs
//!
//! Any tree that can answer these questions and accept click callbacks can
//! be crawled; `pagekit_dom::Document` is the stock implementation.

use std::fmt;
use std::rc::Rc;

use pagekit_dom::{Document, EventType, NodeId};

/// Click callback: receives the tree and the node it was attached to
pub type ClickHandler<T> = Rc<dyn Fn(&mut T, <T as ToggleTree>::Node)>;

/// Read/write access to a host-owned tree
pub trait ToggleTree: Sized {
    /// Non-owning node reference
    type Node: Copy + Eq + fmt::Debug;

    /// Where the startup crawl begins
    fn crawl_root(&self) -> Option<Self::Node>;

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element nodes, as opposed to text, comments and the like
    fn is_element(&self, node: Self::Node) -> bool;

    fn has_class(&self, node: Self::Node, token: &str) -> bool;

    fn add_class(&mut self, node: Self::Node, token: &str);

    fn remove_class(&mut self, node: Self::Node, token: &str);

    /// Run `handler` every time `node` is clicked
    fn on_click(&mut self, node: Self::Node, handler: ClickHandler<Self>);
}

impl ToggleTree for Document {
    type Node = NodeId;

    /// The body, or the document itself when the body has been detached
    fn crawl_root(&self) -> Option<NodeId> {
        let body = self.body();
        if self.tree().is_connected(body) {
            Some(body)
        } else {
            Some(self.tree().root())
        }
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree().first_child(node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree().next_sibling(node)
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.tree().is_element(node)
    }

    fn has_class(&self, node: NodeId, token: &str) -> bool {
        self.tree().has_class(node, token)
    }

    fn add_class(&mut self, node: NodeId, token: &str) {
        self.tree_mut().add_class(node, token);
    }

    fn remove_class(&mut self, node: NodeId, token: &str) {
        self.tree_mut().remove_class(node, token);
    }

    fn on_click(&mut self, node: NodeId, handler: ClickHandler<Self>) {
        self.add_event_listener(node, EventType::Click, move |doc, _event| handler(doc, node));
    }
}
