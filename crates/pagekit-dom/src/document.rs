//! Document - High-level document API
//!
//! Owns the tree together with the per-page services listeners need:
//! the listener registry, timers and the cookie jar. Listeners and timer
//! callbacks receive `&mut Document`, so they can mutate anything here.

use std::rc::Rc;

use url::Url;

use crate::{
    CookieJar, DomEvent, DomResult, DomTree, EventListeners, EventType, Listener, ListenerId,
    NodeId, TimerCallback, TimerId, Timers,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: Url,
    listeners: EventListeners,
    timers: Timers,
    cookies: CookieJar,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `<html><head/><body/></html>`
    pub fn new(url: &str) -> DomResult<Self> {
        Ok(Self::with_url(Url::parse(url)?))
    }

    /// Create a new document for an already parsed URL
    pub fn with_url(url: Url) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let mut doc = Self {
            tree,
            url,
            listeners: EventListeners::new(),
            timers: Timers::new(),
            cookies: CookieJar::new(),
            html_element: html,
            head_element: head,
            body_element: body,
        };

        // Freshly created nodes: these links cannot fail.
        let root = doc.tree.root();
        for (parent, child) in [(root, html), (html, head), (html, body)] {
            if let Err(err) = doc.tree.append_child(parent, child) {
                tracing::warn!(%err, "Failed to build document skeleton");
            }
        }
        doc
    }

    /// Get document URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register an event listener on a node
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: impl Fn(&mut Document, &mut DomEvent) + 'static,
    ) -> ListenerId {
        self.add_listener(node, event_type, Rc::new(listener))
    }

    /// Register an already shared listener
    pub fn add_listener(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        self.listeners.add(node, event_type, listener)
    }

    /// Number of listeners registered directly on a node
    pub fn listener_count(&self, node: NodeId, event_type: EventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Dispatch an event at `target`, bubbling to the root when the event
    /// type bubbles. Returns false if a listener prevented the default action.
    pub fn dispatch(&mut self, target: NodeId, event_type: EventType) -> bool {
        let mut event = DomEvent::new(event_type, target);
        let path = if event.bubbles {
            self.tree.ancestors_inclusive(target)
        } else {
            vec![target]
        };
        tracing::trace!(?target, ?event_type, depth = path.len(), "Dispatching event");

        for node in path {
            event.current_target = node;
            // Snapshot: listeners added during dispatch run on the next event.
            for listener in self.listeners.listeners_for(node, event_type) {
                listener(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        !event.is_default_prevented()
    }

    /// Simulate a user click
    pub fn click(&mut self, node: NodeId) -> bool {
        self.dispatch(node, EventType::Click)
    }

    /// Fire DOMContentLoaded on the document
    pub fn content_loaded(&mut self) {
        self.dispatch(NodeId::ROOT, EventType::DomContentLoaded);
    }

    /// Fire load on the document
    pub fn load(&mut self) {
        self.dispatch(NodeId::ROOT, EventType::Load);
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    pub fn set_timeout(&mut self, callback: impl Fn(&mut Document) + 'static, delay_ms: u64) -> TimerId {
        self.timers.set_timeout(Rc::new(callback) as TimerCallback, delay_ms)
    }

    pub fn set_interval(&mut self, callback: impl Fn(&mut Document) + 'static, delay_ms: u64) -> TimerId {
        self.timers.set_interval(Rc::new(callback) as TimerCallback, delay_ms)
    }

    /// clearTimeout / clearInterval
    pub fn clear_timer(&mut self, id: TimerId) {
        self.timers.clear(id);
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Move the clock forward, running every timer that falls due
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now() + ms;
        while let Some((id, callback)) = self.timers.pop_due(until) {
            tracing::trace!(?id, now = self.timers.now(), "Firing timer");
            callback(self);
        }
        self.timers.set_now(until);
    }

    // ------------------------------------------------------------------
    // Cookies
    // ------------------------------------------------------------------

    /// `document.cookie` getter
    pub fn cookie(&self) -> String {
        self.cookies.cookie_header(&self.url).unwrap_or_default()
    }

    /// `document.cookie` setter
    pub fn set_cookie(&mut self, assignment: &str) -> bool {
        self.cookies.set_from_document(&self.url, assignment)
    }

    /// Value of a cookie visible to this document
    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        self.cookies.get(&self.url, name).map(|c| c.value.as_str())
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn cookies_mut(&mut self) -> &mut CookieJar {
        &mut self.cookies
    }

    // ------------------------------------------------------------------
    // Form controls
    // ------------------------------------------------------------------

    /// Current value of a form control
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.tree.element(node).map(|e| e.value.as_str())
    }

    /// Set the value of a form control without firing events
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(elem) = self.tree.element_mut(node) {
            elem.value = value.to_string();
        }
    }

    /// Simulate typing: replace the value and fire keyup
    pub fn type_text(&mut self, node: NodeId, value: &str) {
        self.set_value(node, value);
        self.dispatch(node, EventType::KeyUp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn doc() -> Document {
        Document::new("http://example.com/page").unwrap()
    }

    #[test]
    fn test_skeleton() {
        let doc = doc();
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.tree().tag_name(doc.head()), Some("head"));
    }

    #[test]
    fn test_click_bubbles_to_ancestors() {
        let mut doc = doc();
        let div = doc.tree.create_element("div");
        let body = doc.body();
        doc.tree.append_child(body, div).unwrap();

        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        doc.add_event_listener(body, EventType::Click, move |_, event| {
            assert_eq!(event.target, div);
            assert_eq!(event.current_target, body);
            seen.set(seen.get() + 1);
        });

        assert!(doc.click(div));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_stop_propagation_and_prevent_default() {
        let mut doc = doc();
        let div = doc.tree.create_element("div");
        let body = doc.body();
        doc.tree.append_child(body, div).unwrap();

        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        doc.add_event_listener(div, EventType::Click, |_, event| {
            event.prevent_default();
            event.stop_propagation();
        });
        doc.add_event_listener(body, EventType::Click, move |_, _| seen.set(seen.get() + 1));

        assert!(!doc.click(div));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_timers_run_on_advance() {
        let mut doc = doc();
        let body = doc.body();
        doc.set_timeout(move |doc| doc.tree.add_class(body, "late"), 500);

        doc.advance(499);
        assert!(!doc.tree().has_class(body, "late"));
        doc.advance(1);
        assert!(doc.tree().has_class(body, "late"));
        assert_eq!(doc.now(), 500);
    }

    #[test]
    fn test_timer_can_clear_itself() {
        let mut doc = doc();
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        let slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let own = Rc::clone(&slot);
        let id = doc.set_interval(
            move |doc| {
                count.set(count.get() + 1);
                if let Some(id) = own.get() {
                    doc.clear_timer(id);
                }
            },
            100,
        );
        slot.set(Some(id));

        doc.advance(1000);
        assert_eq!(fired.get(), 1);
        assert!(!doc.timers().has_pending());
    }

    #[test]
    fn test_document_cookie() {
        let mut doc = doc();
        assert_eq!(doc.cookie(), "");
        assert!(doc.set_cookie("a=1; path=/"));
        assert_eq!(doc.cookie(), "a=1");
        assert_eq!(doc.cookie_value("a"), Some("1"));
        assert_eq!(doc.cookie_value("b"), None);
    }
}
