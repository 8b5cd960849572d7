//! DOM Events
//!
//! Event types, event objects and the per-node listener registry.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    MouseEnter,
    MouseLeave,
    Focus,
    KeyUp,
    Submit,
    Load,
    DomContentLoaded,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(
            self,
            EventType::Focus | EventType::Load | EventType::MouseEnter | EventType::MouseLeave
        )
    }

    /// Check if the default action can be prevented
    pub fn cancelable(&self) -> bool {
        matches!(self, EventType::Click | EventType::Submit | EventType::KeyUp)
    }

    /// Parse a DOM event name (`click`, `mouseenter`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            "focus" => Some(Self::Focus),
            "keyup" => Some(Self::KeyUp),
            "submit" => Some(Self::Submit),
            "load" => Some(Self::Load),
            "domcontentloaded" => Some(Self::DomContentLoaded),
            _ => None,
        }
    }
}

/// Event being dispatched
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener callback
pub type Listener = Rc<dyn Fn(&mut Document, &mut DomEvent)>;

/// Listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listeners by target node and event type
#[derive(Default)]
pub struct EventListeners {
    handlers: HashMap<(NodeId, EventType), Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Registering the same behaviour twice yields two
    /// listeners, both of which run.
    pub fn add(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.handlers
            .entry((node, event_type))
            .or_default()
            .push((id, listener));
        id
    }

    /// Snapshot of the listeners for a node, in registration order
    pub fn listeners_for(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.handlers
            .get(&(node, event_type))
            .map(|list| list.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default()
    }

    /// Number of listeners for a node
    pub fn count(&self, node: NodeId, event_type: EventType) -> usize {
        self.handlers.get(&(node, event_type)).map_or(0, Vec::len)
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_flags() {
        let event = DomEvent::new(EventType::Click, NodeId(3));
        assert!(event.bubbles);
        assert!(event.cancelable);
        assert_eq!(event.current_target, NodeId(3));

        let event = DomEvent::new(EventType::MouseEnter, NodeId(3));
        assert!(!event.bubbles);
    }

    #[test]
    fn test_prevent_default_only_when_cancelable() {
        let mut load = DomEvent::new(EventType::Load, NodeId::ROOT);
        load.prevent_default();
        assert!(!load.is_default_prevented());

        let mut click = DomEvent::new(EventType::Click, NodeId(1));
        click.prevent_default();
        assert!(click.is_default_prevented());
    }

    #[test]
    fn test_add_listeners() {
        let mut listeners = EventListeners::new();
        let noop: Listener = Rc::new(|_, _| {});
        let a = listeners.add(NodeId(1), EventType::Click, Rc::clone(&noop));
        let b = listeners.add(NodeId(1), EventType::Click, noop);
        assert_ne!(a, b);
        assert_eq!(listeners.count(NodeId(1), EventType::Click), 2);
        assert_eq!(listeners.count(NodeId(1), EventType::KeyUp), 0);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventType::from_name("MouseEnter"), Some(EventType::MouseEnter));
        assert_eq!(EventType::from_name("DOMContentLoaded"), Some(EventType::DomContentLoaded));
        assert_eq!(EventType::from_name("wheel"), None);
        // Only the events the behaviours listen for are known
        for name in ["mouseup", "blur", "input"] {
            assert_eq!(EventType::from_name(name), None);
        }
    }
}
