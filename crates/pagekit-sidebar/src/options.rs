//! Sidebar options

use pagekit_dom::{EventType, StyleProp};
use serde::Deserialize;

/// Whether the sidebar starts open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitState {
    #[default]
    Shown,
    Hidden,
}

/// Show/hide animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    /// Main content and panel move one after the other
    #[default]
    QueuedEffects,
    /// Main content and panel move together
    ConcurrentEffects,
    /// Jump straight to the end state
    SimpleToggle,
}

impl AnimationKind {
    /// Look up an animation by the name a trigger attribute may carry
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "queuedEffects" => Some(Self::QueuedEffects),
            "concurrentEffects" => Some(Self::ConcurrentEffects),
            "simpleToggle" => Some(Self::SimpleToggle),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::QueuedEffects => "queuedEffects",
            Self::ConcurrentEffects => "concurrentEffects",
            Self::SimpleToggle => "simpleToggle",
        }
    }
}

/// Side of the page the sidebar sits on. Unknown values mean right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    #[default]
    #[serde(other)]
    Right,
}

impl Position {
    /// Property that slides the panel in and out
    pub fn offset_prop(self) -> StyleProp {
        match self {
            Self::Left => StyleProp::Left,
            Self::Right => StyleProp::Right,
        }
    }

    /// Main content margin that makes room for the panel
    pub fn margin_prop(self) -> StyleProp {
        match self {
            Self::Left => StyleProp::MarginLeft,
            Self::Right => StyleProp::MarginRight,
        }
    }
}

/// Options for one sidebar. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
    pub init_state: InitState,
    pub animation: AnimationKind,
    /// Let the main content take the full width when collapsed
    pub full: bool,
    pub position: Position,
    /// Trigger text while the sidebar is hidden
    pub trigger_show: String,
    /// Trigger text while the sidebar is shown
    pub trigger_hide: String,
    /// Panel selector, searched inside the container
    pub sidebar: String,
    /// Main content selector, searched inside the wrapper
    pub main_content: String,
    /// Wrapper selector, matched against the container and its ancestors
    pub wrapper: String,
    /// Padding between the main content and the panel or trigger
    pub p: f32,
    /// Trigger attribute that may name an animation; empty disables
    pub attr: String,
    /// Animation duration in milliseconds
    pub speed: u64,
    /// `click`, or any other name for hover activation
    pub event: String,
    /// Extra events that activate in hover mode, space separated
    pub add_events: String,
    /// Also activate on focus in hover mode
    pub focus: bool,
    /// Hover delay in milliseconds
    pub interval: u64,
    /// Outer width of the trigger link, margins included
    pub trigger_width: f32,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            init_state: InitState::Shown,
            animation: AnimationKind::QueuedEffects,
            full: false,
            position: Position::Right,
            trigger_show: "Show".to_string(),
            trigger_hide: "Hide".to_string(),
            sidebar: "div.slide".to_string(),
            main_content: "#main".to_string(),
            wrapper: "#content".to_string(),
            p: 5.0,
            attr: "id".to_string(),
            speed: 400,
            event: "click".to_string(),
            add_events: "click".to_string(),
            focus: false,
            interval: 300,
            trigger_width: 0.0,
        }
    }
}

impl SidebarOptions {
    /// Whether the animation runs immediately on click
    pub fn is_click_mode(&self) -> bool {
        self.event.trim().eq_ignore_ascii_case("click")
    }

    /// Events that start the animation
    pub fn activation_events(&self) -> Vec<EventType> {
        if self.is_click_mode() {
            return vec![EventType::Click];
        }

        let mut events = vec![EventType::MouseEnter];
        if self.focus {
            events.push(EventType::Focus);
        }
        for name in self.add_events.split_whitespace() {
            match EventType::from_name(name) {
                Some(ty) if !events.contains(&ty) => events.push(ty),
                Some(_) => {}
                None => tracing::warn!(event = name, "Ignoring unknown sidebar event"),
            }
        }
        events
    }

    pub fn starts_hidden(&self) -> bool {
        self.init_state == InitState::Hidden
    }
}
