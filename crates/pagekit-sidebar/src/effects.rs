//! Effect sequences
//!
//! An animation is described as data: parallel tracks, each a list of steps
//! that run one after the other. An [`Animator`](crate::Animator) decides
//! how the steps play out over time.

use pagekit_dom::{Document, NodeId, StyleProp};

/// Duration of a "fast" effect, in milliseconds
pub const FAST_MS: u64 = 200;

/// One step of a track
#[derive(Debug, Clone, PartialEq)]
pub enum EffectStep {
    /// Move style properties to target values over `duration_ms`
    Animate {
        node: NodeId,
        props: Vec<(StyleProp, f32)>,
        duration_ms: u64,
    },
    /// Set style properties at once
    Css {
        node: NodeId,
        props: Vec<(StyleProp, f32)>,
    },
    SetText {
        node: NodeId,
        text: String,
    },
    AddClass {
        node: NodeId,
        class: String,
    },
    RemoveClass {
        node: NodeId,
        class: String,
    },
}

impl EffectStep {
    pub fn animate(node: NodeId, props: &[(StyleProp, f32)], duration_ms: u64) -> Self {
        Self::Animate {
            node,
            props: props.to_vec(),
            duration_ms,
        }
    }

    pub fn css(node: NodeId, props: &[(StyleProp, f32)]) -> Self {
        Self::Css {
            node,
            props: props.to_vec(),
        }
    }

    pub fn set_text(node: NodeId, text: &str) -> Self {
        Self::SetText {
            node,
            text: text.to_string(),
        }
    }

    pub fn add_class(node: NodeId, class: &str) -> Self {
        Self::AddClass {
            node,
            class: class.to_string(),
        }
    }

    pub fn remove_class(node: NodeId, class: &str) -> Self {
        Self::RemoveClass {
            node,
            class: class.to_string(),
        }
    }

    /// Node the step acts on
    pub fn node(&self) -> NodeId {
        match self {
            Self::Animate { node, .. }
            | Self::Css { node, .. }
            | Self::SetText { node, .. }
            | Self::AddClass { node, .. }
            | Self::RemoveClass { node, .. } => *node,
        }
    }

    /// How long the step takes; everything but `Animate` is instant
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::Animate { duration_ms, .. } => *duration_ms,
            _ => 0,
        }
    }

    /// Apply the step's end state
    pub fn apply(&self, doc: &mut Document) {
        match self {
            Self::Animate { node, props, .. } | Self::Css { node, props } => {
                let Some(elem) = doc.tree.element_mut(*node) else { return };
                for &(prop, value) in props {
                    elem.style.set(prop, value);
                }
            }
            Self::SetText { node, text } => {
                if let Err(err) = doc.tree.set_text_content(*node, text) {
                    tracing::debug!(%err, ?node, "Effect text target is gone");
                }
            }
            Self::AddClass { node, class } => doc.tree.add_class(*node, class),
            Self::RemoveClass { node, class } => doc.tree.remove_class(*node, class),
        }
    }
}

/// Parallel tracks of sequential steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSequence {
    pub tracks: Vec<Vec<EffectStep>>,
}

impl EffectSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track that runs alongside the others
    pub fn track(mut self, steps: Vec<EffectStep>) -> Self {
        self.tracks.push(steps);
        self
    }

    /// Time until the longest track finishes
    pub fn duration_ms(&self) -> u64 {
        self.tracks
            .iter()
            .map(|track| track.iter().map(EffectStep::duration_ms).sum::<u64>())
            .max()
            .unwrap_or(0)
    }

    /// All steps, track by track
    pub fn steps(&self) -> impl Iterator<Item = &EffectStep> {
        self.tracks.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(Vec::is_empty)
    }
}
