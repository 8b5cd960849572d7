//! Effect playback

use std::cell::RefCell;

use pagekit_dom::Document;

use crate::EffectSequence;

/// Plays effect sequences against a document
pub trait Animator {
    fn run(&self, doc: &mut Document, effects: EffectSequence);
}

/// Applies every step's end state immediately, track by track
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn run(&self, doc: &mut Document, effects: EffectSequence) {
        for step in effects.steps() {
            step.apply(doc);
        }
    }
}

/// Plays steps on the document's timers. Each step's end state lands when
/// the step finishes; tracks start together.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedAnimator;

impl Animator for TimedAnimator {
    fn run(&self, doc: &mut Document, effects: EffectSequence) {
        for track in effects.tracks {
            let mut elapsed = 0;
            for step in track {
                elapsed += step.duration_ms();
                if elapsed == 0 {
                    step.apply(doc);
                } else {
                    doc.set_timeout(move |doc| step.apply(doc), elapsed);
                }
            }
        }
    }
}

/// Applies like [`InstantAnimator`] and keeps every sequence it ran
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    runs: RefCell<Vec<EffectSequence>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequences run so far
    pub fn runs(&self) -> Vec<EffectSequence> {
        self.runs.borrow().clone()
    }

    pub fn run_count(&self) -> usize {
        self.runs.borrow().len()
    }
}

impl Animator for RecordingAnimator {
    fn run(&self, doc: &mut Document, effects: EffectSequence) {
        InstantAnimator.run(doc, effects.clone());
        self.runs.borrow_mut().push(effects);
    }
}
