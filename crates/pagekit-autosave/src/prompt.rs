//! Confirmation prompt
//!
//! Stand-in for `window.confirm()`: the host decides how the question is
//! asked and answered.

use std::cell::RefCell;

/// Yes/no question to the user
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Prompt for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Gives a fixed answer and remembers every question asked
#[derive(Debug, Default)]
pub struct RecordingPrompt {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl RecordingPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}
