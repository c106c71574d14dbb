//! User interface abstraction
//!
//! The only interaction the tool needs is a yes/no confirmation when
//! sanitization changes a requested branch name. Putting it behind a trait
//! keeps the command logic testable without a terminal.

use dialoguer::Confirm;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Trait for user confirmation prompts.
pub trait UserInterface {
    /// Asks a yes/no question, defaulting to no.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Production implementation using dialoguer.
pub struct DialoguerUI;

impl UserInterface for DialoguerUI {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| match e {
                dialoguer::Error::IO(io) => Error::Io(io),
            })?;
        Ok(confirmed)
    }
}

/// Mock implementation for testing, fed from a queue of answers.
pub struct MockUI {
    confirms: RefCell<VecDeque<bool>>,
}

impl Default for MockUI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUI {
    pub fn new() -> Self {
        Self {
            confirms: RefCell::new(VecDeque::new()),
        }
    }

    /// Queues a confirmation answer.
    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    /// True once every queued answer has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.confirms.borrow().is_empty()
    }
}

impl UserInterface for MockUI {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        self.confirms.borrow_mut().pop_front().ok_or_else(|| {
            Error::Io(std::io::Error::other(
                "no more confirmations configured for MockUI",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_ui_returns_queued_answers() {
        let ui = MockUI::new().with_confirm(true).with_confirm(false);

        assert!(ui.confirm("first").unwrap());
        assert!(!ui.confirm("second").unwrap());
        assert!(ui.is_exhausted());
    }

    #[test]
    fn test_mock_ui_errors_when_exhausted() {
        let ui = MockUI::new();
        assert!(ui.confirm("anything").is_err());
    }
}
