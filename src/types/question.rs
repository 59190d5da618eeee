//! Quiz question records
//!
//! Questions are immutable static content; the mutable answer record lives
//! in the quiz engine.

use serde::Serialize;

/// One selectable option of a question
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    /// Stable option id, e.g. "a"
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Is this the correct option?
    pub is_correct: bool,
}

/// One quiz question
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// Scenario framing shown above the prompt
    pub scenario: &'static str,
    /// The question itself
    pub prompt: &'static str,
    /// Ordered options, exactly one correct
    pub options: Vec<AnswerOption>,
    /// Shown after submission
    pub explanation: &'static str,
}

impl Question {
    /// Id of the correct option
    pub fn correct_id(&self) -> &'static str {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.id)
            .unwrap_or("")
    }

    /// Does an option id belong to this question?
    pub fn has_option(&self, id: &str) -> bool {
        self.options.iter().any(|o| o.id == id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
