//! Render-ready projections of a session.
//!
//! Front ends (terminal, HTML, JSON) consume these instead of reaching into
//! the session, so every renderer shows identical feedback.

use serde::{Deserialize, Serialize};

use crate::session::{Classification, TestSession};

/// One option as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub key: String,
    pub text: String,
    pub classification: Classification,
}

/// One question with its options in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: Vec<OptionView>,
    /// Whether inputs for this question accept changes.
    pub locked: bool,
}

impl QuestionView {
    /// The 1-based number shown next to the question.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Overall session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub submitted: bool,
    pub score: Option<u32>,
    pub total: usize,
}

impl TestSession {
    /// Every question with per-option classification.
    pub fn question_views(&self) -> Vec<QuestionView> {
        let locked = self.is_submitted();
        self.test()
            .questions()
            .iter()
            .enumerate()
            .map(|(index, q)| QuestionView {
                index,
                question: q.question.clone(),
                options: q
                    .options
                    .iter()
                    .map(|(key, text)| OptionView {
                        key: key.to_string(),
                        text: text.to_string(),
                        classification: self.classify_option(index, q, key),
                    })
                    .collect(),
                locked,
            })
            .collect()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            submitted: self.is_submitted(),
            score: self.score(),
            total: self.total(),
        }
    }
}
