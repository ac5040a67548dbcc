//! The mock test session engine.
//!
//! A `TestSession` records one attempt at a `MockTest`. It moves through two
//! states, `Answering` and `Submitted`, and every operation returns a new
//! session value instead of mutating in place. The test itself is shared
//! behind an `Arc`, so successive session values are cheap to produce.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::InteractionError;
use crate::model::{MockTest, Question};

/// Selected option key per question index.
pub type AnswerRecord = BTreeMap<usize, String>;

/// Lifecycle state of a session. The score only exists once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Answering,
    Submitted { score: u32 },
}

/// How a single option should be presented given the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Not chosen, or not relevant to feedback.
    Unselected,
    /// The current pick, before submission.
    Selected,
    /// The correct answer, after submission.
    Correct,
    /// The user's pick, after submission, when it was wrong.
    IncorrectChoice,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Unselected => write!(f, "unselected"),
            Classification::Selected => write!(f, "selected"),
            Classification::Correct => write!(f, "correct"),
            Classification::IncorrectChoice => write!(f, "incorrect_choice"),
        }
    }
}

/// One attempt at a mock test.
#[derive(Debug, Clone)]
pub struct TestSession {
    test: Arc<MockTest>,
    answers: AnswerRecord,
    state: SessionState,
}

impl TestSession {
    /// Start a fresh attempt: nothing answered, not submitted.
    pub fn new(test: impl Into<Arc<MockTest>>) -> Self {
        let test = test.into();
        tracing::debug!("new session over {} questions", test.len());
        Self {
            test,
            answers: AnswerRecord::new(),
            state: SessionState::Answering,
        }
    }

    pub fn test(&self) -> &MockTest {
        &self.test
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn answer(&self, question_index: usize) -> Option<&str> {
        self.answers.get(&question_index).map(String::as_str)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted { .. })
    }

    /// The score, present only after submission.
    pub fn score(&self) -> Option<u32> {
        match self.state {
            SessionState::Submitted { score } => Some(score),
            SessionState::Answering => None,
        }
    }

    pub fn total(&self) -> usize {
        self.test.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Indices of questions with no selection.
    pub fn unanswered(&self) -> Vec<usize> {
        (0..self.total())
            .filter(|i| !self.answers.contains_key(i))
            .collect()
    }

    /// Resolve a question and confirm `option_key` is one of its options.
    fn lookup(
        &self,
        question_index: usize,
        option_key: &str,
    ) -> Result<&Question, InteractionError> {
        let question = self.test.question(question_index).ok_or(
            InteractionError::QuestionOutOfRange {
                index: question_index,
                total: self.total(),
            },
        )?;
        if !question.options.contains_key(option_key) {
            return Err(InteractionError::UnknownOption {
                index: question_index,
                key: option_key.to_string(),
            });
        }
        Ok(question)
    }

    /// Record `option_key` as the answer to `question_index`, replacing any
    /// earlier pick. A submitted session is returned unchanged.
    pub fn select_option(
        &self,
        question_index: usize,
        option_key: &str,
    ) -> Result<Self, InteractionError> {
        self.lookup(question_index, option_key)?;

        if self.is_submitted() {
            tracing::debug!("ignoring selection on submitted session");
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.answers.insert(question_index, option_key.to_string());
        Ok(next)
    }

    /// Lock the session and compute the score. Submitting again returns the
    /// session as is.
    pub fn submit(&self) -> Self {
        if self.is_submitted() {
            return self.clone();
        }

        let score = self.correct_count();
        tracing::debug!("submitted: {score}/{}", self.total());

        let mut next = self.clone();
        next.state = SessionState::Submitted { score };
        next
    }

    fn correct_count(&self) -> u32 {
        self.test
            .questions()
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answer(*i) == Some(q.correct_answer.as_str()))
            .count() as u32
    }

    /// Classify one option of one question for display.
    pub fn classify(
        &self,
        question_index: usize,
        option_key: &str,
    ) -> Result<Classification, InteractionError> {
        let question = self.lookup(question_index, option_key)?;
        Ok(self.classify_option(question_index, question, option_key))
    }

    /// Classification for an option already known to belong to the question.
    pub(crate) fn classify_option(
        &self,
        question_index: usize,
        question: &Question,
        option_key: &str,
    ) -> Classification {
        let picked = self.answer(question_index) == Some(option_key);

        if !self.is_submitted() {
            return if picked {
                Classification::Selected
            } else {
                Classification::Unselected
            };
        }

        if option_key == question.correct_answer {
            Classification::Correct
        } else if picked {
            Classification::IncorrectChoice
        } else {
            Classification::Unselected
        }
    }
}
