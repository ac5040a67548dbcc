//! Error types for payload ingestion and session interaction.
//!
//! Payload errors are expected at runtime (the generation service is
//! untrusted) and are reported to the user. Interaction errors indicate a
//! miswired caller and should never reach a user in a working front end.

use std::fmt;

use thiserror::Error;

/// A single problem found while validating a test payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadIssue {
    /// Zero-based question index (None for payload-level issues).
    pub question: Option<usize>,
    /// Issue message.
    pub message: String,
}

impl PayloadIssue {
    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            question: None,
            message: message.into(),
        }
    }

    pub fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for PayloadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.question {
            // Shown 1-based, the way questions are numbered on screen.
            Some(i) => write!(f, "question {}: {}", i + 1, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

fn join_issues(issues: &[PayloadIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while turning a generation-service payload into a `MockTest`.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload was not valid JSON.
    #[error("malformed payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload had no question array in any accepted shape.
    #[error("payload does not contain a question array")]
    MissingQuestions,

    /// The generation service answered with `{ "error": ... }`.
    #[error("generation service error: {0}")]
    Service(String),

    /// One or more questions failed validation. The payload is rejected whole.
    #[error("invalid payload: {}", join_issues(.issues))]
    Invalid { issues: Vec<PayloadIssue> },
}

impl PayloadError {
    /// Validation issues, if this is an `Invalid` error.
    pub fn issues(&self) -> &[PayloadIssue] {
        match self {
            PayloadError::Invalid { issues } => issues,
            _ => &[],
        }
    }
}

/// Errors from calling a session operation with input the test cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// The question index is past the end of the test.
    #[error("question index {index} out of range (test has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    /// The option key does not belong to the question.
    #[error("question {index} has no option `{key}`")]
    UnknownOption { index: usize, key: String },
}
