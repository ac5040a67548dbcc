//! Trait definition for the remote generation service.
//!
//! Implemented by `studybuddy-client` over HTTP, and by its mock service in
//! tests.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Flashcard, MockTest};

// ---------------------------------------------------------------------------
// Generation service trait
// ---------------------------------------------------------------------------

/// Backend that produces study material from an uploaded document.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Human-readable service name.
    fn name(&self) -> &str;

    /// Upload a study document and return the identifier the service
    /// assigned to it.
    async fn upload_document(&self, path: &Path) -> anyhow::Result<String>;

    /// Generate a validated mock test for a document.
    async fn generate_mock_test(&self, request: &MockTestRequest) -> anyhow::Result<MockTest>;

    /// Generate flashcards for a document.
    async fn generate_flashcards(&self, document_id: &str) -> anyhow::Result<Vec<Flashcard>>;

    /// Ask a free-form question about a document.
    async fn ask_question(&self, document_id: &str, question: &str) -> anyhow::Result<String>;
}

/// Request to generate a mock test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockTestRequest {
    /// Document identifier returned by the upload step.
    pub document_id: String,
    /// Number of questions to generate.
    pub count: QuestionCount,
}

// ---------------------------------------------------------------------------
// Question count
// ---------------------------------------------------------------------------

/// Number of questions in a generated test, always within
/// [`QuestionCount::MIN`]..=[`QuestionCount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 50;

    pub fn new(count: u32) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(format!(
                "question count must be between {} and {}, got {count}",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = String;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<QuestionCount> for u32 {
    fn from(count: QuestionCount) -> Self {
        count.0
    }
}

impl FromStr for QuestionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid question count: '{}'", s.trim()))?;
        Self::new(count)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
