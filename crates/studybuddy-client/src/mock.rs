//! Mock generation service for testing.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studybuddy_core::model::{Flashcard, MockTest};
use studybuddy_core::traits::{GenerationService, MockTestRequest};

use crate::error::ClientError;

/// A generation service that returns canned material without network calls.
pub struct MockGenerationService {
    /// Test handed out by `generate_mock_test`.
    test: Option<MockTest>,
    /// Cards handed out by `generate_flashcards`.
    flashcards: Vec<Flashcard>,
    /// Fixed answer for `ask_question`.
    answer: String,
    /// Identifier handed out by `upload_document`.
    document_id: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last mock test request received.
    last_request: Mutex<Option<MockTestRequest>>,
}

impl MockGenerationService {
    /// Create a mock that serves the given test.
    pub fn with_test(test: MockTest) -> Self {
        Self {
            test: Some(test),
            flashcards: Vec::new(),
            answer: "I could not find an answer to that in the document.".to_string(),
            document_id: "mock-doc".to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_flashcards(mut self, flashcards: Vec<Flashcard>) -> Self {
        self.flashcards = flashcards;
        self
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = answer.to_string();
        self
    }

    pub fn with_document_id(mut self, document_id: &str) -> Self {
        self.document_id = document_id.to_string();
        self
    }

    /// Get the number of calls made to this service.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last mock test request made to this service.
    pub fn last_request(&self) -> Option<MockTestRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn upload_document(&self, path: &Path) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !path.is_file() {
            return Err(ClientError::InvalidRequest(format!(
                "not a file: {}",
                path.display()
            ))
            .into());
        }
        Ok(self.document_id.clone())
    }

    async fn generate_mock_test(&self, request: &MockTestRequest) -> anyhow::Result<MockTest> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let test = self
            .test
            .clone()
            .ok_or_else(|| ClientError::DocumentNotFound(request.document_id.clone()))?;
        Ok(test.truncated(request.count.get() as usize))
    }

    async fn generate_flashcards(&self, _document_id: &str) -> anyhow::Result<Vec<Flashcard>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.flashcards.clone())
    }

    async fn ask_question(&self, _document_id: &str, question: &str) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if question.trim().is_empty() {
            return Err(ClientError::InvalidRequest("a question is required".into()).into());
        }
        Ok(self.answer.clone())
    }
}
