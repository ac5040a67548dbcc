//! Attempt reports saved after a submitted session.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::TestSession;

/// The record of one submitted attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Backend identifier of the test, if known.
    #[serde(default)]
    pub test_id: Option<String>,
    /// Document the test was generated from, if known.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Number of questions.
    pub total: usize,
    /// Number answered correctly.
    pub score: u32,
    /// Per-question outcomes in test order.
    pub questions: Vec<QuestionOutcome>,
}

/// How one question went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub question: String,
    #[serde(default)]
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AttemptReport {
    /// Build a report from a submitted session. Returns `None` while the
    /// session is still being answered.
    pub fn from_session(session: &TestSession) -> Option<Self> {
        let score = session.score()?;
        let test = session.test();

        let questions = test
            .questions()
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = session.answer(index).map(str::to_string);
                QuestionOutcome {
                    index,
                    question: q.question.clone(),
                    is_correct: selected.as_deref() == Some(q.correct_answer.as_str()),
                    selected,
                    correct_answer: q.correct_answer.clone(),
                }
            })
            .collect();

        Some(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            test_id: test.id.clone(),
            document_id: test.document_id.clone(),
            total: test.len(),
            score,
            questions,
        })
    }

    /// Score as a percentage of the total.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 * 100.0 / self.total as f64
    }

    /// Questions answered wrongly or left blank.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.questions.iter().filter(|q| !q.is_correct)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
