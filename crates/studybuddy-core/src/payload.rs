//! Mock test payload parser.
//!
//! Accepts the shapes the generation service produces and turns them into a
//! validated `MockTest`:
//!
//! - the stored test row: `{ "id": .., "document_id": .., "questions": [..] }`
//! - a bare question array
//! - raw model output with a JSON array embedded in surrounding prose
//!
//! An `{ "error": ".." }` body is surfaced as [`PayloadError::Service`].

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::{PayloadError, PayloadIssue};
use crate::model::{validate_questions, MockTest, Question};

/// Parse a payload string into a `MockTest`.
pub fn parse_payload_str(content: &str) -> Result<MockTest, PayloadError> {
    parse_value(decode_payload(content)?, None)
}

/// Parse a payload string, keeping at most `max` questions.
///
/// Questions past `max` are dropped before validation, so a malformed extra
/// question cannot reject an otherwise usable test.
pub fn parse_payload_capped(content: &str, max: usize) -> Result<MockTest, PayloadError> {
    parse_value(decode_payload(content)?, Some(max))
}

/// Parse an already-decoded JSON value into a `MockTest`.
pub fn parse_payload_value(value: Value) -> Result<MockTest, PayloadError> {
    parse_value(value, None)
}

fn decode_payload(content: &str) -> Result<Value, PayloadError> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => Ok(value),
        Err(e) => match extract_json_array(content) {
            Some(span) => {
                tracing::debug!("payload is not plain JSON, using embedded array");
                Ok(serde_json::from_str(span)?)
            }
            None => Err(e.into()),
        },
    }
}

fn parse_value(value: Value, max: Option<usize>) -> Result<MockTest, PayloadError> {
    match value {
        Value::Array(items) => parse_questions(cap(items, max)),
        Value::Object(mut map) => {
            let Some(questions) = map.remove("questions") else {
                if let Some(error) = map.get("error") {
                    return Err(PayloadError::Service(value_to_string(error)));
                }
                return Err(PayloadError::MissingQuestions);
            };
            let Value::Array(items) = questions else {
                return Err(PayloadError::MissingQuestions);
            };

            let mut test = parse_questions(cap(items, max))?;
            test.id = map.get("id").map(value_to_string);
            test.document_id = map.get("document_id").map(value_to_string);
            test.created_at = map.get("created_at").map(value_to_string);
            Ok(test)
        }
        _ => Err(PayloadError::MissingQuestions),
    }
}

/// Drop raw questions past `max`. A zero cap is ignored.
fn cap(mut items: Vec<Value>, max: Option<usize>) -> Vec<Value> {
    if let Some(max) = max.filter(|m| *m > 0) {
        if items.len() > max {
            tracing::warn!(
                "payload has {} questions, keeping the first {max}",
                items.len()
            );
            items.truncate(max);
        }
    }
    items
}

/// Decode each question independently so one malformed entry does not hide
/// problems in the others, then validate the lot.
fn parse_questions(items: Vec<Value>) -> Result<MockTest, PayloadError> {
    let mut questions = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Question>(item) {
            Ok(q) => {
                issues.extend(q.issues(i));
                questions.push(q);
            }
            Err(e) => issues.push(PayloadIssue::at(i, e.to_string())),
        }
    }

    if questions.is_empty() && issues.is_empty() {
        issues = validate_questions(&questions);
    }

    if !issues.is_empty() {
        tracing::warn!("rejecting payload with {} issue(s)", issues.len());
        return Err(PayloadError::Invalid { issues });
    }

    let test = MockTest::new(questions)?;
    tracing::info!("accepted mock test with {} questions", test.len());
    Ok(test)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Find the JSON array embedded in free text.
///
/// Returns the span from the first `[` to the last `]`, or `None` if there is
/// no such span.
pub fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Load and parse a payload file.
pub fn load_payload(path: &Path) -> Result<MockTest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload file: {}", path.display()))?;
    parse_payload_str(&content)
        .with_context(|| format!("failed to load payload: {}", path.display()))
}

/// Save a test as a pretty-printed payload file.
pub fn save_payload(test: &MockTest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(test).context("failed to serialize payload")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write payload to {}", path.display()))?;
    Ok(())
}
