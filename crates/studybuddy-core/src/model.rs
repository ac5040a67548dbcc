//! Core data model types for studybuddy.
//!
//! These mirror the JSON contract of the generation service: a mock test is
//! an ordered list of multiple-choice questions, each with keyed options and
//! one correct key.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PayloadError, PayloadIssue};

/// Ordered mapping of option key to option text.
///
/// Keeps the order the options arrived in, since that is the display order.
/// Deserializing rejects duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList(Vec<(String, String)>);

impl OptionList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an option. Returns `false` (and leaves the list unchanged) if
    /// the key is already present.
    pub fn push(&mut self, key: impl Into<String>, text: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.0.push((key, text.into()));
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = OptionList::new();
        for (k, v) in iter {
            list.push(k, v);
        }
        list
    }
}

impl Serialize for OptionList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionListVisitor;

        impl<'de> Visitor<'de> for OptionListVisitor {
            type Value = OptionList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option key to option text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OptionList, A::Error> {
                let mut list = OptionList::new();
                while let Some((key, text)) = access.next_entry::<String, String>()? {
                    if list.contains_key(&key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate option key `{key}`"
                        )));
                    }
                    list.0.push((key, text));
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(OptionListVisitor)
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Answer choices in display order.
    pub options: OptionList,
    /// Key of the correct option.
    pub correct_answer: String,
}

impl Question {
    /// Check this question against the payload contract.
    pub fn issues(&self, index: usize) -> Vec<PayloadIssue> {
        let mut issues = Vec::new();

        if self.question.trim().is_empty() {
            issues.push(PayloadIssue::at(index, "question text is empty"));
        }

        if self.options.is_empty() {
            issues.push(PayloadIssue::at(index, "options are empty"));
            return issues;
        }

        if self.options.keys().any(|k| k.trim().is_empty()) {
            issues.push(PayloadIssue::at(index, "option key is empty"));
        }

        if !self.options.contains_key(&self.correct_answer) {
            let keys: Vec<&str> = self.options.keys().collect();
            issues.push(PayloadIssue::at(
                index,
                format!(
                    "correct_answer `{}` is not one of the option keys [{}]",
                    self.correct_answer,
                    keys.join(", ")
                ),
            ));
        }

        issues
    }
}

/// A validated, immutable mock test.
///
/// Only constructible through [`MockTest::new`] (or the payload parser, which
/// calls it), so every `MockTest` in circulation satisfies the contract:
/// at least one question, non-empty options, and a `correct_answer` that is
/// one of the option keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockTest {
    /// Identifier assigned by the backend, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Document the test was generated from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Creation timestamp as reported by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    questions: Vec<Question>,
}

impl MockTest {
    /// Validate questions and build a test. Any issue rejects the whole test.
    pub fn new(questions: Vec<Question>) -> Result<Self, PayloadError> {
        let issues = validate_questions(&questions);
        if !issues.is_empty() {
            return Err(PayloadError::Invalid { issues });
        }
        Ok(Self {
            id: None,
            document_id: None,
            created_at: None,
            questions,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Keep at most `max` questions. A zero `max` is ignored so the test
    /// stays non-empty.
    pub fn truncated(mut self, max: usize) -> Self {
        if max > 0 && self.questions.len() > max {
            tracing::warn!(
                "test has {} questions, keeping the first {max}",
                self.questions.len()
            );
            self.questions.truncate(max);
        }
        self
    }
}

/// Validate a question list, returning every issue found.
pub fn validate_questions(questions: &[Question]) -> Vec<PayloadIssue> {
    if questions.is_empty() {
        return vec![PayloadIssue::payload("test contains no questions")];
    }
    questions
        .iter()
        .enumerate()
        .flat_map(|(i, q)| q.issues(i))
        .collect()
}

/// A generated flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> Question {
        Question {
            question: "What is 2 + 2?".into(),
            options: [("A", "3"), ("B", "4"), ("C", "5")].into_iter().collect(),
            correct_answer: correct.into(),
        }
    }

    #[test]
    fn options_keep_input_order() {
        let json = r#"{"D": "four", "A": "one", "C": "three", "B": "two"}"#;
        let options: OptionList = serde_json::from_str(json).unwrap();
        assert_eq!(options.keys().collect::<Vec<_>>(), vec!["D", "A", "C", "B"]);
        assert_eq!(options.get("C"), Some("three"));

        let back = serde_json::to_string(&options).unwrap();
        assert_eq!(back, r#"{"D":"four","A":"one","C":"three","B":"two"}"#);
    }

    #[test]
    fn options_reject_duplicate_keys() {
        let json = r#"{"A": "one", "A": "uno"}"#;
        let err = serde_json::from_str::<OptionList>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate option key `A`"));
    }

    #[test]
    fn push_ignores_duplicates() {
        let mut options = OptionList::new();
        assert!(options.push("A", "one"));
        assert!(!options.push("A", "again"));
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("A"), Some("one"));
    }

    #[test]
    fn valid_question_has_no_issues() {
        assert!(question("B").issues(0).is_empty());
    }

    #[test]
    fn correct_answer_must_be_an_option_key() {
        let issues = question("E").issues(2);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].question, Some(2));
        assert!(issues[0].message.contains("`E`"));
        assert!(issues[0].message.contains("[A, B, C]"));
    }

    #[test]
    fn empty_options_and_text_are_reported() {
        let q = Question {
            question: "  ".into(),
            options: OptionList::new(),
            correct_answer: "A".into(),
        };
        let issues = q.issues(0);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.message == "question text is empty"));
        assert!(issues.iter().any(|i| i.message == "options are empty"));
    }

    #[test]
    fn mock_test_rejects_whole_payload() {
        let err = MockTest::new(vec![question("A"), question("Z"), question("C")]).unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].question, Some(1));
    }

    #[test]
    fn mock_test_rejects_empty_question_list() {
        let err = MockTest::new(vec![]).unwrap_err();
        assert!(err.to_string().contains("no questions"));
    }

    #[test]
    fn truncated_keeps_leading_questions() {
        let test = MockTest::new(vec![question("A"), question("B"), question("C")]).unwrap();
        let test = test.truncated(2);
        assert_eq!(test.len(), 2);
        assert_eq!(test.questions()[1].correct_answer, "B");
        assert_eq!(test.truncated(0).len(), 2);
    }
}
