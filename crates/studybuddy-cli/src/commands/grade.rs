//! The `studybuddy grade` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use studybuddy_core::payload::load_payload;
use studybuddy_core::session::TestSession;
use studybuddy_report::text::render_session;

use super::SaveFormat;

/// Answers as written by hand or exported by a front end.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswersFile {
    /// `{"0": "B", "2": "C"}`
    ByIndex(BTreeMap<String, String>),
    /// `["B", null, "C"]`
    InOrder(Vec<Option<String>>),
}

impl AnswersFile {
    fn into_pairs(self) -> Result<Vec<(usize, String)>> {
        match self {
            AnswersFile::ByIndex(map) => map
                .into_iter()
                .map(|(index, key)| {
                    let index = index
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("invalid question index: '{index}'"))?;
                    Ok((index, key))
                })
                .collect(),
            AnswersFile::InOrder(list) => list
                .into_iter()
                .enumerate()
                .filter_map(|(i, a)| a.map(|a| (i, a)))
                .map(Ok)
                .collect(),
        }
    }
}

fn load_answers(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let answers: AnswersFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))?;
    answers.into_pairs()
}

pub fn execute(
    payload: PathBuf,
    answers: PathBuf,
    output: Option<PathBuf>,
    format: SaveFormat,
) -> Result<()> {
    let test = load_payload(&payload)?;
    let answers = load_answers(&answers)?;

    let mut session = TestSession::new(test);
    for (index, key) in &answers {
        session = session
            .select_option(*index, key)
            .context("answers file does not match the mock test")?;
    }
    let session = session.submit();

    print!("{}", render_session(&session));
    super::print_summary(&session);

    if let Some(dir) = output {
        super::save_attempt(&session, &dir, format)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<(usize, String)>> {
        serde_json::from_str::<AnswersFile>(json)?.into_pairs()
    }

    #[test]
    fn answers_by_index() {
        let mut pairs = parse(r#"{"1": "C", "0": "B"}"#).unwrap();
        pairs.sort();
        assert_eq!(pairs, vec![(0, "B".into()), (1, "C".into())]);
    }

    #[test]
    fn answers_in_order_skip_nulls() {
        let pairs = parse(r#"["A", null, "D"]"#).unwrap();
        assert_eq!(pairs, vec![(0, "A".into()), (2, "D".into())]);
    }

    #[test]
    fn non_numeric_index_is_an_error() {
        let err = parse(r#"{"first": "A"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid question index"));
    }
}
