//! The `studybuddy take` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use studybuddy_core::error::InteractionError;
use studybuddy_core::model::Question;
use studybuddy_core::payload::load_payload;
use studybuddy_core::session::TestSession;
use studybuddy_report::text::{render_question, render_session};

use super::SaveFormat;

pub fn execute(payload: PathBuf, output: Option<PathBuf>, format: SaveFormat) -> Result<()> {
    let test = load_payload(&payload)?;
    eprintln!("Mock test: {} questions", test.len());
    eprintln!("Type an option key per question, or leave blank to skip.\n");

    let stdin = std::io::stdin();
    let session = answer_interactively(TestSession::new(test), &mut stdin.lock())?;
    let session = session.submit();

    print!("{}", render_session(&session));
    super::print_summary(&session);

    if let Some(dir) = output {
        super::save_attempt(&session, &dir, format)?;
    }

    Ok(())
}

/// Match typed input against a question's option keys, ignoring ASCII case.
fn resolve_key<'a>(question: &'a Question, input: &'a str) -> &'a str {
    question
        .options
        .keys()
        .find(|k| *k == input)
        .or_else(|| question.options.keys().find(|k| k.eq_ignore_ascii_case(input)))
        .unwrap_or(input)
}

/// Ask every question in turn. Stops early (leaving the rest unanswered)
/// when input runs out.
fn answer_interactively(mut session: TestSession, input: &mut impl BufRead) -> Result<TestSession> {
    let mut stderr = std::io::stderr();
    let views = session.question_views();

    'questions: for view in &views {
        eprint!("{}", render_question(view));
        loop {
            eprint!("Answer: ");
            stderr.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("input closed at question {}", view.number());
                break 'questions;
            }
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            let test = session.test();
            let key = match test.question(view.index) {
                Some(q) => resolve_key(q, line).to_string(),
                None => line.to_string(),
            };
            match session.select_option(view.index, &key) {
                Ok(next) => {
                    session = next;
                    break;
                }
                Err(InteractionError::UnknownOption { key, .. }) => {
                    eprintln!("No option `{key}`, try again.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        eprintln!();
    }

    Ok(session)
}
