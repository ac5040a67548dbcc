//! The `studybuddy validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use studybuddy_core::error::PayloadError;
use studybuddy_core::payload::parse_payload_str;

pub fn execute(payload_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&payload_path)
        .with_context(|| format!("failed to read payload file: {}", payload_path.display()))?;

    match parse_payload_str(&content) {
        Ok(test) => {
            println!("Mock test: {} questions", test.len());
            println!("Payload valid.");
            Ok(())
        }
        Err(PayloadError::Invalid { issues }) => {
            for issue in &issues {
                let prefix = issue
                    .question
                    .map(|i| format!("  [question {}]", i + 1))
                    .unwrap_or_else(|| "  ".to_string());
                println!("{prefix} ERROR: {}", issue.message);
            }
            anyhow::bail!("payload rejected with {} issue(s)", issues.len())
        }
        Err(e) => Err(e).context("payload rejected"),
    }
}
