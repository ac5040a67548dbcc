pub mod ask;
pub mod flashcards;
pub mod generate;
pub mod grade;
pub mod init;
pub mod take;
pub mod upload;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use studybuddy_core::report::AttemptReport;
use studybuddy_core::session::TestSession;
use studybuddy_report::html::write_html_report;

/// Formats an attempt can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveFormat {
    Json,
    Html,
    All,
}

impl SaveFormat {
    fn json(self) -> bool {
        matches!(self, SaveFormat::Json | SaveFormat::All)
    }

    fn html(self) -> bool {
        matches!(self, SaveFormat::Html | SaveFormat::All)
    }
}

/// Save a submitted session in the requested formats.
pub fn save_attempt(session: &TestSession, output: &Path, format: SaveFormat) -> Result<()> {
    let report = AttemptReport::from_session(session)
        .ok_or_else(|| anyhow::anyhow!("cannot save an attempt that was not submitted"))?;

    std::fs::create_dir_all(output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    if format.json() {
        let path = output.join(format!("attempt-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Attempt saved to: {}", path.display());
    }
    if format.html() {
        let path = output.join(format!("attempt-{timestamp}.html"));
        write_html_report(session, &path)?;
        eprintln!("HTML report: {}", path.display());
    }

    Ok(())
}

/// Score table for a submitted session, `None` while still answering.
fn summary_table(session: &TestSession) -> Option<Table> {
    let report = AttemptReport::from_session(session)?;
    let missed: Vec<String> = report
        .missed()
        .map(|q| (q.index + 1).to_string())
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["Score", "Percent", "Answered", "Missed"]);
    table.add_row(vec![
        Cell::new(format!("{}/{}", report.score, report.total)),
        Cell::new(format!("{:.1}%", report.percentage())),
        Cell::new(session.answered_count()),
        Cell::new(if missed.is_empty() {
            "-".to_string()
        } else {
            missed.join(", ")
        }),
    ]);
    Some(table)
}

/// Print the score table for a submitted session.
pub fn print_summary(session: &TestSession) {
    if let Some(table) = summary_table(session) {
        eprintln!("\n{table}");
    }
}
