//! HTML session renderer.
//!
//! Produces a self-contained HTML page with all CSS inlined. Inputs are
//! rendered disabled once the session is submitted.

use anyhow::Result;
use std::path::Path;

use studybuddy_core::report::AttemptReport;
use studybuddy_core::session::{Classification, TestSession};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// CSS class list for an option label.
pub fn option_class(classification: Classification) -> &'static str {
    match classification {
        Classification::Unselected => "option",
        Classification::Selected => "option selected",
        Classification::Correct => "option correct",
        Classification::IncorrectChoice => "option incorrect",
    }
}

/// Generate an HTML page for a session.
pub fn generate_html(session: &TestSession) -> String {
    let mut html = String::new();
    let summary = session.summary();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>studybuddy mock test</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"mock-test-container\">\n");
    html.push_str("<h2>Mock Test</h2>\n");
    if let Some(doc) = &session.test().document_id {
        html.push_str(&format!(
            "<p class=\"meta\">Document: <strong>{}</strong> | {} questions | {}</p>\n",
            html_escape(doc),
            summary.total,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    for view in session.question_views() {
        html.push_str("<div class=\"question-block\">\n");
        html.push_str(&format!(
            "<p class=\"question-text\">{}. {}</p>\n",
            view.number(),
            html_escape(&view.question)
        ));
        html.push_str("<div class=\"options-container\">\n");
        for option in &view.options {
            let checked = if session.answer(view.index) == Some(option.key.as_str()) {
                " checked"
            } else {
                ""
            };
            let disabled = if view.locked { " disabled" } else { "" };
            html.push_str(&format!(
                "<label class=\"{}\"><input type=\"radio\" name=\"question-{}\" value=\"{}\"{}{}> <strong>{}:</strong> {}</label>\n",
                option_class(option.classification),
                view.index,
                html_escape(&option.key),
                checked,
                disabled,
                html_escape(&option.key),
                html_escape(&option.text)
            ));
        }
        html.push_str("</div>\n</div>\n");
    }

    match summary.score {
        Some(score) => {
            html.push_str("<div class=\"score-container\">\n");
            html.push_str("<h3>Test Complete!</h3>\n");
            html.push_str(&format!(
                "<p>Your Score: <strong>{}</strong> out of <strong>{}</strong></p>\n",
                score, summary.total
            ));
            html.push_str("</div>\n");
        }
        None => {
            html.push_str(&format!(
                "<p class=\"meta\">{} of {} answered</p>\n",
                session.answered_count(),
                summary.total
            ));
        }
    }

    if let Some(report) = AttemptReport::from_session(session) {
        html.push_str("<section class=\"raw-data\">\n");
        html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
        html.push_str("<pre><code>");
        html.push_str(
            &serde_json::to_string_pretty(&report)
                .unwrap_or_default()
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        );
        html.push_str("</code></pre>\n");
        html.push_str("</details>\n</section>\n");
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Write an HTML page for a session to a file.
pub fn write_html_report(session: &TestSession, path: &Path) -> Result<()> {
    let html = generate_html(session);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --selected: #dbeafe; --correct: #dcfce7; --incorrect: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --selected: #1e3a8a; --correct: #064e3b; --incorrect: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.meta { color: #6b7280; }
.question-block { margin: 1.5rem 0; padding: 1rem; border: 1px solid var(--border); border-radius: 8px; }
.question-text { font-weight: bold; }
.options-container { display: flex; flex-direction: column; gap: 0.5rem; }
.option { display: block; padding: 0.5rem 1rem; border: 1px solid var(--border); border-radius: 6px; }
.option.selected { background: var(--selected); }
.option.correct { background: var(--correct); }
.option.incorrect { background: var(--incorrect); }
.score-container { margin-top: 2rem; text-align: center; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
