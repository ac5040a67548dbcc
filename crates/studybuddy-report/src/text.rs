//! Plain-text session renderer for terminals.

use studybuddy_core::session::{Classification, TestSession};
use studybuddy_core::view::QuestionView;

/// Marker shown in front of an option.
fn marker(classification: Classification) -> &'static str {
    match classification {
        Classification::Unselected => "[ ]",
        Classification::Selected => "[x]",
        Classification::Correct => "[+]",
        Classification::IncorrectChoice => "[-]",
    }
}

/// Render one question with its options.
pub fn render_question(view: &QuestionView) -> String {
    let mut out = format!("{}. {}\n", view.number(), view.question);
    for option in &view.options {
        out.push_str(&format!(
            "   {} {}: {}\n",
            marker(option.classification),
            option.key,
            option.text
        ));
    }
    out
}

/// Render the whole session, followed by the score line once submitted.
pub fn render_session(session: &TestSession) -> String {
    let mut out = String::new();
    for view in session.question_views() {
        out.push_str(&render_question(&view));
        out.push('\n');
    }

    let summary = session.summary();
    match summary.score {
        Some(score) => out.push_str(&format!(
            "Test Complete! Your score: {score} out of {}\n",
            summary.total
        )),
        None => out.push_str(&format!(
            "{} of {} answered\n",
            session.answered_count(),
            summary.total
        )),
    }
    out
}
