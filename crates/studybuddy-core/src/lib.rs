//! Mock test model and scoring engine for studybuddy.
//!
//! This crate defines the question/answer data contract shared with the
//! generation service, the `TestSession` engine that records selections and
//! scores a submitted test, and the per-option classification that drives
//! rendered feedback.

pub mod error;
pub mod model;
pub mod payload;
pub mod report;
pub mod session;
pub mod traits;
pub mod view;

pub use error::{InteractionError, PayloadError, PayloadIssue};
pub use model::{Flashcard, MockTest, OptionList, Question};
pub use session::{AnswerRecord, Classification, SessionState, TestSession};
pub use view::{OptionView, QuestionView, SessionSummary};
