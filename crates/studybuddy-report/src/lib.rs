//! Rendering of studybuddy mock test sessions.
//!
//! Both renderers work from the session's `QuestionView`s, so terminal and
//! HTML output always agree on which options are selected, correct, or
//! wrong.

pub mod html;
pub mod text;
