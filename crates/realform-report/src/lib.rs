//! realform-report: Text and HTML rendering of survey reports.
//!
//! Markdown and JSON output live on [`realform_core::report::SurveyReport`];
//! this crate adds the terminal tables and the standalone HTML page.

pub mod html;
pub mod text;
