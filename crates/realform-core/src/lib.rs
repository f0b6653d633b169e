//! realform-core: Scoring, aggregation, and session state for the REAL rating form.
//!
//! This crate defines the questionnaire data model, the answer scorer, the
//! report aggregator, and the survey session state machine that the CLI and
//! the renderers build on.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod plan;
pub mod report;
pub mod scoring;
pub mod session;
