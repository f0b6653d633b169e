//! Survey error types.
//!
//! Typed failures for the aggregator and the session state machine. File and
//! config I/O stays on `anyhow` at the crate boundary; these are the errors
//! callers are expected to match on.

use thiserror::Error;

use crate::model::Domain;

/// Errors raised while running a survey session or building its report.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// A domain had no scored categories, so its percentage is undefined.
    #[error("no data for domain {0}")]
    EmptyDomain(Domain),

    /// A session action was attempted from a state that does not allow it.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Free-text input that matches none of the four answer options.
    #[error("unrecognised response: {0:?}")]
    UnknownResponse(String),

    /// The responses store rejected an update. The answer is still held in
    /// the session.
    #[error("failed to save responses: {0}")]
    Persistence(String),

    /// A category question file could not be read or parsed.
    #[error("failed to load questions from {path}: {message}")]
    QuestionFile { path: String, message: String },
}
