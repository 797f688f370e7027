//! Error types for trace acquisition and loading
//!
//! [`TraceError`] is the taxonomy surfaced to the user: the analyzer could not be
//! reached, it returned something that is not a usable trace, or the request was
//! rejected before the analyzer was called. [`InvalidTraceError`] is the narrower
//! failure produced when a document is parsed or loaded into playback.
//!
//! Every variant renders as a single user-facing message.

use thiserror::Error;

/// A trace document that cannot be played back
#[derive(Debug, Error)]
pub enum InvalidTraceError {
    /// The analyzer filled in the `error` field; the text is shown verbatim
    #[error("{0}")]
    Reported(String),

    /// The analyzer returned zero steps without reporting an error
    #[error("Analyzer returned a trace with no steps")]
    NoSteps,

    /// The response is not JSON, or a field has the wrong type
    #[error("Analyzer response is not a valid trace: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by an analysis request
#[derive(Debug, Error)]
pub enum TraceError {
    /// Network, process or service failure in the external analyzer
    #[error("Analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),

    #[error(transparent)]
    MalformedTrace(#[from] InvalidTraceError),

    /// Rejected before the analyzer was called
    #[error("{0}")]
    UserInput(String),
}

impl TraceError {
    /// Whether the failure came from the analyzer rather than from the caller
    pub fn is_analyzer_fault(&self) -> bool {
        !matches!(self, TraceError::UserInput(_))
    }
}
