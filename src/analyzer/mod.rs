//! External analyzer boundary
//!
//! The analyzer is the only component that looks at program source. It takes the
//! raw source text and answers with a trace document as text (JSON, possibly
//! fenced), or fails. Parsing and validating that text is not its job; see
//! [`TraceDocument::parse_response`](crate::trace::TraceDocument::parse_response).
//!
//! Two implementations ship with the crate:
//! - [`RecordedTrace`]: replays a trace saved to disk
//! - [`CommandAnalyzer`]: pipes the source through an external program

mod command;
mod recorded;

pub use command::CommandAnalyzer;
pub use recorded::RecordedTrace;

use crate::trace::TraceError;

/// Something that can turn source text into a raw trace response
pub trait Analyzer: Send + Sync {
    /// Name used in logs and status messages
    fn name(&self) -> &str;

    /// Produce the raw response for `source`. Blocks until the analyzer answers.
    fn analyze(&self, source: &str) -> Result<String, TraceError>;
}
