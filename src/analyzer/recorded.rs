//! Analyzer that replays a trace file

use super::Analyzer;
use crate::trace::TraceError;
use std::fs;
use std::path::{Path, PathBuf};

/// Answers every request with the contents of a previously saved trace
#[derive(Debug, Clone)]
pub struct RecordedTrace {
    path: PathBuf,
    name: String,
}

impl RecordedTrace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("recorded:{}", path.display());
        RecordedTrace { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Analyzer for RecordedTrace {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, _source: &str) -> Result<String, TraceError> {
        fs::read_to_string(&self.path).map_err(|e| {
            TraceError::AnalyzerUnavailable(format!(
                "cannot read trace '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}
