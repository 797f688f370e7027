//! Analyzer backed by an external program
//!
//! The program receives the source on stdin and must print the trace on stdout.
//! This is how a model-backed analyzer (or any other tool) is plugged in without
//! this crate knowing anything about prompts or providers.

use super::Analyzer;
use crate::trace::TraceError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
    name: String,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        let name = format!("command:{}", program);
        CommandAnalyzer {
            program,
            args,
            name,
        }
    }

    /// Build from a command line split on whitespace. No shell quoting is
    /// interpreted; wrap anything fancier in a script.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Analyzer for CommandAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, source: &str) -> Result<String, TraceError> {
        debug!("spawning analyzer {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TraceError::AnalyzerUnavailable(format!("cannot start '{}': {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading stdin closes the pipe early
            match stdin.write_all(source.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                    return Err(TraceError::AnalyzerUnavailable(format!(
                        "cannot send source to '{}': {}",
                        self.program, e
                    )));
                }
                _ => {}
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            TraceError::AnalyzerUnavailable(format!("'{}' did not finish: {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TraceError::AnalyzerUnavailable(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).into_owned();
        if response.trim().is_empty() {
            return Err(TraceError::AnalyzerUnavailable(format!(
                "no response from '{}'",
                self.program
            )));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let analyzer = CommandAnalyzer::parse("  tracer --model small  ").unwrap();
        assert_eq!(analyzer.program(), "tracer");
        assert_eq!(analyzer.args(), ["--model", "small"]);
        assert_eq!(analyzer.name(), "command:tracer");
        assert!(CommandAnalyzer::parse("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let analyzer = CommandAnalyzer::new("algotracer-no-such-analyzer", Vec::new());
        let err = analyzer.analyze("x = 1").unwrap_err();
        assert!(matches!(err, TraceError::AnalyzerUnavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_the_response() {
        let analyzer = CommandAnalyzer::parse("cat").unwrap();
        let response = analyzer.analyze("{\"steps\": [{}]}").unwrap();
        assert_eq!(response, "{\"steps\": [{}]}");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_unavailable() {
        let analyzer = CommandAnalyzer::parse("false").unwrap();
        let err = analyzer.analyze("x = 1").unwrap_err();
        assert!(matches!(err, TraceError::AnalyzerUnavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_unavailable() {
        let analyzer = CommandAnalyzer::parse("true").unwrap();
        let err = analyzer.analyze("x = 1").unwrap_err();
        assert!(err.to_string().contains("no response"));
    }
}
