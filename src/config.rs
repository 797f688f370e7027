//! Command-line configuration

use crate::analyzer::{Analyzer, CommandAnalyzer, RecordedTrace};
use crate::constants::{DEFAULT_INTERVAL_MS, SAMPLE_SOURCE};
use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "algotracer",
    version,
    about = "Step through an analyzer-produced execution trace in the terminal"
)]
pub struct Config {
    /// Source file to trace (defaults to a bundled bubble sort sample)
    pub source: Option<PathBuf>,

    /// Replay a saved trace instead of calling an analyzer
    #[arg(long, value_name = "JSON")]
    pub trace: Option<PathBuf>,

    /// External analyzer: reads source on stdin, prints the trace on stdout
    #[arg(long, value_name = "COMMAND")]
    pub analyzer: Option<String>,

    /// Milliseconds between steps while playing
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Pick the analyzer: a saved trace wins over a command.
    /// `None` when neither is configured.
    pub fn build_analyzer(&self) -> Option<Arc<dyn Analyzer>> {
        if let Some(path) = &self.trace {
            return Some(Arc::new(RecordedTrace::new(path)));
        }
        let command = CommandAnalyzer::parse(self.analyzer.as_deref()?)?;
        Some(Arc::new(command))
    }

    /// Read the source file, or fall back to the bundled sample
    pub fn load_source(&self) -> io::Result<String> {
        match &self.source {
            Some(path) => fs::read_to_string(path),
            None => Ok(SAMPLE_SOURCE.to_string()),
        }
    }
}
