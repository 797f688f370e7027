//! Analysis session
//!
//! An [`AnalysisSession`] ties one analyzer to one [`PlaybackController`] and
//! owns the single in-flight analysis request, if any.
//!
//! # Request lifecycle
//!
//! 1. [`AnalysisSession::submit`] rejects blank source up front, then cancels any
//!    pending auto-advance, drops the current document (controller goes `Idle`),
//!    and starts the analyzer on a worker thread.
//! 2. The caller keeps polling [`AnalysisSession::poll_analysis`] from its event
//!    loop. When the worker answers, the response is parsed and loaded, or the
//!    failure message is surfaced through the controller.
//! 3. Each request is numbered. A response whose number is no longer current
//!    (because the request was cancelled or a newer one was submitted) is
//!    discarded unseen. The worker itself is never interrupted.

use crate::analyzer::Analyzer;
use crate::playback::PlaybackController;
use crate::trace::{TraceDocument, TraceError};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

struct AnalysisOutcome {
    generation: u64,
    result: Result<TraceDocument, TraceError>,
}

struct InFlight {
    generation: u64,
    receiver: Receiver<AnalysisOutcome>,
}

pub struct AnalysisSession {
    analyzer: Arc<dyn Analyzer>,
    controller: PlaybackController,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl AnalysisSession {
    pub fn new(analyzer: Arc<dyn Analyzer>, controller: PlaybackController) -> Self {
        AnalysisSession {
            analyzer,
            controller,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Whether a request is outstanding; callers should not submit another
    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start analyzing `source` in the background
    pub fn submit(&mut self, source: &str) -> Result<(), TraceError> {
        let generation = self.begin(source)?;

        let (sender, receiver) = mpsc::channel();
        let analyzer = Arc::clone(&self.analyzer);
        let source = source.to_string();

        let spawned = thread::Builder::new()
            .name("analyzer".to_string())
            .spawn(move || {
                let result = run_analyzer(analyzer.as_ref(), &source);
                // The session may have moved on and dropped the receiver
                let _ = sender.send(AnalysisOutcome { generation, result });
            });

        if let Err(e) = spawned {
            let err = TraceError::AnalyzerUnavailable(format!("cannot start analysis: {}", e));
            self.controller.fail(err.to_string());
            return Err(err);
        }

        self.in_flight = Some(InFlight {
            generation,
            receiver,
        });
        Ok(())
    }

    /// Analyze `source` on the calling thread and load the result
    pub fn analyze_blocking(&mut self, source: &str) -> Result<(), TraceError> {
        self.begin(source)?;
        let result = run_analyzer(self.analyzer.as_ref(), source);
        self.apply(result)
    }

    /// Check for a finished request without blocking.
    ///
    /// Returns `None` while nothing new has happened, otherwise the outcome that
    /// was applied to the controller.
    pub fn poll_analysis(&mut self) -> Option<Result<(), TraceError>> {
        let received = self.in_flight.as_ref()?.receiver.try_recv();

        let outcome = match received {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                let err = TraceError::AnalyzerUnavailable(
                    "analysis stopped without an answer".to_string(),
                );
                warn!("{}", err);
                self.controller.fail(err.to_string());
                return Some(Err(err));
            }
        };

        if outcome.generation != self.generation {
            debug!(
                "discarding stale analysis result (request {}, current {})",
                outcome.generation, self.generation
            );
            return None;
        }

        self.in_flight = None;
        Some(self.apply(outcome.result))
    }

    /// Supersede the outstanding request; its answer will be ignored
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!("cancelled analysis request {}", in_flight.generation);
        }
        self.generation += 1;
    }

    /// Common preamble: validate input, retire the old request and document
    fn begin(&mut self, source: &str) -> Result<u64, TraceError> {
        if source.trim().is_empty() {
            let err = TraceError::UserInput("Nothing to analyze: the source is empty".to_string());
            self.controller.fail(err.to_string());
            return Err(err);
        }

        self.cancel();
        self.controller.clear();
        info!(
            "analysis request {} started with {}",
            self.generation,
            self.analyzer.name()
        );
        Ok(self.generation)
    }

    fn apply(&mut self, result: Result<TraceDocument, TraceError>) -> Result<(), TraceError> {
        match result {
            Ok(document) => {
                let steps = document.len();
                self.controller.load(document)?;
                info!("analysis request {} loaded {} steps", self.generation, steps);
                Ok(())
            }
            Err(err) => {
                if err.is_analyzer_fault() {
                    warn!("analysis request {} failed: {}", self.generation, err);
                }
                self.controller.fail(err.to_string());
                Err(err)
            }
        }
    }
}

fn run_analyzer(analyzer: &dyn Analyzer, source: &str) -> Result<TraceDocument, TraceError> {
    let response = analyzer.analyze(source)?;
    Ok(TraceDocument::parse_response(&response)?)
}
