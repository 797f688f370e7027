// Integration tests for trace loading and playback

use algotracer::analyzer::{Analyzer, RecordedTrace};
use algotracer::playback::{PlaybackController, PlaybackStatus};
use algotracer::session::AnalysisSession;
use algotracer::trace::{InvalidTraceError, TraceDocument, TraceError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_secs(1);

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}

fn load_demo(name: &str) -> TraceDocument {
    let response = RecordedTrace::new(demo(name))
        .analyze("")
        .expect("demo trace should be readable");
    TraceDocument::parse_response(&response).expect("demo trace should parse")
}

fn loaded_controller() -> PlaybackController {
    let mut controller = PlaybackController::new(INTERVAL);
    controller
        .load(load_demo("bubble_sort.trace.json"))
        .expect("demo trace should load");
    controller
}

#[test]
fn test_recorded_session_loads_paused_at_first_step() {
    let mut session = AnalysisSession::new(
        Arc::new(RecordedTrace::new(demo("bubble_sort.trace.json"))),
        PlaybackController::new(INTERVAL),
    );

    session
        .analyze_blocking("function bubbleSort(arr) {}")
        .expect("analysis should succeed");

    let controller = session.controller();
    assert_eq!(controller.status(), PlaybackStatus::Paused);
    assert_eq!(controller.index(), 0);
    assert_eq!(controller.total_steps(), 29);
    assert!(controller.error().is_none());
}

#[test]
fn test_background_session_delivers_trace() {
    let mut session = AnalysisSession::new(
        Arc::new(RecordedTrace::new(demo("bubble_sort.trace.json"))),
        PlaybackController::new(INTERVAL),
    );
    session.submit("let x = 1;").expect("submit should start");
    assert!(session.is_analyzing());

    let deadline = Instant::now() + Duration::from_secs(10);
    let outcome = loop {
        if let Some(outcome) = session.poll_analysis() {
            break outcome;
        }
        assert!(Instant::now() < deadline, "analysis did not finish");
        std::thread::sleep(Duration::from_millis(5));
    };

    assert!(outcome.is_ok());
    assert!(!session.is_analyzing());
    assert_eq!(session.controller().total_steps(), 29);
}

#[test]
fn test_missing_recording_is_analyzer_unavailable() {
    let mut session = AnalysisSession::new(
        Arc::new(RecordedTrace::new(demo("no_such_trace.json"))),
        PlaybackController::new(INTERVAL),
    );
    let err = session.analyze_blocking("x = 1").unwrap_err();
    assert!(matches!(err, TraceError::AnalyzerUnavailable(_)));
    assert_eq!(session.controller().status(), PlaybackStatus::Idle);
    assert!(session.controller().error().is_some());
}

#[test]
fn test_stepping_saturates_at_both_ends() {
    let mut controller = loaded_controller();
    let last = controller.total_steps() - 1;

    assert!(!controller.step_backward());
    assert_eq!(controller.index(), 0);

    for _ in 0..100 {
        controller.step_forward();
    }
    assert_eq!(controller.index(), last);
    assert!(!controller.step_forward());
    assert_eq!(controller.status(), PlaybackStatus::Paused);

    // forward then back returns to the same index
    controller.reset();
    controller.step_forward();
    controller.step_forward();
    controller.step_backward();
    assert_eq!(controller.index(), 1);
}

#[test]
fn test_play_runs_to_the_end_and_pauses() {
    let mut controller = loaded_controller();
    let total = controller.total_steps();
    let start = Instant::now();

    assert!(controller.play(start));

    // Poll far in the future: every due advance fires, one per interval
    let advanced = controller.poll(start + INTERVAL * (total as u32 + 10));
    assert_eq!(advanced, total - 1);
    assert_eq!(controller.index(), total - 1);
    assert_eq!(controller.status(), PlaybackStatus::Paused);
    assert!(controller.pending_advance().is_none());

    // No-op at the last step
    assert!(!controller.play(start));
    assert_eq!(controller.status(), PlaybackStatus::Paused);
}

#[test]
fn test_play_advances_once_per_interval() {
    let mut controller = loaded_controller();
    let start = Instant::now();
    controller.play(start);

    assert_eq!(controller.poll(start + Duration::from_millis(999)), 0);
    assert_eq!(controller.poll(start + Duration::from_millis(1000)), 1);
    assert_eq!(controller.poll(start + Duration::from_millis(2500)), 1);
    assert_eq!(controller.index(), 2);
    assert!(controller.is_playing());
}

#[test]
fn test_reload_cancels_pending_advance() {
    let mut controller = loaded_controller();
    let start = Instant::now();
    controller.play(start);
    let stale = controller
        .pending_advance()
        .expect("playing schedules an advance");

    controller
        .load(load_demo("bubble_sort.trace.json"))
        .expect("reload should succeed");

    assert!(!controller.fire(stale.ticket));
    assert_eq!(controller.poll(start + INTERVAL * 5), 0);
    assert_eq!(controller.index(), 0);
    assert_eq!(controller.status(), PlaybackStatus::Paused);
}

#[test]
fn test_empty_steps_are_rejected() {
    let err = TraceDocument::parse_response(r#"{"language": "js", "steps": []}"#).unwrap_err();
    assert!(matches!(err, InvalidTraceError::NoSteps));

    let mut session = AnalysisSession::new(
        Arc::new(StaticResponse(r#"{"steps": []}"#)),
        PlaybackController::new(INTERVAL),
    );
    let err = session.analyze_blocking("x = 1").unwrap_err();
    assert!(matches!(err, TraceError::MalformedTrace(_)));
    assert_eq!(session.controller().status(), PlaybackStatus::Idle);
}

#[test]
fn test_reported_error_blocks_playback() {
    let mut session = AnalysisSession::new(
        Arc::new(StaticResponse(
            r#"{"error": "Could not parse the program", "steps": []}"#,
        )),
        PlaybackController::new(INTERVAL),
    );
    let err = session.analyze_blocking("x = (").unwrap_err();
    assert_eq!(err.to_string(), "Could not parse the program");

    let controller = session.controller_mut();
    assert_eq!(controller.error(), Some("Could not parse the program"));
    assert!(!controller.play(Instant::now()));
    assert!(!controller.step_forward());
    assert_eq!(controller.status(), PlaybackStatus::Idle);
}

#[test]
fn test_blank_source_never_reaches_the_analyzer() {
    let mut session = AnalysisSession::new(
        Arc::new(RecordedTrace::new(demo("bubble_sort.trace.json"))),
        PlaybackController::new(INTERVAL),
    );
    let err = session.submit("   \n").unwrap_err();
    assert!(matches!(err, TraceError::UserInput(_)));
    assert!(!session.is_analyzing());
}

struct StaticResponse(&'static str);

impl Analyzer for StaticResponse {
    fn name(&self) -> &str {
        "static"
    }

    fn analyze(&self, _source: &str) -> Result<String, TraceError> {
        Ok(self.0.to_string())
    }
}
