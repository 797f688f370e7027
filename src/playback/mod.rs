//! Playback controller
//!
//! [`PlaybackController`] is the single source of truth for which step of a
//! [`TraceDocument`] is visible and whether time is advancing on its own.
//!
//! # States
//!
//! - `Idle`: no document. A rejected document or a failed analysis also lands
//!   here, with the failure message available through [`PlaybackController::error`].
//! - `Paused`: document loaded, index moves only on request.
//! - `Playing`: the index advances by one every interval until the last step,
//!   then the controller pauses by itself. Playback never wraps.
//!
//! # Timing
//!
//! Auto-advance is a cooperative timer owned by the controller (see [`timer`]).
//! The caller drives it by passing the current time to [`PlaybackController::poll`].
//! Every transition away from `Playing` and every document change cancels the
//! pending advance before the new state is committed, so a tick scheduled for an
//! old document can never move the index of a new one.

pub mod timer;

use crate::trace::{InvalidTraceError, Step, TraceDocument};
use std::time::{Duration, Instant};
use timer::{AdvanceTimer, ScheduledAdvance};
use tracing::debug;

/// One "time unit" between auto-advances
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Paused,
    Playing,
}

impl PlaybackStatus {
    /// Label shown in the status bar
    pub fn label(self) -> &'static str {
        match self {
            PlaybackStatus::Idle => "Idle",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Playing => "Running",
        }
    }
}

#[derive(Debug)]
pub struct PlaybackController {
    document: Option<TraceDocument>,
    index: usize,
    status: PlaybackStatus,
    error: Option<String>,
    interval: Duration,
    timer: AdvanceTimer,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl PlaybackController {
    pub fn new(interval: Duration) -> Self {
        PlaybackController {
            document: None,
            index: 0,
            status: PlaybackStatus::Idle,
            error: None,
            interval,
            timer: AdvanceTimer::new(),
        }
    }

    /// Replace the current document and rewind to the first step, paused.
    ///
    /// A document with an `error` or without steps is rejected: the controller
    /// ends up `Idle` and exposes the message through [`Self::error`].
    pub fn load(&mut self, document: TraceDocument) -> Result<(), InvalidTraceError> {
        self.timer.cancel();
        self.index = 0;

        if let Err(e) = document.validate() {
            debug!("rejected trace document: {}", e);
            self.document = None;
            self.status = PlaybackStatus::Idle;
            self.error = Some(e.to_string());
            return Err(e);
        }

        debug!("loaded trace document with {} steps", document.len());
        self.document = Some(document);
        self.status = PlaybackStatus::Paused;
        self.error = None;
        Ok(())
    }

    /// Drop the document and any failure message
    pub fn clear(&mut self) {
        self.timer.cancel();
        self.document = None;
        self.index = 0;
        self.status = PlaybackStatus::Idle;
        self.error = None;
    }

    /// Drop the document and surface `message` instead
    pub fn fail(&mut self, message: impl Into<String>) {
        self.clear();
        self.error = Some(message.into());
    }

    /// Start auto-advancing. Returns whether playback actually started: it does
    /// not without a document, when already playing, or at the last step.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.document.is_none() || self.status == PlaybackStatus::Playing || self.at_end() {
            return false;
        }
        self.status = PlaybackStatus::Playing;
        let advance = self.timer.schedule(now + self.interval);
        debug!("playing from step {} (ticket {})", self.index, advance.ticket);
        true
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.timer.cancel();
            self.status = PlaybackStatus::Paused;
            debug!("paused at step {}", self.index);
        }
    }

    /// Play when paused, pause when playing
    pub fn toggle(&mut self, now: Instant) {
        if self.status == PlaybackStatus::Playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Move one step forward, saturating at the last step.
    /// Returns whether the index changed. The play/pause status is left alone;
    /// when playing, the next due advance pauses at the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.document.is_none() || self.at_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move one step back, saturating at the first step.
    /// Returns whether the index changed.
    pub fn step_backward(&mut self) -> bool {
        if self.document.is_none() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Rewind to the first step and pause, keeping the document
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.index = 0;
        if self.document.is_some() {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Fire every advance that is due at `now`. Returns how many steps were taken.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut advanced = 0;
        while let Some(ticket) = self.timer.due(now) {
            if self.fire(ticket) {
                advanced += 1;
            }
        }
        advanced
    }

    /// Fire the scheduled advance identified by `ticket`.
    ///
    /// Stale tickets (cancelled, replaced, or belonging to a previous document)
    /// are ignored. Returns whether the index changed.
    pub fn fire(&mut self, ticket: u64) -> bool {
        let Some(advance) = self.timer.take(ticket) else {
            debug!("ignoring stale advance (ticket {})", ticket);
            return false;
        };
        if self.status != PlaybackStatus::Playing {
            return false;
        }

        let moved = self.step_forward();
        if self.at_end() {
            self.status = PlaybackStatus::Paused;
            debug!("playback reached the last step");
        } else {
            self.timer.schedule(advance.due + self.interval);
        }
        moved
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn document(&self) -> Option<&TraceDocument> {
        self.document.as_ref()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.document.as_ref()?.step(self.index)
    }

    /// Number of steps in the loaded document, 0 when idle
    pub fn total_steps(&self) -> usize {
        self.document.as_ref().map_or(0, TraceDocument::len)
    }

    /// Message of the last rejected document or failed analysis
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pending_advance(&self) -> Option<ScheduledAdvance> {
        self.timer.pending()
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// True at the last step, and trivially true without a document
    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.total_steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Step;

    fn document(steps: usize) -> TraceDocument {
        TraceDocument {
            steps: (0..steps)
                .map(|i| Step {
                    line: i as i64 + 1,
                    ..Step::default()
                })
                .collect(),
            ..TraceDocument::default()
        }
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = PlaybackController::default();
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert_eq!(controller.total_steps(), 0);
        assert!(controller.current_step().is_none());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_load_pauses_at_first_step() {
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.current_step().map(|s| s.line), Some(1));
    }

    #[test]
    fn test_step_forward_saturates() {
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        assert!(controller.step_forward());
        assert!(controller.step_forward());
        assert!(!controller.step_forward());
        assert!(!controller.step_forward());
        assert_eq!(controller.index(), 2);
    }

    #[test]
    fn test_step_backward_from_start_is_noop() {
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        assert!(!controller.step_backward());
        assert_eq!(controller.index(), 0);
        controller.step_forward();
        assert!(controller.step_backward());
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn test_rejected_document_leaves_controller_idle() {
        let mut controller = PlaybackController::default();
        let failed = TraceDocument {
            error: Some("Cannot visualize".to_string()),
            ..document(3)
        };
        assert!(controller.load(failed).is_err());
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert_eq!(controller.error(), Some("Cannot visualize"));

        let now = Instant::now();
        assert!(!controller.play(now));
        assert!(!controller.step_forward());
        assert_eq!(controller.poll(now + secs(10)), 0);
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn test_rejected_document_replaces_previous_one() {
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        controller.step_forward();
        assert!(controller.load(document(0)).is_err());
        assert!(controller.document().is_none());
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn test_play_advances_once_per_interval() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(4)).unwrap();
        assert!(controller.play(start));

        assert_eq!(controller.poll(start), 0);
        assert_eq!(controller.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(controller.poll(start + secs(1)), 1);
        assert_eq!(controller.index(), 1);
        assert!(controller.is_playing());
        assert_eq!(controller.poll(start + secs(2)), 1);
        assert_eq!(controller.index(), 2);
    }

    #[test]
    fn test_play_stops_at_last_step() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(4)).unwrap();
        controller.play(start);

        controller.poll(start + secs(10));
        assert_eq!(controller.index(), 3);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert!(controller.pending_advance().is_none());

        controller.poll(start + secs(20));
        assert_eq!(controller.index(), 3);
    }

    #[test]
    fn test_play_at_last_step_is_noop() {
        let mut controller = PlaybackController::default();
        controller.load(document(2)).unwrap();
        controller.step_forward();
        assert!(!controller.play(Instant::now()));
        assert_eq!(controller.status(), PlaybackStatus::Paused);

        let mut single = PlaybackController::default();
        single.load(document(1)).unwrap();
        assert!(!single.play(Instant::now()));
    }

    #[test]
    fn test_play_while_playing_keeps_schedule() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(5)).unwrap();
        controller.play(start);
        let pending = controller.pending_advance();
        assert!(!controller.play(start + Duration::from_millis(500)));
        assert_eq!(controller.pending_advance(), pending);
    }

    #[test]
    fn test_pause_cancels_pending_advance() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(5)).unwrap();
        controller.play(start);
        let ticket = controller.pending_advance().unwrap().ticket;

        controller.pause();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert!(!controller.fire(ticket));
        assert_eq!(controller.poll(start + secs(10)), 0);
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn test_stale_tick_after_document_swap() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(5)).unwrap();
        controller.play(start);
        let stale = controller.pending_advance().unwrap().ticket;

        controller.load(document(3)).unwrap();
        assert!(!controller.fire(stale));
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_reset_keeps_document() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(5)).unwrap();
        controller.play(start);
        controller.poll(start + secs(2));
        assert_eq!(controller.index(), 2);

        controller.reset();
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert!(controller.pending_advance().is_none());
        assert_eq!(controller.total_steps(), 5);
    }

    #[test]
    fn test_reset_without_document_stays_idle() {
        let mut controller = PlaybackController::default();
        controller.reset();
        assert_eq!(controller.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_manual_step_while_playing_keeps_status() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(5)).unwrap();
        controller.play(start);
        controller.step_forward();
        assert!(controller.is_playing());
        assert_eq!(controller.index(), 1);
        controller.poll(start + secs(1));
        assert_eq!(controller.index(), 2);
    }

    #[test]
    fn test_manual_step_to_end_stops_on_next_tick() {
        let start = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        controller.play(start);
        controller.step_forward();
        controller.step_forward();
        assert!(controller.is_playing());
        assert_eq!(controller.poll(start + secs(1)), 0);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_eq!(controller.index(), 2);
    }

    #[test]
    fn test_toggle() {
        let now = Instant::now();
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        controller.toggle(now);
        assert!(controller.is_playing());
        controller.toggle(now);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_fail_surfaces_message() {
        let mut controller = PlaybackController::default();
        controller.load(document(3)).unwrap();
        controller.fail("Analyzer unavailable: timeout");
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(controller.document().is_none());
        assert_eq!(controller.error(), Some("Analyzer unavailable: timeout"));

        controller.load(document(2)).unwrap();
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(PlaybackStatus::Idle.label(), "Idle");
        assert_eq!(PlaybackStatus::Paused.label(), "Paused");
        assert_eq!(PlaybackStatus::Playing.label(), "Running");
    }
}
