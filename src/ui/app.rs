//! Main TUI application state and logic

use super::panes::{
    self, SourceScrollState, StatusRenderData, StepPlaceholder, StructuresScrollState,
    VariablesScrollState,
};
use crate::interpreter::StepView;
use crate::playback::PlaybackStatus;
use crate::session::AnalysisSession;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Structures,
    Variables,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> structures -> variables)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Structures,
            FocusedPane::Structures => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Variables,
            FocusedPane::Structures => FocusedPane::Source,
            FocusedPane::Variables => FocusedPane::Structures,
        }
    }
}

/// The main application state
pub struct App {
    /// Analyzer plus playback controller
    pub session: AnalysisSession,

    /// The source code being traced
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub structures_scroll: StructuresScrollState,
    pub variables_scroll: VariablesScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around a session and the source it traces
    pub fn new(session: AnalysisSession, source_code: String) -> Self {
        let status_message = if session.is_analyzing() {
            "Analyzing...".to_string()
        } else if let Some(error) = session.controller().error() {
            error.to_string()
        } else {
            "Ready!".to_string()
        };

        App {
            session,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            structures_scroll: StructuresScrollState::default(),
            variables_scroll: VariablesScrollState::default(),
            should_quit: false,
            status_message,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.session.cancel();
        Ok(())
    }

    /// Apply finished analyses and due auto-advances
    pub fn tick(&mut self, now: Instant) {
        match self.session.poll_analysis() {
            Some(Ok(())) => {
                self.status_message = format!(
                    "Loaded {} steps from {}",
                    self.session.controller().total_steps(),
                    self.session.analyzer_name()
                );
            }
            Some(Err(err)) => {
                self.status_message = err.to_string();
            }
            None => {}
        }

        let controller = self.session.controller_mut();
        if controller.is_playing() {
            if controller.poll(now) > 0 {
                self.status_message = "Playing...".to_string();
            }
            if !self.session.controller().is_playing() {
                self.status_message = "Playback complete".to_string();
            }
        }
    }

    /// The view of the visible step, if a trace is loaded
    pub fn current_view(&self) -> Option<StepView> {
        let controller = self.session.controller();
        StepView::build(controller.document()?, controller.index())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let view = self.current_view();

        // Main area plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(pane_area);

        // Left column: Source (top) | Variables (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Step header (top) | Structures (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(columns[1]);

        let line_count = self.source_code.lines().count();
        let active_line = view.as_ref().and_then(|v| v.active_line(line_count));
        let is_locked = self.session.is_analyzing() || self.session.controller().is_playing();

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            active_line,
            is_locked,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_variables_pane(
            frame,
            left_rows[1],
            view.as_ref(),
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        let placeholder = if self.session.is_analyzing() {
            StepPlaceholder::Analyzing
        } else if let Some(error) = self.session.controller().error() {
            StepPlaceholder::Failed(error)
        } else {
            StepPlaceholder::Empty
        };
        panes::render_step_pane(frame, right_rows[0], view.as_ref(), placeholder);

        panes::render_structures_pane(
            frame,
            right_rows[1],
            view.as_ref(),
            self.focused_pane == FocusedPane::Structures,
            &mut self.structures_scroll,
        );

        let controller = self.session.controller();
        panes::render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                status: controller.status(),
                position: view.as_ref().map(|v| (v.index, v.total)),
                has_error: controller.error().is_some(),
                is_analyzing: self.session.is_analyzing(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.session.controller_mut().pause();
                self.step_backward();
            }
            KeyCode::Right => {
                self.session.controller_mut().pause();
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Structures => {
                    self.structures_scroll.offset = self.structures_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll.offset = self.variables_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                }
                FocusedPane::Structures => {
                    self.structures_scroll.offset = self.structures_scroll.offset.saturating_add(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll.offset = self.variables_scroll.offset.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_playback(Instant::now());
                }
            }
            KeyCode::Backspace => {
                self.session.controller_mut().reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.analyze();
            }
            _ => {}
        }
    }

    /// Play or pause, explaining why playback did not start
    pub fn toggle_playback(&mut self, now: Instant) {
        let controller = self.session.controller_mut();
        controller.toggle(now);
        self.status_message = match controller.status() {
            PlaybackStatus::Playing => "Playing...".to_string(),
            PlaybackStatus::Paused if controller.at_end() => "Already at the last step".to_string(),
            PlaybackStatus::Paused => "Paused".to_string(),
            PlaybackStatus::Idle => "Nothing to play".to_string(),
        };
    }

    /// Submit the current source to the analyzer
    pub fn analyze(&mut self) {
        if self.session.is_analyzing() {
            self.status_message = "Analysis already in progress".to_string();
            return;
        }

        self.status_message = match self.session.submit(&self.source_code) {
            Ok(()) => "Analyzing...".to_string(),
            Err(err) => err.to_string(),
        };
    }

    /// Message for a step request with nothing loaded: the failure, if any
    fn nothing_loaded_message(&self) -> String {
        self.session
            .controller()
            .error()
            .unwrap_or("No trace loaded")
            .to_string()
    }

    /// Step forward in the trace
    fn step_forward(&mut self) {
        if self.session.controller().document().is_none() {
            self.status_message = self.nothing_loaded_message();
            return;
        }
        self.status_message = if self.session.controller_mut().step_forward() {
            "Stepped forward".to_string()
        } else {
            "Cannot step forward: at the last step".to_string()
        };
    }

    /// Step backward in the trace
    fn step_backward(&mut self) {
        if self.session.controller().document().is_none() {
            self.status_message = self.nothing_loaded_message();
            return;
        }
        self.status_message = if self.session.controller_mut().step_backward() {
            "Stepped backward".to_string()
        } else {
            "Cannot step backward: at the first step".to_string()
        };
    }
}
