//! Status bar rendering with keybindings and state indicators

use crate::playback::PlaybackStatus;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub status: PlaybackStatus,
    /// `(index, total)` of the loaded trace
    pub position: Option<(usize, usize)>,
    pub has_error: bool,
    pub is_analyzing: bool,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: status label, progress and message
    let badge_bg = if data.has_error {
        DEFAULT_THEME.error
    } else if data.is_analyzing || data.status == PlaybackStatus::Playing {
        DEFAULT_THEME.secondary
    } else {
        DEFAULT_THEME.primary
    };

    let badge = if data.is_analyzing {
        " ANALYZING ".to_string()
    } else {
        format!(" {} ", data.status.label().to_uppercase())
    };

    let mut left_spans = vec![Span::styled(
        badge,
        Style::default()
            .bg(badge_bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some((index, total)) = data.position {
        left_spans.push(Span::styled(
            format!(" {} ", progress_text(index, total)),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ));
    }

    left_spans.push(Span::styled(
        " | ",
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.comment),
    ));
    left_spans.push(Span::styled(
        format!(" {} ", data.message),
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(if data.has_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings = [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ⌫ ", " reset "),
        (" a ", " analyze "),
        (" q ", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    // Show position indicators
    if let Some((index, total)) = data.position {
        if data.status != PlaybackStatus::Playing {
            let indicator = if index + 1 >= total {
                Some((" END ", DEFAULT_THEME.error))
            } else if index == 0 {
                Some((" START ", DEFAULT_THEME.success))
            } else {
                None
            };
            if let Some((text, bg)) = indicator {
                right_spans.push(Span::styled("│", sep_style));
                right_spans.push(Span::styled(
                    text,
                    Style::default()
                        .bg(bg)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// `n / N` followed by a ten-cell progress gauge
fn progress_text(index: usize, total: usize) -> String {
    const CELLS: usize = 10;
    let filled = if total == 0 {
        0
    } else {
        ((index + 1) * CELLS / total).min(CELLS)
    };
    format!(
        "{}/{} {}{}",
        index + 1,
        total,
        "█".repeat(filled),
        "░".repeat(CELLS - filled)
    )
}
