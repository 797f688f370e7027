//! Step header rendering: action badge, position and description

use crate::interpreter::StepView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// What the header has to show when there is no step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPlaceholder<'a> {
    /// An analysis is running
    Analyzing,
    /// The last analysis failed with this message
    Failed(&'a str),
    /// Nothing loaded yet
    Empty,
}

/// Render the step header
pub fn render_step_pane(
    frame: &mut Frame,
    area: Rect,
    view: Option<&StepView>,
    placeholder: StepPlaceholder<'_>,
) {
    let block = Block::default()
        .title(" Current Step ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines = match view {
        Some(view) => vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", view.action.to_uppercase()),
                    Style::default()
                        .bg(DEFAULT_THEME.primary)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    view.position_label(),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]),
            Line::from(Span::styled(
                view.description.clone(),
                Style::default().fg(DEFAULT_THEME.fg),
            )),
        ],
        None => placeholder_lines(placeholder),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn placeholder_lines(placeholder: StepPlaceholder<'_>) -> Vec<Line<'static>> {
    match placeholder {
        StepPlaceholder::Analyzing => vec![Line::from(Span::styled(
            "Analyzing...",
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ))],
        StepPlaceholder::Failed(message) => vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press 'a' to try again",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
        ],
        StepPlaceholder::Empty => vec![
            Line::from(Span::styled(
                "No execution trace available",
                Style::default().fg(DEFAULT_THEME.fg),
            )),
            Line::from(Span::styled(
                "Press 'a' to trace the source",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
        ],
    }
}
