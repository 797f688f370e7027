//! Variables pane rendering
//!
//! Shows the primitive variables of the current step as an aligned table,
//! followed by the analyzer's complexity estimate and the active call frame.

use super::utils::{format_shape_styled, placeholder, section_header, spans_width, visible_window};
use crate::interpreter::StepView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the variables pane
#[derive(Debug, Default)]
pub struct VariablesScrollState {
    pub offset: usize,
}

/// Render the variables pane
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    view: Option<&StepView>,
    is_focused: bool,
    scroll_state: &mut VariablesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = area.width.saturating_sub(2) as usize; // borders

    let all_items = match view {
        Some(view) => variable_items(view, content_width),
        None => vec![ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment))],
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let visible_items = visible_window(all_items, &mut scroll_state.offset, visible_height);

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

fn variable_items(view: &StepView, content_width: usize) -> Vec<ListItem<'static>> {
    let mut items = Vec::new();

    if view.variables.primitive.is_empty() {
        items.push(placeholder("No primitive variables"));
    } else {
        let name_width = view
            .variables
            .primitive
            .iter()
            .map(|v| v.name.chars().count())
            .max()
            .unwrap_or(0);

        for named in &view.variables.primitive {
            let mut spans = vec![
                Span::styled(
                    format!(" {:<name_width$}", named.name),
                    Style::default().fg(DEFAULT_THEME.field_name),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
            ];
            spans.extend(format_shape_styled(&named.shape));
            items.push(ListItem::new(Line::from(spans)));
        }
    }

    items.push(ListItem::new(""));
    items.push(section_header("Complexity"));
    items.push(aligned_row("Time", &view.complexity.time, content_width));
    items.push(aligned_row("Space", &view.complexity.space, content_width));

    items.push(ListItem::new(""));
    items.push(section_header("Active Frame"));
    items.push(ListItem::new(Line::from(Span::styled(
        format!("  {}()", view.active_frame),
        Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
    ))));

    items
}

/// `  label ......... value` with the value aligned right
fn aligned_row(label: &str, value: &str, content_width: usize) -> ListItem<'static> {
    let left = vec![Span::styled(
        format!("  {}", label),
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    let padding = content_width.saturating_sub(spans_width(&left) + value.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        value.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD),
    ));
    ListItem::new(Line::from(spans))
}
