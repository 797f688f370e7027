//! Shared utility functions for pane rendering
//!
//! # Utilities
//!
//! - **Shape Formatting**: Convert a [`Shape`] to styled spans
//! - **Nested Rendering**: Lay out composite shapes as indented list items
//! - **Text Helpers**: Width-aware padding and splitting
//!
//! All functions in this module are `pub(super)`, making them accessible only
//! within the panes module.

use crate::interpreter::{NamedShape, Shape};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Format a shape as a single run of styled spans
pub(super) fn format_shape_styled(shape: &Shape) -> Vec<Span<'static>> {
    match shape {
        Shape::Null | Shape::Undefined => vec![Span::styled(
            shape.printed(),
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::ITALIC),
        )],
        Shape::Leaf(text) => vec![Span::styled(text.clone(), leaf_style(text))],
        Shape::EmptyComposite | Shape::Opaque => vec![Span::styled(
            shape.printed(),
            Style::default().fg(DEFAULT_THEME.comment),
        )],
        Shape::Composite(entries) => {
            // Inline summary: { a: 1, b: 2 }
            let mut spans = vec![Span::styled("{ ", Style::default().fg(DEFAULT_THEME.primary))];
            for (i, (key, child)) in entries.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.push(Span::styled(
                    key.clone(),
                    Style::default().fg(DEFAULT_THEME.field_name),
                ));
                spans.push(Span::raw(": "));
                if child.is_composite() {
                    spans.push(Span::styled(
                        child.printed(),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ));
                } else {
                    spans.extend(format_shape_styled(child));
                }
            }
            spans.push(Span::styled(" }", Style::default().fg(DEFAULT_THEME.primary)));
            spans
        }
    }
}

fn leaf_style(text: &str) -> Style {
    if text.parse::<f64>().is_ok() {
        Style::default().fg(DEFAULT_THEME.number)
    } else if text == "true" || text == "false" {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else {
        Style::default().fg(DEFAULT_THEME.string)
    }
}

/// Render a named value: a header line, then nested entries when composite
pub(super) fn render_named_shape(items: &mut Vec<ListItem<'static>>, named: &NamedShape) {
    let header_name = Span::styled(
        format!("{}: ", named.name),
        Style::default()
            .fg(DEFAULT_THEME.field_name)
            .add_modifier(Modifier::BOLD),
    );

    match &named.shape {
        Shape::Composite(entries) => {
            items.push(ListItem::new(Line::from(vec![
                header_name,
                Span::styled(
                    named.shape.printed(),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ])));
            render_entries(items, entries, 1);
        }
        other => {
            let mut spans = vec![header_name];
            spans.extend(format_shape_styled(other));
            items.push(ListItem::new(Line::from(spans)));
        }
    }
}

/// Render composite entries recursively with indentation
pub(super) fn render_entries(
    items: &mut Vec<ListItem<'static>>,
    entries: &[(String, Shape)],
    indent: usize,
) {
    let indent_str = "  ".repeat(indent);

    for (key, child) in entries {
        let mut spans = vec![
            Span::raw(indent_str.clone()),
            Span::styled("├ ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                key.clone(),
                Style::default().fg(DEFAULT_THEME.field_name),
            ),
            Span::styled(": ", Style::default().fg(DEFAULT_THEME.fg)),
        ];

        match child {
            Shape::Composite(nested) => {
                spans.push(Span::styled(
                    child.printed(),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
                items.push(ListItem::new(Line::from(spans)));
                render_entries(items, nested, indent + 1);
            }
            leaf => {
                spans.extend(format_shape_styled(leaf));
                items.push(ListItem::new(Line::from(spans)));
            }
        }
    }
}

/// Section header used by list panes
pub(super) fn section_header(title: &str) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.type_name)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
}

/// Placeholder line for an empty section
pub(super) fn placeholder(text: &str) -> ListItem<'static> {
    ListItem::new(Span::styled(
        format!("  {}", text),
        Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::ITALIC),
    ))
}

/// Clamp a scroll offset to the content and return the visible slice
pub(super) fn visible_window(
    items: Vec<ListItem<'static>>,
    offset: &mut usize,
    visible_height: usize,
) -> Vec<ListItem<'static>> {
    let total_items = items.len();
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }

    items
        .into_iter()
        .skip(*offset)
        .take(visible_height)
        .collect()
}

/// Display width of a list of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.chars().count()).sum()
}
