//! Structures pane rendering with arrays, objects and other data structures
//!
//! This module renders the visualization pane for the current step.
//!
//! # Sections
//!
//! - **Arrays**: one row of cells per array, with highlighted cells and the
//!   names of index variables printed under the cells they point at
//! - **Objects & Classes**: composite variables, expanded as nested entries
//! - **Other structures**: linked lists, stacks, queues, trees and graphs,
//!   one group per non-empty category
//!
//! Cells are sized to fit both the printed value and the pointer labels below
//! it so the two rows stay aligned.

use super::utils::{
    format_shape_styled, placeholder, render_named_shape, section_header, visible_window,
};
use crate::interpreter::{ArrayView, CellView, StepView};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the structures pane
#[derive(Debug, Default)]
pub struct StructuresScrollState {
    pub offset: usize,
}

/// Render the structures pane
pub fn render_structures_pane(
    frame: &mut Frame,
    area: Rect,
    view: Option<&StepView>,
    is_focused: bool,
    scroll_state: &mut StructuresScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Visualization ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let all_items = match view {
        Some(view) => structure_items(view),
        None => vec![ListItem::new("(no trace loaded)")
            .style(Style::default().fg(DEFAULT_THEME.comment))],
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let visible_items = visible_window(all_items, &mut scroll_state.offset, visible_height);

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

fn structure_items(view: &StepView) -> Vec<ListItem<'static>> {
    let mut items = Vec::new();

    for array in &view.arrays {
        render_array(&mut items, array);
        items.push(ListItem::new(""));
    }

    if !view.variables.composite.is_empty() {
        items.push(section_header("Objects & Classes"));
        for named in &view.variables.composite {
            render_named_shape(&mut items, named);
        }
        items.push(ListItem::new(""));
    }

    for group in &view.structures {
        items.push(section_header(group.title()));
        for named in &group.items {
            render_named_shape(&mut items, named);
        }
        items.push(ListItem::new(""));
    }

    if items.is_empty() {
        items.push(placeholder("No data structures in this step"));
    }

    items
}

/// Array header, a row of cells and a row of pointer labels
fn render_array(items: &mut Vec<ListItem<'static>>, array: &ArrayView) {
    items.push(ListItem::new(Line::from(vec![
        Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(
            array.name.clone(),
            Style::default()
                .fg(DEFAULT_THEME.field_name)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            array.length_label(),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
    ])));

    if array.is_empty() {
        items.push(placeholder("(empty)"));
        return;
    }

    let widths: Vec<usize> = array.cells.iter().map(cell_width).collect();

    let mut index_spans = vec![Span::raw("  ")];
    let mut value_spans = vec![Span::raw("  ")];
    let mut pointer_spans = vec![Span::raw("  ")];

    for (cell, &width) in array.cells.iter().zip(&widths) {
        index_spans.push(Span::styled(
            format!("{:^width$} ", cell.index),
            Style::default().fg(DEFAULT_THEME.comment),
        ));

        let printed = cell_text(cell);
        let cell_style = if cell.highlighted {
            Style::default()
                .bg(DEFAULT_THEME.highlight_bg)
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg)
        };
        value_spans.push(Span::styled(format!("{:^width$}", printed), cell_style));
        value_spans.push(Span::raw(" "));

        let label = cell.pointers.join(",");
        let label = if label.is_empty() {
            String::new()
        } else {
            format!("↑{}", label)
        };
        pointer_spans.push(Span::styled(
            format!("{:^width$} ", label),
            Style::default()
                .fg(DEFAULT_THEME.pointer)
                .add_modifier(Modifier::BOLD),
        ));
    }

    items.push(ListItem::new(Line::from(index_spans)));
    items.push(ListItem::new(Line::from(value_spans)));
    if array.cells.iter().any(|cell| !cell.pointers.is_empty()) {
        items.push(ListItem::new(Line::from(pointer_spans)));
    }
}

/// The text printed in a cell's value row
fn cell_text(cell: &CellView) -> String {
    format_shape_styled(&cell.shape)
        .iter()
        .map(|s| s.content.as_ref())
        .collect()
}

/// Width that fits the cell's value and its pointer label, with padding
fn cell_width(cell: &CellView) -> usize {
    let value_width = cell_text(cell).chars().count();
    let label_width = if cell.pointers.is_empty() {
        0
    } else {
        // "↑" plus names joined by commas
        1 + cell.pointers.iter().map(|p| p.chars().count()).sum::<usize>()
            + cell.pointers.len().saturating_sub(1)
    };
    value_width.max(label_width).max(1) + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Shape;

    fn cell(shape: Shape, pointers: &[&str]) -> CellView {
        CellView {
            index: 0,
            shape,
            highlighted: !pointers.is_empty(),
            pointers: pointers.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_cell_width_fits_value() {
        assert_eq!(cell_width(&cell(Shape::Leaf("5".into()), &[])), 3);
        assert_eq!(cell_width(&cell(Shape::Leaf("1000".into()), &[])), 6);
    }

    #[test]
    fn test_cell_width_fits_object_value() {
        let object = cell(
            Shape::Composite(vec![
                ("val".into(), Shape::Leaf("1".into())),
                ("next".into(), Shape::Null),
            ]),
            &[],
        );
        assert_eq!(cell_text(&object), "{ val: 1, next: null }");
        assert_eq!(cell_width(&object), cell_text(&object).chars().count() + 2);
    }

    #[test]
    fn test_object_cells_keep_rows_aligned() {
        let array = ArrayView {
            name: "nodes".into(),
            cells: vec![cell(
                Shape::Composite(vec![
                    ("val".into(), Shape::Leaf("1".into())),
                    ("next".into(), Shape::Null),
                ]),
                &["i"],
            )],
            highlighted: vec![0],
        };
        let mut items = Vec::new();
        render_array(&mut items, &array);

        let widths: Vec<usize> = items[1..]
            .iter()
            .map(|item| item.width())
            .collect();
        // index, value and pointer rows span the same columns
        assert_eq!(widths[0], widths[1]);
        assert_eq!(widths[1], widths[2]);
    }

    #[test]
    fn test_cell_width_fits_labels() {
        // "↑mid,low" is 8 characters
        assert_eq!(cell_width(&cell(Shape::Leaf("5".into()), &["mid", "low"])), 10);
    }

    #[test]
    fn test_pointer_row_only_when_labelled() {
        let plain = ArrayView {
            name: "arr".into(),
            cells: vec![cell(Shape::Leaf("5".into()), &[])],
            highlighted: Vec::new(),
        };
        let mut items = Vec::new();
        render_array(&mut items, &plain);
        // header, indices, values
        assert_eq!(items.len(), 3);

        let pointed = ArrayView {
            name: "arr".into(),
            cells: vec![cell(Shape::Leaf("5".into()), &["i"])],
            highlighted: vec![0],
        };
        let mut items = Vec::new();
        render_array(&mut items, &pointed);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_empty_array_has_placeholder() {
        let empty = ArrayView {
            name: "out".into(),
            cells: Vec::new(),
            highlighted: Vec::new(),
        };
        let mut items = Vec::new();
        render_array(&mut items, &empty);
        assert_eq!(items.len(), 2);
    }
}
