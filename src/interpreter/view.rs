//! Per-step projection handed to the render surface
//!
//! [`StepView::build`] runs the whole interpreter over one step of a document and
//! returns plain descriptive data: grouped variables, arrays with highlighted
//! cells and pointer labels, the other structures, the active call frame and the
//! complexity strings. Nothing here knows how it will be drawn.

use super::partition::{partition, VariableGroups};
use super::pointers::{annotate, PointerAnnotations};
use super::shape::{classify, Shape};
use super::structures::{aggregate, StructureGroup};
use crate::trace::TraceDocument;

const DEFAULT_ACTION: &str = "Init";
const DEFAULT_DESCRIPTION: &str = "Ready to start execution.";
const DEFAULT_FRAME: &str = "main";
const NOT_AVAILABLE: &str = "N/A";

/// Switches for the optional annotation passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub pointer_inference: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            pointer_inference: true,
        }
    }
}

/// One array cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub index: usize,
    pub shape: Shape,
    pub highlighted: bool,
    /// Index variables currently pointing at this cell
    pub pointers: Vec<String>,
}

/// One named array of the current step
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayView {
    pub name: String,
    pub cells: Vec<CellView>,
    pub highlighted: Vec<i64>,
}

impl ArrayView {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `Array[n]`
    pub fn length_label(&self) -> String {
        format!("Array[{}]", self.cells.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityView {
    pub time: String,
    pub space: String,
}

/// Everything the render surface needs for the selected step
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    /// 0-based position in the document
    pub index: usize,
    pub total: usize,
    /// 1-based source line as reported; may be out of range
    pub line: i64,
    pub action: String,
    pub description: String,
    pub variables: VariableGroups,
    pub arrays: Vec<ArrayView>,
    pub structures: Vec<StructureGroup>,
    pub active_frame: String,
    pub complexity: ComplexityView,
}

impl StepView {
    /// Project step `index` of `document`; `None` when the index is out of range
    pub fn build(document: &TraceDocument, index: usize) -> Option<StepView> {
        Self::build_with(document, index, ViewOptions::default())
    }

    pub fn build_with(
        document: &TraceDocument,
        index: usize,
        options: ViewOptions,
    ) -> Option<StepView> {
        let step = document.step(index)?;
        let snapshot = &step.state;

        let variables = partition(snapshot);
        let annotations = if options.pointer_inference {
            annotate(snapshot, &variables)
        } else {
            PointerAnnotations::default()
        };

        let arrays = snapshot
            .data_structures
            .arrays()
            .map(|(name, value)| {
                let cells = value
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .enumerate()
                            .map(|(idx, item)| CellView {
                                index: idx,
                                shape: classify(Some(item)),
                                highlighted: annotations.is_highlighted(name, idx),
                                pointers: annotations.labels(name, idx).to_vec(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                ArrayView {
                    name: name.clone(),
                    cells,
                    highlighted: annotations.highlighted(name).to_vec(),
                }
            })
            .collect();

        let action = step
            .action
            .map(|action| action.label().to_string())
            .unwrap_or_else(|| DEFAULT_ACTION.to_string());

        let description = if step.description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            step.description.clone()
        };

        let active_frame = document
            .active_frame()
            .map(|frame| frame.function.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FRAME)
            .to_string();

        Some(StepView {
            index,
            total: document.len(),
            line: step.line,
            action,
            description,
            variables,
            arrays,
            structures: aggregate(&snapshot.data_structures),
            active_frame,
            complexity: ComplexityView {
                time: or_not_available(&document.complexity.time),
                space: or_not_available(&document.complexity.space),
            },
        })
    }

    /// Fraction of the trace shown so far, `(index + 1) / total`
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.index + 1) as f64 / self.total as f64
    }

    /// `Step n / N`
    pub fn position_label(&self) -> String {
        format!("Step {} / {}", self.index + 1, self.total)
    }

    /// The line to highlight in a source of `line_count` lines, if any
    pub fn active_line(&self, line_count: usize) -> Option<usize> {
        active_line(self.line, line_count)
    }
}

/// A reported 1-based line, kept only when it exists in the source
pub fn active_line(line: i64, line_count: usize) -> Option<usize> {
    let line = usize::try_from(line).ok()?;
    (1..=line_count).contains(&line).then_some(line)
}

fn or_not_available(text: &str) -> String {
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}
