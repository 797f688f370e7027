//! Schema-free value classification
//!
//! [`classify`] turns any JSON value into a [`Shape`] without knowing what the
//! value is supposed to be. Composite values are expanded recursively, but only
//! down to [`MAX_DEPTH`]; anything deeper collapses to [`Shape::Opaque`]. This
//! guarantees termination on pathological or accidentally self-referential
//! structures coming from the analyzer.
//!
//! Depth is counted from the value handed to [`classify`], so every top-level
//! variable gets its own budget.

use serde_json::{Number, Value};

/// Deepest level at which a composite is still expanded
pub const MAX_DEPTH: usize = 2;

/// Renderable classification of a value
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Explicit `null`
    Null,
    /// Value absent altogether
    Undefined,
    /// Primitive with its printed form
    Leaf(String),
    /// Object or list with no entries
    EmptyComposite,
    /// Entries in the value's natural order; list entries are keyed by index
    Composite(Vec<(String, Shape)>),
    /// Composite nested too deep to expand
    Opaque,
}

impl Shape {
    /// Whether this shape has entries to lay out (as opposed to a single token)
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Composite(_))
    }

    /// Single-token form of this shape; composites are summarized
    pub fn printed(&self) -> String {
        match self {
            Shape::Null => "null".to_string(),
            Shape::Undefined => "undefined".to_string(),
            Shape::Leaf(text) => text.clone(),
            Shape::EmptyComposite => "{}".to_string(),
            Shape::Composite(entries) => format!("{{ {} fields }}", entries.len()),
            Shape::Opaque => "{ ... }".to_string(),
        }
    }
}

/// Classify a value, or the absence of one
pub fn classify(value: Option<&Value>) -> Shape {
    classify_at(value, 0)
}

fn classify_at(value: Option<&Value>, depth: usize) -> Shape {
    let Some(value) = value else {
        return Shape::Undefined;
    };

    match value {
        Value::Null => Shape::Null,
        Value::Bool(b) => Shape::Leaf(b.to_string()),
        Value::Number(n) => Shape::Leaf(format_number(n)),
        Value::String(s) => Shape::Leaf(s.clone()),
        Value::Array(items) if items.is_empty() => Shape::EmptyComposite,
        Value::Object(map) if map.is_empty() => Shape::EmptyComposite,
        _ if depth > MAX_DEPTH => Shape::Opaque,
        Value::Array(items) => Shape::Composite(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), classify_at(Some(item), depth + 1)))
                .collect(),
        ),
        Value::Object(map) => Shape::Composite(
            map.iter()
                .map(|(key, item)| (key.clone(), classify_at(Some(item), depth + 1)))
                .collect(),
        ),
    }
}

/// Print a number the way the analyzer wrote it: integral values without a
/// fractional part
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Integral value of a number, if it has one
pub(crate) fn as_index(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => Some(f as i64),
        _ => None,
    }
}
