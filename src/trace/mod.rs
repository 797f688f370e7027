//! Trace document model
//!
//! A [`TraceDocument`] is the value an external analyzer produces for one
//! submitted program: a list of [`Step`]s, each carrying the *full* state of the
//! simulated program at that point (never a diff), plus descriptive metadata
//! such as the call stack and complexity estimate.
//!
//! # Wire format
//!
//! Documents arrive as camelCase JSON. Every field is optional; absent or `null`
//! fields fall back to empty values so that a sloppy analyzer still produces a
//! playable trace. A field of the wrong type, on the other hand, is a schema
//! violation and rejects the whole document.
//!
//! Data-structure payloads are kept as raw [`serde_json::Value`]s: their shape is
//! unknown ahead of time and is classified lazily by the
//! [`interpreter`](crate::interpreter).
//!
//! # Validity
//!
//! A document is playable only when it has no `error` and at least one step.
//! [`TraceDocument::validate`] enforces exactly those two rules; nothing about the
//! individual steps is checked.

pub mod errors;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use errors::{InvalidTraceError, TraceError};

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Full analyzer output for one submitted program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDocument {
    /// Free-form language label, informational only
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,

    /// Synthetic inputs the analyzer invented, display only
    #[serde(default)]
    pub assumed_input: Value,

    #[serde(
        default,
        rename = "variables",
        deserialize_with = "null_as_default"
    )]
    pub declared_variables: Vec<DeclaredVariable>,

    /// Structures as they were before the first step
    #[serde(
        default,
        rename = "dataStructures",
        deserialize_with = "null_as_default"
    )]
    pub initial_data_structures: StructureBundle,

    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,

    /// Most recent frame first
    #[serde(default, deserialize_with = "null_as_default")]
    pub call_stack: Vec<CallFrame>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub complexity: Complexity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraceDocument {
    /// Parse a raw analyzer response into a playable document.
    ///
    /// The response may be wrapped in a Markdown code fence; the fence is
    /// stripped before parsing.
    pub fn parse_response(text: &str) -> Result<TraceDocument, InvalidTraceError> {
        let document: TraceDocument = serde_json::from_str(strip_code_fence(text))?;
        document.validate()?;
        Ok(document)
    }

    /// Check that this document can be played back
    pub fn validate(&self) -> Result<(), InvalidTraceError> {
        if let Some(message) = self.reported_error() {
            return Err(InvalidTraceError::Reported(message.to_string()));
        }
        if self.steps.is_empty() {
            return Err(InvalidTraceError::NoSteps);
        }
        Ok(())
    }

    /// The analyzer's own failure message, if it set one
    pub fn reported_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }

    /// The frame shown as "active": the first entry of the call stack
    pub fn active_frame(&self) -> Option<&CallFrame> {
        self.call_stack.first()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Strip a surrounding ```` ```json ```` / ```` ``` ```` fence and whitespace
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// A variable the analyzer declared up front; descriptive only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredVariable {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub initial_value: Value,
    #[serde(default)]
    pub scope: Option<Scope>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Function,
    Block,
    #[serde(other)]
    Other,
}

/// One point in the simulated timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The analyzer's own step number; playback order is the list order
    #[serde(default)]
    pub step: Option<i64>,

    /// 1-based source line; not checked against the source
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: i64,

    #[serde(default)]
    pub action: Option<Action>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub state: Snapshot,
}

/// Descriptive tag attached to a step; never drives playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Assign,
    Compare,
    Iterate,
    Call,
    Return,
    Push,
    Pop,
    Access,
    Update,
    #[serde(other)]
    Other,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Assign => "assign",
            Action::Compare => "compare",
            Action::Iterate => "iterate",
            Action::Call => "call",
            Action::Return => "return",
            Action::Push => "push",
            Action::Pop => "pop",
            Action::Access => "access",
            Action::Update => "update",
            Action::Other => "other",
        }
    }
}

/// Complete program state at one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub data_structures: StructureBundle,
}

/// Named arrays plus five loosely-typed structure categories
///
/// Each field holds whatever the analyzer sent. `arrays` is expected to be an
/// object of name → list, the categories lists of arbitrary values; anything else
/// reads as empty through the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureBundle {
    #[serde(default)]
    pub arrays: Value,
    #[serde(default)]
    pub linked_lists: Value,
    #[serde(default)]
    pub stacks: Value,
    #[serde(default)]
    pub queues: Value,
    #[serde(default)]
    pub trees: Value,
    #[serde(default)]
    pub graphs: Value,
}

impl StructureBundle {
    /// Named arrays in document order; empty when `arrays` is not an object
    pub fn arrays(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.arrays.as_object().into_iter().flat_map(|map| map.iter())
    }

    pub fn has_array(&self, name: &str) -> bool {
        self.arrays
            .as_object()
            .is_some_and(|map| map.contains_key(name))
    }

    /// Elements of one structure category; empty when the field is not a list
    pub fn category(&self, category: Category) -> &[Value] {
        let field = match category {
            Category::LinkedLists => &self.linked_lists,
            Category::Trees => &self.trees,
            Category::Stacks => &self.stacks,
            Category::Queues => &self.queues,
            Category::Graphs => &self.graphs,
        };
        field.as_array().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The non-array structure categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LinkedLists,
    Trees,
    Stacks,
    Queues,
    Graphs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::LinkedLists,
        Category::Trees,
        Category::Stacks,
        Category::Queues,
        Category::Graphs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::LinkedLists => "Linked Lists",
            Category::Trees => "Trees",
            Category::Stacks => "Stacks",
            Category::Queues => "Queues",
            Category::Graphs => "Graphs",
        }
    }

    /// Title without its plural suffix, used to label individual elements
    pub fn singular(self) -> &'static str {
        let title = self.title();
        title.strip_suffix('s').unwrap_or(title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    #[serde(default, deserialize_with = "null_as_default")]
    pub function: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

/// Free-form complexity estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub space: String,
}
