//! Variable grouping for layout
//!
//! Variables that share a name with an entry of `dataStructures.arrays` are drawn
//! only as arrays and never appear here. Everything else lands in one of two
//! groups: single-token values (`primitive`) and objects or lists (`composite`).
//! The split is purely for layout.

use super::shape::{classify, Shape};
use crate::trace::Snapshot;
use serde_json::Value;

/// A classified value with the name it was found under
#[derive(Debug, Clone, PartialEq)]
pub struct NamedShape {
    pub name: String,
    pub shape: Shape,
}

impl NamedShape {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        NamedShape {
            name: name.into(),
            shape,
        }
    }
}

/// Variables of one snapshot, split for layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableGroups {
    pub primitive: Vec<NamedShape>,
    pub composite: Vec<NamedShape>,
}

impl VariableGroups {
    pub fn contains(&self, name: &str) -> bool {
        self.primitive
            .iter()
            .chain(self.composite.iter())
            .any(|named| named.name == name)
    }
}

/// Split a snapshot's variables into primitive and composite groups
pub fn partition(snapshot: &Snapshot) -> VariableGroups {
    let bundle = &snapshot.data_structures;
    let mut groups = VariableGroups::default();

    for (name, value) in &snapshot.variables {
        if bundle.has_array(name) {
            continue;
        }

        let named = NamedShape::new(name.clone(), classify(Some(value)));
        if matches!(value, Value::Object(_) | Value::Array(_)) {
            groups.composite.push(named);
        } else {
            groups.primitive.push(named);
        }
    }

    groups
}
