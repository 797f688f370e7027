//! Best-effort pointer inference
//!
//! The analyzer never says which array an index variable addresses. This pass
//! guesses: every primitive variable whose name is a conventional index name
//! ([`INDEX_NAMES`]) and whose value is an integer is taken as an index into
//! *every* array of the snapshot. Each array then gets
//!
//! - a list of highlighted indices, and
//! - pointer labels (the variable names) on the cells those indices land on.
//!
//! False positives on unrelated arrays are expected. The pass runs after
//! classification and only reads its output, so it can be turned off without
//! touching anything else.

use super::partition::VariableGroups;
use super::shape::as_index;
use crate::trace::Snapshot;
use rustc_hash::FxHashMap;

/// Variable names treated as array indices
pub const INDEX_NAMES: [&str; 10] = ["i", "j", "k", "l", "r", "mid", "low", "high", "p", "q"];

pub fn is_index_name(name: &str) -> bool {
    INDEX_NAMES.contains(&name)
}

/// Inferred pointers into a single array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayPointers {
    /// Indices proposed for highlighting, in variable order, without repeats.
    /// May fall outside the array.
    pub highlighted: Vec<i64>,
    /// Cell index → names of the variables pointing at it
    pub labels: FxHashMap<usize, Vec<String>>,
}

/// Pointer annotations for every array of a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerAnnotations {
    by_array: FxHashMap<String, ArrayPointers>,
}

impl PointerAnnotations {
    pub fn for_array(&self, array: &str) -> Option<&ArrayPointers> {
        self.by_array.get(array)
    }

    pub fn highlighted(&self, array: &str) -> &[i64] {
        self.for_array(array)
            .map(|pointers| pointers.highlighted.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_highlighted(&self, array: &str, index: usize) -> bool {
        self.highlighted(array)
            .iter()
            .any(|&candidate| usize::try_from(candidate).is_ok_and(|c| c == index))
    }

    pub fn labels(&self, array: &str, index: usize) -> &[String] {
        self.for_array(array)
            .and_then(|pointers| pointers.labels.get(&index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_array.is_empty()
    }
}

/// Infer index pointers from the primitive variables of a snapshot
pub fn annotate(snapshot: &Snapshot, groups: &VariableGroups) -> PointerAnnotations {
    let candidates: Vec<(&str, i64)> = groups
        .primitive
        .iter()
        .filter(|named| is_index_name(&named.name))
        .filter_map(|named| {
            let value = snapshot.variables.get(&named.name)?;
            Some((named.name.as_str(), as_index(value)?))
        })
        .collect();

    let mut annotations = PointerAnnotations::default();
    if candidates.is_empty() {
        return annotations;
    }

    for (array_name, value) in snapshot.data_structures.arrays() {
        let len = value.as_array().map_or(0, Vec::len);
        let mut pointers = ArrayPointers::default();

        for &(var_name, index) in &candidates {
            if !pointers.highlighted.contains(&index) {
                pointers.highlighted.push(index);
            }
            if let Ok(cell) = usize::try_from(index) {
                if cell < len {
                    pointers
                        .labels
                        .entry(cell)
                        .or_default()
                        .push(var_name.to_string());
                }
            }
        }

        annotations.by_array.insert(array_name.clone(), pointers);
    }

    annotations
}
