//! Aggregation of the non-array structure categories
//!
//! Linked lists, trees, stacks, queues and graphs are all treated the same way:
//! a list of opaque values, each classified on its own and labelled by position
//! (`"Tree 1"`, `"Tree 2"`, ...). Categories that are absent, not a list, or
//! empty are dropped.

use super::partition::NamedShape;
use super::shape::classify;
use crate::trace::{Category, StructureBundle};

/// One non-empty structure category
#[derive(Debug, Clone, PartialEq)]
pub struct StructureGroup {
    pub category: Category,
    pub items: Vec<NamedShape>,
}

impl StructureGroup {
    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// Collect the populated categories of a bundle in display order
pub fn aggregate(bundle: &StructureBundle) -> Vec<StructureGroup> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let values = bundle.category(category);
            if values.is_empty() {
                return None;
            }
            let items = values
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    NamedShape::new(
                        format!("{} {}", category.singular(), idx + 1),
                        classify(Some(value)),
                    )
                })
                .collect();
            Some(StructureGroup { category, items })
        })
        .collect()
}
