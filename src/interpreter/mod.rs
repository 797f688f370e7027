//! Structure interpreter
//!
//! Pure functions that turn one step snapshot into renderable, categorized data:
//! - [`shape`]: depth-bounded classification of arbitrary JSON values
//! - [`partition`]: array exclusion and primitive/composite grouping of variables
//! - [`pointers`]: best-effort index-variable → array-cell inference
//! - [`structures`]: aggregation of linked lists, trees, stacks, queues, graphs
//! - [`view`]: the per-step projection consumed by the UI
//!
//! # Failure model
//!
//! Nothing in this module returns an error. Values of an unexpected type degrade
//! to the most conservative rendering (a leaf, an empty array, an opaque node)
//! instead of failing the whole step.

pub mod partition;
pub mod pointers;
pub mod shape;
pub mod structures;
pub mod view;

pub use partition::{partition, NamedShape, VariableGroups};
pub use pointers::{annotate, PointerAnnotations, INDEX_NAMES};
pub use shape::{classify, Shape, MAX_DEPTH};
pub use structures::{aggregate, StructureGroup};
pub use view::{active_line, ArrayView, CellView, StepView, ViewOptions};
