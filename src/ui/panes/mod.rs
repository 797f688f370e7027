//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and current line indicator
//! - [`step`]: Header with the current action, position and description
//! - [`structures`]: Arrays with pointer labels, objects and other data structures
//! - [`variables`]: Primitive variables, complexity and the active frame
//! - [`status`]: Status bar with keybindings and playback state
//! - `utils`: Shared helpers for shape formatting and list layout
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function and, where the pane
//! scrolls, an associated scroll state. Panes only read a
//! [`StepView`](crate::interpreter::StepView); they never touch the trace.

mod utils;

pub mod source;
pub mod status;
pub mod step;
pub mod structures;
pub mod variables;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use step::{render_step_pane, StepPlaceholder};
pub use structures::{render_structures_pane, StructuresScrollState};
pub use variables::{render_variables_pane, VariablesScrollState};
