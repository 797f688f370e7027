//! # Introduction
//!
//! algotracer replays a step-by-step execution trace of a program in the
//! terminal. The trace is produced by an external analyzer; this crate never
//! looks at the program itself. It turns the loosely-typed trace document into
//! a playback state machine and a schema-free view of each step, then draws it
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Analyzer → Trace document → Playback controller → Step view → TUI
//! ```
//!
//! 1. [`analyzer`]: the boundary to the external analyzer (a recorded trace or a
//!    command that reads source on stdin).
//! 2. [`trace`]: the trace document model, response parsing and the error
//!    taxonomy.
//! 3. [`playback`]: which step is visible and whether time advances on its own.
//! 4. [`interpreter`]: classifies every value of a step into a renderable
//!    [`interpreter::Shape`] and infers which index variables point into which
//!    array cells.
//! 5. [`session`]: runs the analyzer off the UI thread and feeds the controller.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod analyzer;
pub mod config;
pub mod constants;
pub mod interpreter;
pub mod logging;
pub mod playback;
pub mod session;
pub mod trace;
pub mod ui;
