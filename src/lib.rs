//! queryable_populate - Course analytics table population
//!
//! Batch helpers that keep per-course analytics tables in sync with course
//! content: map graded assignments to their problems, decide between full
//! and incremental runs from the run history, and compare recomputed floats
//! against stored ones.
//!
//! # Modules
//!
//! - [`core_types`] - Course and block identifiers (CourseKey, BlockLocation)
//! - [`content`] - Course tree interface, metadata, content store seam
//! - [`course_map`] - Assignment-category to problem-group mapping
//! - [`run_log`] - Population run history and log store seam
//! - [`populate`] - Full vs incremental run decision
//! - [`approx`] - Approximate float comparison
//! - [`json_io`] - JSON fixture loading
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup

// Identifiers - must be first!
pub mod core_types;

// Content and mapping
pub mod approx;
pub mod content;
pub mod course_map;

// Run bookkeeping
pub mod populate;
pub mod run_log;

// Application plumbing
pub mod config;
pub mod json_io;
pub mod logging;

// Convenient re-exports at crate root
pub use approx::{approx_equal, approx_equal_within, DEFAULT_TOLERANCE};
pub use content::{
    BlockMetadata, ContentBlock, ContentError, ContentStore, CourseNode, MemoryContentStore,
};
pub use core_types::{BlockLocation, CourseKey, KeyError};
pub use course_map::{
    assignment_problem_map, AssignmentProblemMap, ProblemGroup, COURSE_TREE_DEPTH,
    PROBLEM_CATEGORY,
};
pub use populate::{pre_run, PopulateMode, PopulateOptions, RunDecision};
pub use run_log::{LogStore, MemoryLogStore, PopulationLog};
