//! apkgrant CLI library module.
//!
//! - `cli/` - Command-line argument parsing and help styling
//! - `selector` - Numbered device menu and index selection
//! - `progress` - In-place progress bar
//! - `pipeline` - The end-to-end run and its per-package summary

pub mod cli;
pub mod pipeline;
pub mod progress;
pub mod selector;

pub use pipeline::{
    PackageOutcome, Pipeline, PipelineError, RunOptions, RunSummary, preflight, run,
};
