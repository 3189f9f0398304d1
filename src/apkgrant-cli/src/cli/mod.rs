//! CLI argument parsing.
//!
//! - `args` - Command-line argument structures
//! - `styles` - ANSI styling for help output

pub mod args;
pub mod styles;

pub use args::{Cli, LogLevel};
pub use styles::{AFTER_HELP, get_styles};
