//! Common utilities shared across apkgrant crates.

pub mod signal_safety;
pub mod subprocess_output;

pub use signal_safety::{
    InterruptibleScope, install_interrupt_handler, interrupt_requested, request_interrupt,
    take_interrupt,
};
pub use subprocess_output::{SeparatedOutput, run_with_separated_output};
