//! Ctrl+C handling scoped to interruptible steps.
//!
//! Most of a run treats Ctrl+C as "quit now". A few steps (package discovery
//! and the grant loop) instead treat it as "abandon this step": while an
//! [`InterruptibleScope`] is alive, a signal only raises a flag that the step
//! polls with [`take_interrupt`].
//!
//! Repeated signals still force an exit so a hung external tool can always
//! be escaped.

use std::sync::Once;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Exit code used when the process is terminated by Ctrl+C (128 + SIGINT).
const INTERRUPT_EXIT_CODE: i32 = 130;

/// Maximum number of rapid signals before forcing exit.
const MAX_RAPID_SIGNALS: u32 = 3;

/// Set when a signal arrives inside an interruptible scope.
static INTERRUPT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Number of live [`InterruptibleScope`] guards.
static SCOPE_DEPTH: AtomicU32 = AtomicU32::new(0);

/// Counter for signal interrupts received since the last consumed interrupt.
static SIGNAL_COUNT: AtomicU32 = AtomicU32::new(0);

static HANDLER: Once = Once::new();

/// Install the process-wide Ctrl+C handler. Only the first call has effect.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    let mut result = Ok(());
    HANDLER.call_once(|| {
        result = ctrlc::set_handler(handle_signal);
    });
    result
}

fn handle_signal() {
    let count = SIGNAL_COUNT.fetch_add(1, Ordering::SeqCst) + 1;

    if count >= MAX_RAPID_SIGNALS || !in_interruptible_scope() {
        eprintln!();
        std::process::exit(INTERRUPT_EXIT_CODE);
    }

    request_interrupt();
}

/// Mark the current interruptible step as interrupted.
///
/// This is what the signal handler does inside a scope. It is public so
/// callers can cancel a step programmatically.
pub fn request_interrupt() {
    INTERRUPT_REQUESTED.store(true, Ordering::SeqCst);
}

/// Check whether an interrupt is pending without consuming it.
pub fn interrupt_requested() -> bool {
    INTERRUPT_REQUESTED.load(Ordering::SeqCst)
}

/// Consume a pending interrupt.
///
/// Returns `true` once per interrupt and resets the rapid-signal counter.
pub fn take_interrupt() -> bool {
    let taken = INTERRUPT_REQUESTED.swap(false, Ordering::SeqCst);
    if taken {
        reset_signal_count();
    }
    taken
}

/// Check if any interruptible scope is currently alive.
pub(crate) fn in_interruptible_scope() -> bool {
    SCOPE_DEPTH.load(Ordering::SeqCst) > 0
}

/// Get the current signal count.
#[cfg(test)]
pub(crate) fn get_signal_count() -> u32 {
    SIGNAL_COUNT.load(Ordering::SeqCst)
}

/// Reset the signal count to zero.
pub(crate) fn reset_signal_count() {
    SIGNAL_COUNT.store(0, Ordering::SeqCst);
}

/// RAII guard marking a step that Ctrl+C abandons instead of terminating.
///
/// When the outermost scope is dropped any unconsumed interrupt is
/// discarded, so a late Ctrl+C cannot leak into the next step.
#[derive(Debug)]
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct InterruptibleScope {
    _private: (),
}

impl InterruptibleScope {
    pub fn enter() -> Self {
        SCOPE_DEPTH.fetch_add(1, Ordering::SeqCst);
        Self { _private: () }
    }
}

impl Drop for InterruptibleScope {
    fn drop(&mut self) {
        if SCOPE_DEPTH.fetch_sub(1, Ordering::SeqCst) == 1 {
            INTERRUPT_REQUESTED.store(false, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
pub(crate) fn simulate_signal_in_scope() {
    assert!(in_interruptible_scope(), "would exit the test process");
    handle_signal();
}
