#![deny(missing_docs)]
//! Shared logging utilities for the harvester workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the scroll step the current thread is working on, so a log
//! of a long harvest reads as a timeline of page advances.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current scroll step.
    static SCROLL_STEP: Cell<u64> = const { Cell::new(0) };
}

/// Sets the scroll step for the current thread.
/// The harvest session calls this once per page advance.
pub fn set_scroll_step(step: u64) {
    SCROLL_STEP.with(|v| v.set(step));
}

/// Retrieves the scroll step for the current thread.
/// Returns 0 before the first page advance.
pub fn scroll_step() -> u64 {
    SCROLL_STEP.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[step {}] {}", $crate::scroll_step(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[step {}] {}", $crate::scroll_step(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[step {}] {}", $crate::scroll_step(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[step {}] {}", $crate::scroll_step(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[step {}] {}", $crate::scroll_step(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
