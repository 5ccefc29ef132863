//! Shared helpers for the CLI: clipboard backends, piped input and logging.

pub mod clipboard;
pub mod logging;
pub mod stdin;

pub use logging::initialize_logging;
