//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on global flags and environment variables. Logs always go to stderr;
//! stdout is reserved for `--print` output.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::GlobalFlags;

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(flags: GlobalFlags) -> Result<()> {
    let level = if flags.verbose {
        LevelFilter::DEBUG
    } else if flags.quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let no_color = std::env::var_os("NO_COLOR").is_some();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(!no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if no_color {
        color_control::set_override(false);
    }
    Ok(())
}
