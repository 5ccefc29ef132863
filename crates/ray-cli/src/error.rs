//! CLI error reporting with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Deeplink printed, copied or opened |
//! | 1 | `Internal` | Unexpected failure (stdin read, encoding) |
//! | 2 | `Usage` | Wrong argument count, missing argument, conflicting flags |
//! | 3 | `Startup` | Home directory, manifest or configuration problem |
//! | 4 | `Dispatch` | The open or clipboard program failed |
//!
//! Argument parsing errors raised by clap itself (unknown subcommand, unknown
//! flag) keep clap's own formatting and exit with code 2.

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use colored::Colorize;
use is_terminal::IsTerminal;
use ray_core::ErrorKind;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,
    /// Invalid invocation (exit code 2).
    Usage = 2,
    /// The command tree could not be built (exit code 3).
    Startup = 3,
    /// The OS open or copy mechanism failed (exit code 4).
    Dispatch = 4,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::Startup => "startup error",
            Self::Dispatch => "dispatch error",
        }
    }
}

impl From<ErrorKind> for ErrorCategory {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Startup => Self::Startup,
            ErrorKind::Usage => Self::Usage,
            ErrorKind::Dispatch => Self::Dispatch,
            ErrorKind::Internal => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Categorize an error by looking for a `ray_core::Error` in its chain.
#[must_use]
pub fn category_of(err: &anyhow::Error) -> ErrorCategory {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ray_core::Error>())
        .map_or(ErrorCategory::Internal, |core| core.kind().into())
}

/// Write `Error: <message>` to stderr and return the matching exit code.
pub fn report(err: &anyhow::Error) -> ExitCode {
    let category = category_of(err);
    tracing::debug!("{category}: {err:?}");

    let mut stderr = io::stderr();
    let prefix = if stderr.is_terminal() {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    };
    let _ = writeln!(stderr, "{prefix} {err}");
    category.as_exit_code()
}
