//! Error types and handling for ray-core operations.
//!
//! Errors fall into two groups:
//!
//! - **Startup errors**: home directory resolution, manifest discovery, manifest
//!   parsing and configuration. These abort the program before any command tree
//!   is built.
//! - **Invocation errors**: argument count, missing required arguments, flag
//!   conflicts, serialization, stdin reads and OS dispatch. These abort only the
//!   current invocation.
//!
//! Nothing is retried. Every error is terminal for the operation that produced it.
//!
//! ```rust
//! use ray_core::{Error, ErrorKind};
//!
//! let err = Error::MissingRequiredArgument { name: "query".to_string() };
//! assert_eq!(err.kind(), ErrorKind::Usage);
//! assert_eq!(err.to_string(), "missing required argument: query");
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for ray-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The user's home directory could not be determined.
    #[error("unable to determine the home directory")]
    HomeDirUnavailable,

    /// The extensions directory could not be enumerated.
    #[error("failed to read extensions directory {}: {source}", .root.display())]
    Discovery {
        /// Directory that was being enumerated.
        root: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A manifest file could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A manifest file is not a valid manifest document.
    ///
    /// Raised for malformed JSON and for fields of the wrong type. Absent or
    /// `null` fields are not errors; they decode to empty values.
    #[error("failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying decoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration is invalid or inaccessible.
    #[error("configuration error: {0}")]
    Config(String),

    /// The number of positional values is outside the command's contract.
    #[error("{}", describe_count(.command, .min, .max, .actual))]
    ArgumentCount {
        /// Command that rejected the invocation.
        command: String,
        /// Minimum accepted positional values.
        min: usize,
        /// Maximum accepted positional values.
        max: usize,
        /// Number of positional values supplied.
        actual: usize,
    },

    /// A required argument had no value at its position.
    #[error("missing required argument: {name}")]
    MissingRequiredArgument {
        /// Declared argument name.
        name: String,
    },

    /// Both `--print` and `--copy` were requested.
    #[error("if any flags in the group [print copy] are set none of the others can be; [copy print] were all set")]
    FlagConflict,

    /// The argument map could not be encoded as JSON.
    #[error("failed to encode arguments: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading standard input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The deeplink URL could not be assembled.
    #[error("invalid deeplink: {0}")]
    InvalidUrl(String),

    /// The OS open/copy mechanism reported a failure.
    #[error("{program}: {message}")]
    Dispatch {
        /// Program or backend that failed (`open`, `pbcopy`, ...).
        program: String,
        /// What went wrong, as reported by the OS.
        message: String,
    },
}

/// Coarse classification of an [`Error`], used for exit codes and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Failure before the command tree was built.
    Startup,
    /// The invocation does not satisfy the command's contract.
    Usage,
    /// The open/copy side effect failed.
    Dispatch,
    /// Serialization, I/O or URL failures inside an invocation.
    Internal,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::HomeDirUnavailable
            | Self::Discovery { .. }
            | Self::ManifestRead { .. }
            | Self::ManifestParse { .. }
            | Self::Config(_) => ErrorKind::Startup,
            Self::ArgumentCount { .. }
            | Self::MissingRequiredArgument { .. }
            | Self::FlagConflict => ErrorKind::Usage,
            Self::Dispatch { .. } => ErrorKind::Dispatch,
            Self::Serialization(_) | Self::Io(_) | Self::InvalidUrl(_) => ErrorKind::Internal,
        }
    }

    /// Build a dispatch error for `program`.
    pub fn dispatch(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dispatch {
            program: program.into(),
            message: message.into(),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_count(command: &str, min: &usize, max: &usize, actual: &usize) -> String {
    if actual < min {
        format!("{command}: requires at least {min} arg(s), only received {actual}")
    } else {
        format!("{command}: accepts at most {max} arg(s), received {actual}")
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
