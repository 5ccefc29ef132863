//! Extension commands: building them from manifests and running them.
//!
//! - [`builder`]: clap commands and the validated [`Invocation`]
//! - [`dispatch`]: deeplink construction and print/copy/open

pub mod builder;
pub mod dispatch;

pub use builder::{DispatchMode, Invocation, build_command, build_extension_command};
pub use dispatch::Dispatcher;
