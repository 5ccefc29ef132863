//! # Root command
//!
//! The command tree is not known at compile time: it is built from the
//! installed extension manifests on every run.
//!
//! ```text
//! ray                          root: global flags, --version
//! ├── github                   one group per extension
//! │   ├── search-issues <query> [scope]
//! │   └── sync
//! └── spotify
//!     └── play [song]
//! ```
//!
//! After clap has parsed the arguments, [`resolve`] maps the matched leaf back
//! to the manifest and command it was built from.

use std::collections::HashSet;
use std::ffi::OsStr;

use clap::{Arg, ArgAction, ArgMatches};
use ray_core::{Command, ExtensionManifest};
use tracing::warn;

use crate::commands::build_extension_command;

/// Name of the binary and root command.
pub const BIN_NAME: &str = "ray";

/// Version line shown by `--version`.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("RAY_BUILD_DATE"), ")");

const VERBOSE_FLAG: &str = "verbose";
const QUIET_FLAG: &str = "quiet";

/// Flags accepted before or after any subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    /// Enable debug logging.
    pub verbose: bool,
    /// Only log errors.
    pub quiet: bool,
}

impl GlobalFlags {
    /// Scan raw arguments for the global flags.
    ///
    /// Logging has to be configured before manifests are loaded, which is
    /// before clap can parse anything. Combined short flags (`-vq`) are
    /// recognised the way clap groups them.
    pub fn scan<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let mut flags = Self::default();
        for arg in args.into_iter().skip(1) {
            match arg.as_ref().to_str() {
                Some("--") => break,
                Some("-v" | "--verbose") => flags.verbose = true,
                Some("-q" | "--quiet") => flags.quiet = true,
                Some(arg) if is_root_short_cluster(arg) => {
                    flags.verbose |= arg.contains('v');
                    flags.quiet |= arg.contains('q');
                },
                _ => {},
            }
        }
        flags
    }
}

/// `-vq`, `-qvh` and similar: a single dash followed only by root short flags.
fn is_root_short_cluster(arg: &str) -> bool {
    arg.strip_prefix('-')
        .filter(|rest| !rest.is_empty() && !rest.starts_with('-'))
        .is_some_and(|rest| rest.chars().all(|c| matches!(c, 'v' | 'q' | 'h' | 'V')))
}

/// Build the root command with one group per extension.
///
/// Extensions are registered in the given order. An extension whose name is
/// empty or already taken is skipped with a warning.
pub fn build_root(manifests: &[ExtensionManifest]) -> clap::Command {
    let mut root = clap::Command::new(BIN_NAME)
        .about("A command line interface for Raycast")
        .version(VERSION)
        .disable_help_subcommand(true)
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new(QUIET_FLAG)
                .short('q')
                .long(QUIET_FLAG)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        );

    let mut seen = HashSet::new();
    for manifest in manifests {
        if manifest.name.is_empty() {
            warn!(author = %manifest.author, "skipping extension without a name");
            continue;
        }
        if !seen.insert(manifest.name.as_str()) {
            warn!("skipping duplicate extension '{}'", manifest.name);
            continue;
        }
        root = root.subcommand(build_extension_command(manifest));
    }
    root
}

/// A parsed invocation resolved to its declaration.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Extension that declares the command.
    pub manifest: &'a ExtensionManifest,
    /// The invoked command.
    pub command: &'a Command,
    /// Matches of the command's own arguments.
    pub matches: &'a ArgMatches,
}

/// Find the manifest and command selected by `matches`.
///
/// Returns `None` when no command was selected.
pub fn resolve<'a>(manifests: &'a [ExtensionManifest], matches: &'a ArgMatches) -> Option<Resolved<'a>> {
    let (extension_name, extension_matches) = matches.subcommand()?;
    let (command_name, command_matches) = extension_matches.subcommand()?;
    let manifest = manifests.iter().find(|m| m.name == extension_name)?;
    let command = manifest.command(command_name)?;
    Some(Resolved {
        manifest,
        command,
        matches: command_matches,
    })
}
