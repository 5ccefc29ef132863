//! ray CLI - run installed Raycast extension commands from the terminal
//!
//! Every installed extension becomes a subcommand, and every command it
//! declares becomes a subcommand of that:
//!
//! ```bash
//! ray github search-issues "is:open label:bug"          # open in Raycast
//! ray github search-issues "is:open" --print            # print the deeplink
//! git diff | ray gpt summarize --copy                   # piped input becomes context
//! ```
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use ray_core::{Config, ExtensionManifest, manifest};
use tracing::debug;

pub mod cli;
pub mod commands;
pub mod error;
pub mod platform;
pub mod utils;

use crate::cli::GlobalFlags;
use crate::commands::{Dispatcher, Invocation};
use crate::platform::SystemPlatform;
use crate::utils::initialize_logging;
use crate::utils::stdin::StdinContext;

/// Execute the ray CLI with the current process arguments and environment.
pub fn run() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    if let Err(err) = initialize_logging(GlobalFlags::scan(&args)) {
        return error::report(&err);
    }

    match load_and_execute(args) {
        Ok(code) => code,
        Err(err) => error::report(&err),
    }
}

fn load_and_execute(args: Vec<OsString>) -> Result<ExitCode> {
    let config = Config::load()?;
    debug!(
        extensions_dir = %config.extensions_dir.display(),
        clipboard = %config.clipboard,
        "resolved configuration"
    );
    let manifests = manifest::load_all(&config.extensions_dir)?;

    let platform = SystemPlatform::new(config.clipboard);
    let context = StdinContext::from_env();
    let dispatcher = Dispatcher::new(&platform, &context);

    let stdout = io::stdout();
    execute(args, &manifests, &dispatcher, &mut stdout.lock())
}

/// Parse `args` against the command tree built from `manifests` and run the
/// selected command.
///
/// Help, version and clap parse errors are printed by clap and reported
/// through the returned exit code. Invocation errors are returned as `Err`.
pub fn execute<I, T>(
    args: I,
    manifests: &[ExtensionManifest],
    dispatcher: &Dispatcher<'_>,
    out: &mut dyn Write,
) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut root = cli::build_root(manifests);
    let matches = match root.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(err) => {
            err.print()?;
            return Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2)));
        },
    };

    let Some(resolved) = cli::resolve(manifests, &matches) else {
        print_closest_help(&mut root, &matches)?;
        return Ok(ExitCode::SUCCESS);
    };

    let invocation = Invocation::from_matches(resolved.command, resolved.matches)?;
    dispatcher.run(resolved.manifest, resolved.command, &invocation, out)?;
    Ok(ExitCode::SUCCESS)
}

/// Help for the extension named on the command line, or the root help.
fn print_closest_help(root: &mut clap::Command, matches: &clap::ArgMatches) -> io::Result<()> {
    let group = matches
        .subcommand_name()
        .and_then(|name| root.find_subcommand_mut(name));
    match group {
        Some(group) => group.print_help(),
        None => root.print_help(),
    }
}
