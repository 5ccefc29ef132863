//! Builds clap commands from extension manifests.
//!
//! clap only collects the raw positional values and the two dispatch flags.
//! The argument count and the `--print`/`--copy` exclusivity are checked
//! afterwards by [`Invocation::from_matches`], so every rule of the contract
//! lives in one place and produces a `ray_core::Error`.

use std::collections::HashSet;
use std::fmt::Write as _;

use clap::{Arg, ArgAction, ArgMatches};
use ray_core::{ArgContract, Command, Error, ExtensionManifest, Result};
use tracing::warn;

use crate::cli::BIN_NAME;

/// Id of the positional values argument.
pub const ARGS_ID: &str = "args";
/// Id of the `--print` flag.
pub const PRINT_FLAG: &str = "print";
/// Id of the `--copy` flag.
pub const COPY_FLAG: &str = "copy";

/// What to do with the finished deeplink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Write it to standard output.
    Print,
    /// Put it on the clipboard.
    Copy,
    /// Open it with the system URL handler.
    #[default]
    Open,
}

impl DispatchMode {
    /// Combine the two flags; setting both is an error.
    pub const fn from_flags(print: bool, copy: bool) -> Result<Self> {
        match (print, copy) {
            (true, true) => Err(Error::FlagConflict),
            (true, false) => Ok(Self::Print),
            (false, true) => Ok(Self::Copy),
            (false, false) => Ok(Self::Open),
        }
    }
}

/// A validated call of one extension command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Positional values, within the command's contract.
    pub values: Vec<String>,
    /// Requested dispatch.
    pub mode: DispatchMode,
}

impl Invocation {
    /// Validate parsed matches against `command`'s contract.
    ///
    /// The argument count is checked first, then the flags.
    pub fn from_matches(command: &Command, matches: &ArgMatches) -> Result<Self> {
        let values: Vec<String> = matches
            .get_many::<String>(ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        ArgContract::derive(command).check(values.len())?;

        let mode = DispatchMode::from_flags(matches.get_flag(PRINT_FLAG), matches.get_flag(COPY_FLAG))?;
        Ok(Self { values, mode })
    }
}

/// Build the group for one extension, with one subcommand per command.
///
/// Commands with an empty or repeated name are skipped with a warning. Naming
/// no command is not an error; the caller prints the group's help.
pub fn build_extension_command(manifest: &ExtensionManifest) -> clap::Command {
    let mut group = clap::Command::new(manifest.name.clone()).disable_help_subcommand(true);
    if !manifest.title.is_empty() {
        group = group.about(manifest.title.clone());
    }
    if !manifest.description.is_empty() {
        group = group.long_about(manifest.description.clone());
    }

    let mut seen = HashSet::new();
    for command in &manifest.commands {
        if command.name.is_empty() {
            warn!(extension = %manifest.name, "skipping command without a name");
            continue;
        }
        if !seen.insert(command.name.as_str()) {
            warn!(extension = %manifest.name, "skipping duplicate command '{}'", command.name);
            continue;
        }
        group = group.subcommand(build_command(&manifest.name, command));
    }
    group
}

/// Build the leaf command for `command` of extension `extension`.
pub fn build_command(extension: &str, command: &Command) -> clap::Command {
    let contract = ArgContract::derive(command);

    let mut cmd = clap::Command::new(command.name.clone())
        .override_usage(format!("{BIN_NAME} {extension} {} [--print | --copy]", contract.usage))
        .arg(
            Arg::new(ARGS_ID)
                .value_name("ARGS")
                .num_args(1..)
                .action(ArgAction::Append)
                .hide(true),
        )
        .arg(
            Arg::new(PRINT_FLAG)
                .long(PRINT_FLAG)
                .action(ArgAction::SetTrue)
                .help("Print the deeplink instead of opening it"),
        )
        .arg(
            Arg::new(COPY_FLAG)
                .long(COPY_FLAG)
                .action(ArgAction::SetTrue)
                .help("Copy the deeplink to the clipboard instead of opening it"),
        );
    if !command.title.is_empty() {
        cmd = cmd.about(command.title.clone());
    }
    if !command.description.is_empty() {
        cmd = cmd.long_about(command.description.clone());
    }
    if let Some(help) = arguments_help(command) {
        cmd = cmd.after_help(help);
    }
    cmd
}

/// "Arguments:" section listing the declared arguments.
fn arguments_help(command: &Command) -> Option<String> {
    if command.arguments.is_empty() {
        return None;
    }
    let width = command
        .arguments
        .iter()
        .map(|argument| argument.name.len() + 2)
        .max()
        .unwrap_or_default();

    let mut help = String::from("Arguments:");
    for argument in &command.arguments {
        let shown = if argument.required {
            format!("<{}>", argument.name)
        } else {
            format!("[{}]", argument.name)
        };
        let _ = write!(help, "\n  {shown:<width$}  ");
        if !argument.placeholder.is_empty() {
            let _ = write!(help, "{} ", argument.placeholder);
        }
        let _ = write!(
            help,
            "({}{})",
            argument.kind,
            if argument.required { ", required" } else { "" }
        );
    }
    Some(help)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ray_core::{ArgumentSpec, ArgumentType};

    fn command(arguments: &[(&str, bool)]) -> Command {
        Command {
            name: "search".into(),
            title: "Search".into(),
            mode: "view".into(),
            arguments: arguments
                .iter()
                .map(|(name, required)| ArgumentSpec {
                    name: (*name).into(),
                    required: *required,
                    ..ArgumentSpec::default()
                })
                .collect(),
            ..Command::default()
        }
    }

    fn parse(command: &Command, argv: &[&str]) -> Result<Invocation> {
        let matches = build_command("ext", command)
            .try_get_matches_from(std::iter::once("search").chain(argv.iter().copied()))
            .expect("clap accepts any number of values");
        Invocation::from_matches(command, &matches)
    }

    #[test]
    fn leaf_is_well_formed() {
        build_command("ext", &command(&[("query", true), ("scope", false)])).debug_assert();
    }

    #[test]
    fn dispatch_mode_from_flags() {
        assert_eq!(DispatchMode::from_flags(false, false).unwrap(), DispatchMode::Open);
        assert_eq!(DispatchMode::from_flags(true, false).unwrap(), DispatchMode::Print);
        assert_eq!(DispatchMode::from_flags(false, true).unwrap(), DispatchMode::Copy);
        assert!(matches!(
            DispatchMode::from_flags(true, true),
            Err(Error::FlagConflict)
        ));
    }

    #[test]
    fn counts_outside_the_contract_are_rejected() {
        let cmd = command(&[("query", true), ("scope", false)]);
        assert!(matches!(
            parse(&cmd, &[]),
            Err(Error::ArgumentCount { actual: 0, .. })
        ));
        assert_eq!(parse(&cmd, &["a"]).unwrap().values, ["a"]);
        assert_eq!(parse(&cmd, &["a", "b"]).unwrap().values, ["a", "b"]);
        assert!(matches!(
            parse(&cmd, &["a", "b", "c"]),
            Err(Error::ArgumentCount { actual: 3, .. })
        ));
    }

    #[test]
    fn both_flags_are_a_conflict() {
        let cmd = command(&[]);
        assert!(matches!(
            parse(&cmd, &["--print", "--copy"]),
            Err(Error::FlagConflict)
        ));
        assert_eq!(parse(&cmd, &["--copy"]).unwrap().mode, DispatchMode::Copy);
        assert_eq!(parse(&cmd, &[]).unwrap().mode, DispatchMode::Open);
    }

    #[test]
    fn usage_marks_required_and_optional_arguments() {
        let mut leaf = build_command("ext", &command(&[("query", true), ("scope", false)]));
        let usage = leaf.render_usage().to_string();
        assert!(usage.contains("ray ext search <query> [scope] [--print | --copy]"));
    }

    #[test]
    fn arguments_help_lists_placeholders_and_types() {
        let mut cmd = command(&[("query", true)]);
        cmd.arguments.push(ArgumentSpec {
            name: "token".into(),
            kind: ArgumentType::Password,
            placeholder: "API token".into(),
            required: false,
        });
        let help = arguments_help(&cmd).unwrap();
        assert_eq!(
            help,
            "Arguments:\n  <query>  (text, required)\n  [token]  API token (password)"
        );
    }

    #[test]
    fn extension_group_skips_duplicate_commands() {
        let manifest = ExtensionManifest {
            name: "ext".into(),
            commands: vec![command(&[]), command(&[("query", true)])],
            ..ExtensionManifest::default()
        };
        let group = build_extension_command(&manifest);
        group.clone().debug_assert();
        assert_eq!(group.get_subcommands().count(), 1);
    }
}
