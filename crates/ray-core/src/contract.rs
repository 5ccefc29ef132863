//! Positional argument contracts derived from command declarations.
//!
//! A command accepts between `min` and `max` positional values, where `min`
//! counts the required arguments and `max` counts all of them. Declaration
//! order is used as-is; a manifest may list a required argument after an
//! optional one, which is why the deeplink builder re-checks required
//! positions when mapping values.

use std::fmt::Write as _;

use crate::manifest::Command;
use crate::{Error, Result};

/// How many positional values a command accepts, and how to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgContract {
    /// Name of the command the contract belongs to.
    pub command: String,
    /// Number of required arguments.
    pub min: usize,
    /// Number of declared arguments.
    pub max: usize,
    /// Usage line, e.g. `search <query> [limit]`.
    pub usage: String,
}

impl ArgContract {
    /// Derive the contract for `command`.
    pub fn derive(command: &Command) -> Self {
        let mut usage = command.name.clone();
        let (mut min, mut max) = (0, 0);

        for argument in &command.arguments {
            if argument.required {
                let _ = write!(usage, " <{}>", argument.name);
                min += 1;
            } else {
                let _ = write!(usage, " [{}]", argument.name);
            }
            max += 1;
        }

        Self {
            command: command.name.clone(),
            min,
            max,
            usage,
        }
    }

    /// Whether `count` positional values satisfy the contract.
    pub const fn accepts(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }

    /// Reject `count` positional values outside `[min, max]`.
    pub fn check(&self, count: usize) -> Result<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(Error::ArgumentCount {
                command: self.command.clone(),
                min: self.min,
                max: self.max,
                actual: count,
            })
        }
    }
}
