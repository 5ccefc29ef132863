//! Raycast deeplink construction.
//!
//! A command invocation becomes a URL of the form
//!
//! ```text
//! raycast://extensions/<author>/<extension>/<command>?arguments=..&context=..&launchType=background
//! ```
//!
//! All query parameters are conditional:
//!
//! - `arguments`: JSON object of the supplied positional values, keyed by the
//!   declared argument names. Absent when no value was supplied.
//! - `context`: raw piped input. Absent when nothing was piped.
//! - `launchType`: `background` for every command whose mode is not `view`.
//!
//! Parameters are emitted in alphabetical key order and form-urlencoded.
//!
//! ```rust
//! use ray_core::{Command, DeeplinkQuery, ExtensionManifest, deeplink};
//!
//! let manifest = ExtensionManifest {
//!     name: "ext".into(),
//!     author: "me".into(),
//!     ..ExtensionManifest::default()
//! };
//! let command = Command { name: "cmd".into(), mode: "view".into(), ..Command::default() };
//!
//! let query = DeeplinkQuery::build(&command, &[])?;
//! let url = deeplink::build(&manifest, &command, &query)?;
//! assert_eq!(url.as_str(), "raycast://extensions/me/ext/cmd");
//! # Ok::<(), ray_core::Error>(())
//! ```

use std::collections::BTreeMap;

use url::Url;

use crate::manifest::{Command, ExtensionManifest};
use crate::{Error, Result};

/// Scheme and host every deeplink starts with.
pub const DEEPLINK_BASE: &str = "raycast://extensions/";

/// Query key carrying the JSON-encoded argument map.
pub const ARGUMENTS_KEY: &str = "arguments";
/// Query key carrying piped input.
pub const CONTEXT_KEY: &str = "context";
/// Query key requesting a background launch.
pub const LAUNCH_TYPE_KEY: &str = "launchType";

/// Launch type requested through the deeplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchType {
    /// Run without opening the Raycast window.
    Background,
}

impl LaunchType {
    /// Query-string spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
        }
    }
}

/// Query parameters of a deeplink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeeplinkQuery {
    /// `Some(Background)` unless the command is a view command.
    pub launch_type: Option<LaunchType>,
    /// Supplied values keyed by argument name; unsupplied arguments are absent.
    pub arguments: BTreeMap<String, String>,
    /// Piped input, forwarded verbatim.
    pub context: Option<String>,
}

impl DeeplinkQuery {
    /// Map `values` onto the declared arguments of `command` by position.
    ///
    /// Positions past the end of `values` are skipped when optional and
    /// rejected when required. Values past the declared arguments are ignored;
    /// callers enforce the count with [`ArgContract::check`](crate::ArgContract::check).
    pub fn build(command: &Command, values: &[String]) -> Result<Self> {
        let mut arguments = BTreeMap::new();
        for (index, argument) in command.arguments.iter().enumerate() {
            match values.get(index) {
                Some(value) => {
                    arguments.insert(argument.name.clone(), value.clone());
                },
                None if argument.required => {
                    return Err(Error::MissingRequiredArgument {
                        name: argument.name.clone(),
                    });
                },
                None => {},
            }
        }

        Ok(Self {
            launch_type: (!command.is_view()).then_some(LaunchType::Background),
            arguments,
            context: None,
        })
    }

    /// Attach piped input. Empty input leaves `context` unset.
    #[must_use]
    pub fn with_context(mut self, bytes: &[u8]) -> Self {
        if !bytes.is_empty() {
            self.context = Some(String::from_utf8_lossy(bytes).into_owned());
        }
        self
    }

    /// Query pairs in alphabetical key order.
    pub fn pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = Vec::with_capacity(3);
        if !self.arguments.is_empty() {
            pairs.push((ARGUMENTS_KEY, serde_json::to_string(&self.arguments)?));
        }
        if let Some(context) = &self.context {
            pairs.push((CONTEXT_KEY, context.clone()));
        }
        if let Some(launch_type) = self.launch_type {
            pairs.push((LAUNCH_TYPE_KEY, launch_type.as_str().to_string()));
        }
        Ok(pairs)
    }
}

/// Assemble the deeplink for `command` of `manifest`.
pub fn build(manifest: &ExtensionManifest, command: &Command, query: &DeeplinkQuery) -> Result<Url> {
    let mut url = Url::parse(DEEPLINK_BASE).map_err(|err| Error::InvalidUrl(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(format!("{DEEPLINK_BASE} cannot be a base")))?
        .pop_if_empty()
        .extend([&manifest.author, &manifest.name, &command.name]);

    let pairs = query.pairs()?;
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}
