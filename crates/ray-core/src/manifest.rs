//! Raycast extension manifests.
//!
//! Every installed extension lives in its own directory below the extensions
//! root and declares its identity and commands in a `package.json`:
//!
//! ```text
//! ~/.config/raycast/extensions/
//! ├── github/package.json
//! └── spotify/package.json
//! ```
//!
//! Only the fields needed to build commands are modelled; everything else in
//! the document is ignored. Missing and `null` fields decode to their empty
//! value.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// File name of the manifest inside each extension directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Command mode that opens a view instead of running in the background.
pub const VIEW_MODE: &str = "view";

/// An installed extension and the commands it exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionManifest {
    /// Extension name, used as the CLI group name and deeplink segment.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Author handle, the first deeplink segment.
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    /// Human-readable title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Longer description shown in help.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Declared commands, in manifest order.
    #[serde(deserialize_with = "null_as_default")]
    pub commands: Vec<Command>,
}

/// A single command declared by an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    /// Command name, used as the CLI subcommand and last deeplink segment.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Human-readable title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Longer description shown in help.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Launch mode (`view`, `no-view`, `menu-bar`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub mode: String,
    /// Declared arguments; position is taken from this order.
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<ArgumentSpec>,
}

impl Command {
    /// Whether this command opens a view rather than running in the background.
    pub fn is_view(&self) -> bool {
        self.mode == VIEW_MODE
    }
}

/// A positional argument declared by a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentSpec {
    /// Key used in the deeplink `arguments` object.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Declared input type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ArgumentType,
    /// Placeholder text shown by Raycast.
    #[serde(deserialize_with = "null_as_default")]
    pub placeholder: String,
    /// Whether a value must be supplied.
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
}

/// Decode `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Declared argument type.
///
/// The type only documents intent; every value is forwarded as a string.
/// Types this crate does not know are preserved as [`ArgumentType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentType {
    /// Plain text input.
    #[default]
    Text,
    /// Secure text input.
    Password,
    /// Any other declared type, kept verbatim.
    Other(String),
}

impl ArgumentType {
    /// The manifest spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for ArgumentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" | "" => Self::Text,
            "password" => Self::Password,
            _ => Self::Other(value),
        }
    }
}

impl From<ArgumentType> for String {
    fn from(value: ArgumentType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExtensionManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a manifest from a reader.
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(io::BufReader::new(reader))
    }

    /// Read and parse the manifest at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|source| {
            if source.is_io() {
                Error::ManifestRead {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                Error::ManifestParse {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    /// Find a declared command by name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }
}

/// List `<root>/*/package.json`, sorted by path.
///
/// A missing root yields no manifests. Any other enumeration failure aborts.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let discovery_error = |source| Error::Discovery {
        root: root.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("extensions directory {} does not exist", root.display());
            return Ok(Vec::new());
        },
        Err(err) => return Err(discovery_error(err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let candidate = entry.map_err(discovery_error)?.path().join(MANIFEST_FILE);
        if candidate.is_file() {
            paths.push(candidate);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Discover and parse every manifest under `root`.
///
/// The first unreadable or malformed manifest aborts the whole load.
pub fn load_all(root: &Path) -> Result<Vec<ExtensionManifest>> {
    discover(root)?
        .iter()
        .map(|path| {
            let manifest = ExtensionManifest::from_path(path)?;
            debug!(
                extension = %manifest.name,
                commands = manifest.commands.len(),
                "loaded manifest {}",
                path.display()
            );
            Ok(manifest)
        })
        .collect()
}
