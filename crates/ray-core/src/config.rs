//! Configuration for locating extensions and dispatching deeplinks.
//!
//! Settings are layered, later layers winning:
//!
//! 1. **Defaults**: extensions under `~/.config/raycast/extensions`, the
//!    system clipboard.
//! 2. **Config file**: `$RAY_CONFIG`, or `~/.config/ray/config.toml`. A missing
//!    file is fine; a malformed one is a startup error.
//! 3. **Environment**: `RAY_EXTENSIONS_DIR`, `RAY_CLIPBOARD`.
//!
//! ## Example config file
//!
//! ```toml
//! extensions_dir = "~/src/raycast-extensions"
//! clipboard = "osc52"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "RAY_CONFIG";
/// Environment variable overriding the extensions directory.
pub const EXTENSIONS_DIR_ENV: &str = "RAY_EXTENSIONS_DIR";
/// Environment variable overriding the clipboard backend.
pub const CLIPBOARD_ENV: &str = "RAY_CLIPBOARD";

/// Where `--copy` puts the deeplink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// The platform clipboard tool (`pbcopy`, `wl-copy`, `xclip`, `clip`).
    #[default]
    System,
    /// An OSC 52 escape sequence written to the terminal.
    Osc52,
}

impl FromStr for ClipboardBackend {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "osc52" => Ok(Self::Osc52),
            other => Err(Error::Config(format!(
                "unknown clipboard backend '{other}' (expected 'system' or 'osc52')"
            ))),
        }
    }
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::Osc52 => f.write_str("osc52"),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory containing one subdirectory per installed extension.
    pub extensions_dir: PathBuf,
    /// Clipboard backend for `--copy`.
    pub clipboard: ClipboardBackend,
}

/// On-disk shape of the config file; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    extensions_dir: Option<PathBuf>,
    clipboard: Option<ClipboardBackend>,
}

impl Config {
    /// Defaults relative to `home`.
    pub fn defaults(home: &Path) -> Self {
        Self {
            extensions_dir: default_extensions_dir(home),
            clipboard: ClipboardBackend::default(),
        }
    }

    /// Load configuration for the current user and process environment.
    pub fn load() -> Result<Self> {
        let home = home_dir()?;
        Self::resolve(&home, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from `home` and an environment lookup.
    pub fn resolve(home: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::defaults(home);

        let file_path = env(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map_or_else(|| default_config_file(home), PathBuf::from);
        if let Some(file) = read_file_config(&file_path)? {
            debug!("loaded config from {}", file_path.display());
            if let Some(dir) = file.extensions_dir {
                config.extensions_dir = expand_home(&dir, home);
            }
            if let Some(clipboard) = file.clipboard {
                config.clipboard = clipboard;
            }
        }

        if let Some(dir) = env(EXTENSIONS_DIR_ENV).filter(|value| !value.is_empty()) {
            config.extensions_dir = expand_home(Path::new(&dir), home);
        }
        if let Some(clipboard) = env(CLIPBOARD_ENV).filter(|value| !value.is_empty()) {
            config.clipboard = clipboard.parse()?;
        }

        Ok(config)
    }
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(Error::HomeDirUnavailable)
}

/// `<home>/.config/raycast/extensions`.
pub fn default_extensions_dir(home: &Path) -> PathBuf {
    home.join(".config").join("raycast").join("extensions")
}

/// `<home>/.config/ray/config.toml`.
pub fn default_config_file(home: &Path) -> PathBuf {
    home.join(".config").join("ray").join("config.toml")
}

fn read_file_config(path: &Path) -> Result<Option<FileConfig>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(Error::Config(format!(
                "failed to read {}: {err}",
                path.display()
            )));
        },
    };
    toml::from_str(&contents)
        .map(Some)
        .map_err(|err| Error::Config(format!("failed to parse {}: {err}", path.display())))
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    path.strip_prefix("~")
        .map_or_else(|_| path.to_path_buf(), |rest| home.join(rest))
}
