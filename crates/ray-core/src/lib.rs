//! # ray-core
//!
//! Core functionality for `ray`, a command line interface that exposes
//! installed Raycast extension commands and launches them through deeplinks.
//!
//! This crate has no process or terminal side effects. It covers:
//!
//! - **Manifests**: discovering and parsing `package.json` manifests
//! - **Contracts**: deriving positional argument bounds and usage strings
//! - **Deeplinks**: mapping argument values into an encoded `raycast://` URL
//! - **Configuration**: locating extensions and choosing a clipboard backend
//!
//! ## Quick Start
//!
//! ```rust
//! use ray_core::{ArgContract, DeeplinkQuery, ExtensionManifest, deeplink};
//!
//! let manifest = ExtensionManifest::from_json(r#"{
//!     "name": "github", "author": "thomas",
//!     "commands": [{
//!         "name": "search", "mode": "no-view",
//!         "arguments": [{ "name": "query", "type": "text", "required": true }]
//!     }]
//! }"#)?;
//! let command = manifest.command("search").expect("declared");
//!
//! let values = vec!["rust".to_string()];
//! ArgContract::derive(command).check(values.len())?;
//!
//! let query = DeeplinkQuery::build(command, &values)?;
//! let url = deeplink::build(&manifest, command, &query)?;
//! assert_eq!(
//!     url.as_str(),
//!     "raycast://extensions/thomas/github/search?arguments=%7B%22query%22%3A%22rust%22%7D&launchType=background"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration layering (defaults, file, environment)
pub mod config;
/// Positional argument contracts
pub mod contract;
/// Deeplink query and URL construction
pub mod deeplink;
/// Error types and result aliases
pub mod error;
/// Manifest model, discovery and loading
pub mod manifest;

pub use config::{ClipboardBackend, Config};
pub use contract::ArgContract;
pub use deeplink::{DeeplinkQuery, LaunchType};
pub use error::{Error, ErrorKind, Result};
pub use manifest::{ArgumentSpec, ArgumentType, Command, ExtensionManifest};
