#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// An isolated home directory with its own Raycast extensions folder.
pub struct Sandbox {
    home: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("failed to create home dir for tests"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn extensions_dir(&self) -> PathBuf {
        self.home().join(".config").join("raycast").join("extensions")
    }

    /// Install `manifest` as `<extensions>/<dir>/package.json`.
    pub fn install(&self, dir: &str, manifest: &str) -> &Self {
        let dir = self.extensions_dir().join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), manifest).unwrap();
        self
    }

    /// A `ray` command that sees only this sandbox.
    pub fn ray(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ray"));
        cmd.timeout(CMD_TIMEOUT);
        cmd.env("HOME", self.home());
        cmd.env_remove("RAY_CONFIG");
        cmd.env_remove("RAY_EXTENSIONS_DIR");
        cmd.env_remove("RAY_CLIPBOARD");
        cmd.env_remove("RAY_IGNORE_STDIN");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }
}

#[allow(dead_code)]
pub const EXT_MANIFEST: &str =
    r#"{"name":"ext","author":"me","commands":[{"name":"cmd","mode":"view","arguments":[]}]}"#;

#[allow(dead_code)]
pub const GITHUB_MANIFEST: &str = r#"{
    "name": "github",
    "author": "thomas",
    "title": "GitHub",
    "description": "Work with issues and pull requests",
    "commands": [
        {
            "name": "search",
            "title": "Search Issues",
            "mode": "no-view",
            "arguments": [
                { "name": "query", "type": "text", "placeholder": "Query", "required": true },
                { "name": "scope", "type": "text", "placeholder": "Scope", "required": false }
            ]
        }
    ]
}"#;
