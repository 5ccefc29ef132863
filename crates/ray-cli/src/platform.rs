//! OS capabilities used to hand off a deeplink: opening URLs and copying text.

use std::io;
use std::process::Command;

use ray_core::{ClipboardBackend, Error, Result};
use tracing::debug;

use crate::utils::clipboard;

/// Operations the dispatcher needs from the operating system.
pub trait Platform {
    /// Open `url` with the system URL handler.
    fn open(&self, url: &str) -> Result<()>;

    /// Put `text` on the clipboard.
    fn copy(&self, text: &str) -> Result<()>;
}

/// The real operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPlatform {
    clipboard: ClipboardBackend,
}

impl SystemPlatform {
    /// Use `clipboard` for [`Platform::copy`].
    pub const fn new(clipboard: ClipboardBackend) -> Self {
        Self { clipboard }
    }
}

impl Platform for SystemPlatform {
    fn open(&self, url: &str) -> Result<()> {
        let (program, args) = open_command();
        debug!("opening deeplink with {program}");
        let status = Command::new(program)
            .args(args)
            .arg(url)
            .status()
            .map_err(|err| spawn_error(program, &err))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::dispatch(program, status.to_string()))
        }
    }

    fn copy(&self, text: &str) -> Result<()> {
        match self.clipboard {
            ClipboardBackend::System => clipboard::copy_with_system_tool(text),
            ClipboardBackend::Osc52 => clipboard::copy_via_osc52(text, &mut io::stderr()),
        }
    }
}

/// Program and leading arguments that open a URL on this platform.
const fn open_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        ("rundll32", &["url.dll,FileProtocolHandler"])
    } else {
        ("xdg-open", &[])
    }
}

fn spawn_error(program: &str, err: &io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::dispatch(program, "executable file not found in $PATH")
    } else {
        Error::dispatch(program, err.to_string())
    }
}
