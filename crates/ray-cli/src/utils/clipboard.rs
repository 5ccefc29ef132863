//! Clipboard backends for `--copy`.
//!
//! Two ways of getting a deeplink onto the clipboard:
//!
//! - **System**: pipe the text into the platform clipboard tool. On Linux the
//!   first installed tool wins, Wayland's `wl-copy` first when a Wayland
//!   session is detected.
//! - **OSC 52**: write `\x1b]52;c;<base64>\x07` to the terminal, which copies
//!   even over SSH and inside tmux.
//!
//! References:
//! - https://invisible-island.net/xterm/ctlseqs/ctlseqs.html#h3-Operating-System-Commands

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use base64::{Engine, engine::general_purpose::STANDARD};
use ray_core::{Error, Result};
use tracing::debug;

/// A clipboard program and its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    /// Executable name.
    pub program: &'static str,
    /// Arguments that make it read the clipboard contents from stdin.
    pub args: &'static [&'static str],
}

const PBCOPY: ClipboardTool = ClipboardTool {
    program: "pbcopy",
    args: &[],
};
const WL_COPY: ClipboardTool = ClipboardTool {
    program: "wl-copy",
    args: &[],
};
const XCLIP: ClipboardTool = ClipboardTool {
    program: "xclip",
    args: &["-selection", "clipboard"],
};
const XSEL: ClipboardTool = ClipboardTool {
    program: "xsel",
    args: &["--clipboard", "--input"],
};
const CLIP: ClipboardTool = ClipboardTool {
    program: "clip",
    args: &[],
};

/// Clipboard tools to try on this platform, in order.
pub fn candidate_tools(wayland: bool) -> Vec<ClipboardTool> {
    if cfg!(target_os = "macos") {
        vec![PBCOPY]
    } else if cfg!(windows) {
        vec![CLIP]
    } else if wayland {
        vec![WL_COPY, XCLIP, XSEL]
    } else {
        vec![XCLIP, XSEL, WL_COPY]
    }
}

/// Copy `text` with the first available system clipboard tool.
pub fn copy_with_system_tool(text: &str) -> Result<()> {
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    let tools = candidate_tools(wayland);

    for tool in &tools {
        match pipe_into(tool, text) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} is not installed", tool.program);
            },
            Err(err) => return Err(Error::dispatch(tool.program, err.to_string())),
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => return Err(Error::dispatch(tool.program, status.to_string())),
        }
    }

    let tried: Vec<&str> = tools.iter().map(|tool| tool.program).collect();
    Err(Error::dispatch(
        "clipboard",
        format!("no clipboard utility found (tried {})", tried.join(", ")),
    ))
}

fn pipe_into(tool: &ClipboardTool, text: &str) -> io::Result<ExitStatus> {
    let child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()?;
    feed_and_wait(child, text.as_bytes())
}

/// Write `input` to the child's stdin, close it, and always reap the child.
fn feed_and_wait(mut child: Child, input: &[u8]) -> io::Result<ExitStatus> {
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(input));
    let status = child.wait()?;
    written.map(|()| status)
}

/// Encode `text` as an OSC 52 clipboard escape sequence.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text);
    // BEL terminator; some terminals ignore ST
    format!("\x1b]52;c;{encoded}\x07")
}

/// Copy `text` by writing an OSC 52 sequence to `writer`.
pub fn copy_via_osc52(text: &str, writer: &mut dyn Write) -> Result<()> {
    writer
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|err| Error::dispatch("osc52", err.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn osc52_wraps_base64_payload() {
        assert_eq!(
            osc52_sequence("raycast://extensions/me/ext/cmd"),
            "\x1b]52;c;cmF5Y2FzdDovL2V4dGVuc2lvbnMvbWUvZXh0L2NtZA==\x07"
        );
    }

    #[test]
    fn osc52_writes_to_the_given_writer() {
        let mut buffer = Vec::new();
        assert!(copy_via_osc52("hi", &mut buffer).is_ok());
        assert_eq!(buffer, b"\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn empty_string() {
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn child_is_reaped_when_its_stdin_closes_early() {
        let child = Command::new("sh")
            .args(["-c", "exec 0<&-; exit 3"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .expect("sh is available");
        let pid = child.id();
        let input = vec![b'x'; 1 << 20];

        let result = feed_and_wait(child, &input);

        assert_eq!(result.expect_err("write to a closed pipe fails").kind(), io::ErrorKind::BrokenPipe);
        assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn wayland_prefers_wl_copy() {
        assert_eq!(candidate_tools(true)[0].program, "wl-copy");
        assert_eq!(candidate_tools(false)[0].program, "xclip");
    }
}
