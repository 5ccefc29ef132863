//! Piped input forwarded as deeplink context.

use std::io::{self, Read};

use is_terminal::IsTerminal;

/// Environment variable that disables reading piped input.
pub const IGNORE_STDIN_ENV: &str = "RAY_IGNORE_STDIN";

/// Source of the optional `context` bytes.
pub trait ContextSource {
    /// Read the context, or `None` when no input is available.
    fn read_context(&self) -> io::Result<Option<Vec<u8>>>;
}

/// Reads standard input when it is not an interactive terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinContext {
    ignore: bool,
}

impl StdinContext {
    /// Honor `RAY_IGNORE_STDIN`.
    pub fn from_env() -> Self {
        let ignore = std::env::var(IGNORE_STDIN_ENV)
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { ignore }
    }
}

impl ContextSource for StdinContext {
    fn read_context(&self) -> io::Result<Option<Vec<u8>>> {
        let stdin = io::stdin();
        if self.ignore || stdin.is_terminal() {
            return Ok(None);
        }
        let mut buffer = Vec::new();
        stdin.lock().read_to_end(&mut buffer)?;
        Ok(Some(buffer))
    }
}

/// Fixed context, for callers that already hold the bytes.
#[derive(Debug, Clone, Default)]
pub struct StaticContext(pub Option<Vec<u8>>);

impl ContextSource for StaticContext {
    fn read_context(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.0.clone())
    }
}
