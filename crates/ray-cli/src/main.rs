//! ray - run installed Raycast extension commands from the terminal.

use std::process::ExitCode;

fn main() -> ExitCode {
    ray_cli::run()
}
