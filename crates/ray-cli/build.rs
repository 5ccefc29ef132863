//! Build script for ray-cli
//!
//! Stamps the build date into the binary for `ray --version`. Release builds
//! set `RAY_BUILD_DATE`; local builds report `unknown`.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=RAY_BUILD_DATE");

    let date = env::var("RAY_BUILD_DATE")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=RAY_BUILD_DATE={date}");
}
