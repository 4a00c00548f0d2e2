// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build script ensuring the toolchain meets the minimum supported Rust version.

/// Minimum supported Rust version, kept in sync with `rust-version` in `Cargo.toml`.
const MIN_RUST_VERSION: &str = "1.74.0";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if version_check::is_min_version(MIN_RUST_VERSION) != Some(true) {
        eprintln!(
            "notiflow requires Rust {} or newer. Please update your toolchain.",
            MIN_RUST_VERSION
        );
        std::process::exit(1);
    }
}
