// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Notiflow CLI
//!
//! This is the main entry point for the Notiflow command-line interface.
//! It initializes the logger and runs the selected command.

use anyhow::Context;
use log::info;
use notiflow::cli;

/// Runs the command selected on the command line and prints its output.
fn run() -> Result<(), anyhow::Error> {
    info!("Starting Notiflow v{}", cli::VERSION);

    let output = cli::execute().context("Failed to run notiflow")?;
    println!("{}", output);
    Ok(())
}

/// The main entry point for the Notiflow CLI.
fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
