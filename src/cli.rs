// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line interface for Notiflow
//!
//! This module builds the `notiflow` command, which wraps a piece of text
//! in the requested decorator layers and prints the resulting content.
//!
//! # Examples
//!
//! ```
//! use notiflow::cli;
//!
//! let matches = cli::build().get_matches_from(vec![
//!     "notiflow",
//!     "render",
//!     "Hello",
//!     "--layer",
//!     "encrypted",
//! ]);
//!
//! let output = cli::run(&matches).unwrap();
//! assert_eq!(output, "[Encrypted] Hello");
//! ```

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};

use crate::chain::{ChainBuilder, Layer};
use crate::core::config::ConfigBuilder;
use crate::core::error::{NotiflowError, Result};
use crate::message::TextMessage;

/// The current version of Notiflow, as defined in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of environment variables read as configuration overrides.
pub const ENV_PREFIX: &str = "NOTIFLOW_";

/// Builds and configures the Notiflow command-line interface.
pub fn build() -> Command {
    debug!("Building CLI command structure");

    Command::new("notiflow")
        .author("Notiflow Contributors")
        .about("Composes notification content from stackable decorators.")
        .version(VERSION)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Wrap text in decorator layers and print the content")
                .arg(
                    Arg::new("text")
                        .help("Content of the base message")
                        .required(true)
                        .value_parser(value_parser!(String)),
                )
                .arg(
                    Arg::new("layer")
                        .short('l')
                        .long("layer")
                        .help("Layer to apply, innermost first (repeatable)")
                        .action(ArgAction::Append)
                        .value_parser(Layer::ALL.map(Layer::name)),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("TOML configuration file")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the content as a JSON object")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("layers").about("List the available layers"))
}

/// Parses the process arguments and runs the selected command.
///
/// # Returns
/// * `Result<String>` - The text to print, or an error if execution fails.
pub fn execute() -> Result<String> {
    run(&build().get_matches())
}

/// Runs the command described by `matches`.
///
/// # Returns
/// * `Result<String>` - The text to print, or an error if execution fails.
pub fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("render", sub_matches)) => render(sub_matches),
        Some(("layers", _)) => Ok(list_layers()),
        _ => Err(NotiflowError::internal_error("Unknown command")),
    }
}

fn render(matches: &ArgMatches) -> Result<String> {
    let text = matches.get_one::<String>("text").ok_or_else(|| {
        NotiflowError::internal_error("Missing text argument")
    })?;

    let mut builder = ConfigBuilder::new().with_env_prefix(ENV_PREFIX);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        builder = builder.with_file(path);
    }
    let config = builder.build()?;

    if let Some(names) = matches.get_many::<String>("layer") {
        config.write().layers = names
            .map(|name| name.parse::<Layer>())
            .collect::<Result<Vec<_>>>()?;
    }
    let chain = ChainBuilder::from_config(&config.read());

    info!("Rendering notification of {} bytes", text.len());
    let content = chain
        .base(TextMessage::new(text.clone()))
        .build()?
        .content()?;

    if matches.get_flag("json") {
        Ok(serde_json::json!({ "content": content }).to_string())
    } else {
        Ok(content)
    }
}

fn list_layers() -> String {
    Layer::ALL
        .iter()
        .map(|layer| layer.name())
        .collect::<Vec<_>>()
        .join("\n")
}
