// SPDX-License-Identifier: GPL-2.0-or-later
use clap::{Parser, Subcommand};

use crate::config::{load_config, Config};

/// CLI to start the clips service and manage the clip database.
///
/// # Logging
///
/// When running the service, log levels and filtering are controlled by tracing_subscriber's
/// EnvFilter using the RUST_LOG environment variable. Refer to the documentation at
/// https://docs.rs/tracing-subscriber/0.3.1/tracing_subscriber/filter/struct.EnvFilter.html
/// for complete details.
///
/// The most basic form is one of "trace", "debug", "info", "warn", or "error". For example:
///
/// RUST_LOG=warn
///
/// # Configuration
///
/// The configuration file is expected to be in TOML format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Clips {
    /// Path to the clips configuration file
    #[arg(value_parser = load_config, env = "CLIPS_CONFIG")]
    pub config: Config,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web service
    Run {},
    /// Insert the sample clip catalog into the database; by default this only happens when the
    /// database contains no clips at all.
    Seed {
        /// Insert the sample catalog even if the database already contains clips
        #[arg(long)]
        force: bool,
    },
}
