//! Command-line interface definitions using clap
//!
//! `soula` with no subcommand runs the HTTP server.

pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Soula - cloud-drive resource catalog service
#[derive(Parser, Debug)]
#[command(name = "soula")]
#[command(version)]
#[command(about = "Cloud-drive resource catalog service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Seed default categories and friend links, then exit
    Seed,

    /// Import parsed resource records from a JSON file
    ///
    /// The file must contain a JSON array of records; each is upserted by
    /// its unique_id and its links are replaced.
    Import {
        /// Input file path
        file_path: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}
