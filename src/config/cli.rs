//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// linkback: Webmention and Pingback notification sender
///
/// Discovers the notification endpoints advertised by every page a
/// source document links to and delivers a mention to each of them.
#[derive(Debug, Parser)]
#[command(name = "linkback")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source document URL (required for run mode)
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Read the source document body from a local file instead of
    /// fetching it over HTTP
    #[arg(long = "body-file", value_name = "PATH")]
    pub body_file: Option<PathBuf>,

    /// Short URL sent as the webmention source to shortener-sensitive
    /// receivers
    #[arg(long = "short-url")]
    pub short_url: Option<String>,

    /// Vouch URL included with every webmention
    #[arg(long)]
    pub vouch: Option<String>,

    /// HTTP/HTTPS proxy URL for all outgoing requests
    #[arg(long)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Discover endpoints and report them without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Collect and print a step-by-step discovery and delivery trace
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for linkback
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "linkback.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
