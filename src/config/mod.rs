//! Configuration layer for linkback.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The only required field is the source URL: CLI `--source` takes
//! precedence over `source.url` in the config file.
//!
//! # Boolean Flag Semantics
//!
//! `--dry-run` uses OR semantics: if set `true` in either CLI or TOML,
//! the result is `true`. Once set `true` in TOML, CLI cannot override to
//! `false` (flags only enable, not disable).
//!
//! # Config File Lookup
//!
//! When `--config` is not given, the default location
//! (`<config dir>/linkback/linkback.toml`) is loaded if it exists;
//! a missing default file is not an error.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
