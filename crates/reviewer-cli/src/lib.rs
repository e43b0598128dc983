//! Command line tools for the paper review workflow.
//!
//! Three independent binaries, each a thin shell around one part of the [`reviewer`] library:
//!
//! - `fetch-paper`: download a paper and print its metadata and text as JSON
//! - `find-repo`: look for the code repository that accompanies a paper
//! - `notion-export`: publish a review to a Notion database, or replace an existing page
//!
//! # Usage
//!
//! ```bash
//! # Fetch a paper by arXiv identifier and keep the result
//! fetch-paper 2501.01243 -o paper.json
//!
//! # Find candidate repositories
//! find-repo --title "Attention Is All You Need" --authors "Ashish Vaswani, Noam Shazeer"
//!
//! # Publish a review; the "Papers" database is found or created when --db is omitted
//! notion-export --properties props.json --blocks blocks.json
//!
//! # Replace the body of an existing page
//! notion-export --properties props.json --blocks blocks.json --update <page_id>
//! ```
//!
//! Results go to stdout as JSON; logs and notices go to stderr. Every tool accepts `--config` to
//! point at a configuration file and `-v` (repeatable) to raise the log level.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::{builder::ArgAction, Args};
use console::style;
use reviewer::{config::Config, error::ReviewError};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::error::*;

/// Prefix for success notices
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Options shared by every tool.
#[derive(Args, Clone, Debug, Default)]
pub struct CommonOptions {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  pub verbose: u8,

  /// Configuration file. Defaults to `paper-review/config.toml` in the platform config directory
  /// when that file exists.
  #[arg(long)]
  pub config: Option<PathBuf>,
}

impl CommonOptions {
  /// Loads the configuration these options point at.
  pub fn load_config(&self) -> Result<Config> { Ok(Config::load(self.config.as_deref())?) }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs are written to stderr so stdout only carries JSON.
pub fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Reads and parses a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  debug!("Reading {path:?}");
  let content =
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.into(), source })?;
  serde_json::from_str(&content).map_err(|source| CliError::Parse { path: path.into(), source })
}

/// Prints `value` to stdout as indented JSON.
pub fn print_pretty<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Prints `value` to stdout as a single line of JSON.
pub fn print_compact<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string(value)?);
  Ok(())
}

/// Writes `value` to `path` as indented JSON and says so on stderr.
pub fn save_pretty<T: Serialize>(value: &T, path: &Path) -> Result<()> {
  std::fs::write(path, serde_json::to_string_pretty(value)?)
    .map_err(|source| CliError::Write { path: path.into(), source })?;
  info!("Wrote {path:?}");
  eprintln!("{}Saved to {}", style(SUCCESS_PREFIX).green(), path.display());
  Ok(())
}

/// Turns a tool's result into its exit status, reporting failures on stderr.
pub fn finish(result: Result<()>) -> ExitCode {
  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      debug!("{e:?}");
      eprintln!("{}{e}", style(ERROR_PREFIX).red());
      ExitCode::FAILURE
    },
  }
}
