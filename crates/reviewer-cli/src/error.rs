//! Errors surfaced by the command line tools.

use thiserror::Error;

use super::*;

/// Error type alias used for the [`reviewer_cli`](crate) crate.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors that end a tool run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum CliError {
  /// The library failed: network, remote API, credentials or configuration.
  #[error(transparent)]
  Review(#[from] ReviewError),

  /// An input file could not be read.
  #[error("Failed to read {path:?}: {source}")]
  Read {
    /// File that was requested
    path:   PathBuf,
    /// Underlying I/O failure
    source: std::io::Error,
  },

  /// An input file is not valid JSON of the expected shape.
  #[error("Failed to parse {path:?}: {source}")]
  Parse {
    /// File that was parsed
    path:   PathBuf,
    /// Underlying JSON failure
    source: serde_json::Error,
  },

  /// An output file could not be written.
  #[error("Failed to write {path:?}: {source}")]
  Write {
    /// File that was written
    path:   PathBuf,
    /// Underlying I/O failure
    source: std::io::Error,
  },

  /// Output could not be encoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
