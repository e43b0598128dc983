//! Error types for the reviewer library.
//!
//! A single error type covers the failure modes of all three tools:
//! - Network and API errors
//! - Malformed input such as unparseable URLs, feeds or JSON
//! - Missing credentials and configuration problems
//! - Local file access
//!
//! Not every failure surfaces here. Text extraction backends and repository searches degrade
//! instead of failing, so their errors are logged and never reach the caller.
//!
//! # Examples
//!
//! ```
//! use reviewer::{credentials::resolve_api_key, error::ReviewError};
//!
//! let missing = || None::<String>;
//! match resolve_api_key(&missing) {
//!   Err(ReviewError::MissingCredential) => println!("Set NOTION_API_KEY first"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Found a key"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`reviewer`](crate) crate.
pub type Result<T> = core::result::Result<T, ReviewError>;

/// Errors that can occur while fetching papers, searching for code or exporting reviews.
#[derive(Error, Debug)]
pub enum ReviewError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The input could not be parsed as a URL.
  ///
  /// Inputs that do not contain an arXiv identifier are treated as direct PDF links, so a string
  /// that is neither ends up here.
  #[error("Invalid URL: {0}")]
  InvalidUrl(#[from] url::ParseError),

  /// A remote API answered with a non-success status.
  ///
  /// The body is kept verbatim since Notion and GitHub both explain the failure there.
  #[error("API error ({status}): {body}")]
  Api {
    /// HTTP status code of the response
    status: u16,
    /// Raw response body
    body:   String,
  },

  /// A remote API answered successfully but the payload was missing something we need.
  #[error("Unexpected response: {0}")]
  UnexpectedResponse(String),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// JSON (de)serialization failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The arXiv Atom feed could not be parsed.
  #[error(transparent)]
  Xml(#[from] quick_xml::DeError),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// No Notion API key was found in the environment or the key file.
  #[error("No Notion API key found. Set NOTION_API_KEY or write the key to ~/.config/notion/api_key")]
  MissingCredential,

  /// The configuration or workspace state does not allow the operation.
  #[error("{0}")]
  Config(String),
}
