//! Building blocks for a paper review workflow.
//!
//! `reviewer` is a library for the three steps of reviewing a research paper:
//!
//! - Fetching a paper's metadata and full text from arXiv or a direct PDF link
//! - Finding the public code repository that accompanies a paper
//! - Publishing the finished review as a page in a Notion database
//!
//! Each step is independent. The command line tools in `reviewer-cli` wire them up one per
//! binary and exchange JSON through files or stdout.
//!
//! # Features
//!
//! - **arXiv metadata**: Identifier extraction from bare ids and `abs`/`pdf` URLs, plus parsing of
//!   the arXiv Atom API
//! - **Layered text extraction**: `pdftotext`, then `lopdf`, then `pdf-extract`; the first
//!   non-empty result wins
//! - **Repository discovery**: GitHub links scraped from the paper text merged with GitHub search
//!   results
//! - **Notion sync**: Page creation, batched block appends, full content replacement and automatic
//!   provisioning of a "Papers" database
//!
//! # Getting Started
//!
//! ```no_run
//! use reviewer::{config::Config, paper::PaperFetcher, repository::RepositoryFinder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(None)?;
//!
//!   // Fetch a paper from arXiv
//!   let paper = PaperFetcher::new(&config)?.fetch("2501.01243").await?;
//!   println!("Title: {}", paper.title);
//!
//!   // Look for its code
//!   let repos = RepositoryFinder::new(&config)?
//!     .find(Some(&paper.title), &paper.authors, Some(&paper.text))
//!     .await;
//!   println!("Found {} candidate repositories", repos.len());
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`arxiv`]: Identifier parsing and the arXiv metadata client
//! - [`paper`]: The paper record and the fetch pipeline
//! - [`pdf`]: Text extraction strategies
//! - [`repository`]: Repository candidates and the GitHub search client
//! - [`notion`]: Notion client, property mapping, block sync and database discovery
//! - [`config`]: Endpoint and timeout configuration
//! - [`credentials`]: API key resolution
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod arxiv;
pub mod config;
pub mod credentials;
pub mod error;
pub mod notion;
pub mod paper;
pub mod pdf;
pub mod repository;

use crate::{config::Config, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use reviewer::{paper::PaperFetcher, prelude::*};
///
/// async fn example() -> Result<(), ReviewError> {
///   let paper = PaperFetcher::new(&Config::default())?.fetch("2501.01243").await?;
///   println!("{}", paper.title);
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    config::Config, credentials::CredentialSource, error::ReviewError, pdf::TextExtractor,
  };
}

/// Builds the HTTP client shared by every remote call in a tool.
///
/// Requests carry the configured user agent. Timeouts are set per request since they differ
/// between endpoints.
pub(crate) fn http_client(config: &Config) -> Result<Client> {
  Ok(Client::builder().user_agent(&config.user_agent).build()?)
}

/// Turns a non-2xx response into [`ReviewError::Api`], keeping the body for diagnostics.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().await.unwrap_or_default();
  Err(ReviewError::Api { status: status.as_u16(), body })
}
