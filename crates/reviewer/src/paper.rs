//! The paper record and the pipeline that produces it.
//!
//! Fetching a paper means:
//!
//! 1. Recognising an arXiv identifier in the input, or treating the input as a direct PDF URL
//! 2. Asking the arXiv API for metadata when there is an identifier
//! 3. Downloading the PDF into a temporary file
//! 4. Running the [`ExtractionChain`] over it
//! 5. Truncating the text to [`MAX_TEXT_CHARS`] characters
//!
//! The temporary file is removed whether or not extraction succeeds.
//!
//! # Examples
//!
//! ```no_run
//! use reviewer::{config::Config, paper::PaperFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = PaperFetcher::new(&Config::default())?;
//!
//! // From arXiv URL
//! let paper = fetcher.fetch("https://arxiv.org/abs/2501.01243").await?;
//! println!("Title: {}", paper.title);
//!
//! // From a PDF hosted anywhere else; metadata stays empty
//! let paper = fetcher.fetch("https://example.com/paper.pdf").await?;
//! println!("{} characters of text", paper.text.len());
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use tempfile::NamedTempFile;

use super::*;
use crate::{
  arxiv::{ArxivClient, ArxivMetadata},
  config::ArxivSettings,
  pdf::ExtractionChain,
};

/// Longest text kept in a [`Paper`], in characters.
pub const MAX_TEXT_CHARS: usize = 100_000;

/// Appended to text cut at [`MAX_TEXT_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n[... truncated at 100K chars ...]";

/// Metadata and full text of a paper.
///
/// Serializes to the JSON document printed by `fetch-paper`:
/// `title`, `authors`, `abstract`, `year`, `url`, `pdf_url`, `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// The paper's title, empty for direct PDF links
  pub title:         String,
  /// Author names in paper order
  pub authors:       Vec<String>,
  /// Abstract text
  #[serde(rename = "abstract")]
  pub abstract_text: String,
  /// Four digit publication year, or empty
  pub year:          String,
  /// Canonical landing page
  pub url:           String,
  /// Where the PDF was downloaded from
  pub pdf_url:       String,
  /// Extracted full text, possibly truncated
  pub text:          String,
}

/// Everything about a paper except its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Metadata {
  /// See [`Paper::title`]
  title:         String,
  /// See [`Paper::authors`]
  authors:       Vec<String>,
  /// See [`Paper::abstract_text`]
  abstract_text: String,
  /// See [`Paper::year`]
  year:          String,
  /// See [`Paper::url`]
  url:           String,
  /// See [`Paper::pdf_url`]
  pdf_url:       String,
}

impl Metadata {
  /// Metadata for an arXiv identifier; the URLs are filled in even without an API entry.
  fn from_arxiv(identifier: &str, metadata: Option<ArxivMetadata>) -> Self {
    let metadata = metadata.unwrap_or_default();
    Self {
      title:         metadata.title,
      authors:       metadata.authors,
      abstract_text: metadata.abstract_text,
      year:          metadata.year,
      url:           arxiv::abs_url(identifier),
      pdf_url:       metadata.pdf_url.unwrap_or_else(|| arxiv::default_pdf_url(identifier)),
    }
  }

  /// Metadata for a direct PDF link: only the URLs are known.
  fn from_pdf_url(url: &str) -> Self {
    Self { url: url.to_string(), pdf_url: url.to_string(), ..Self::default() }
  }

  /// Completes the record with its text.
  fn with_text(self, text: String) -> Paper {
    Paper {
      title: self.title,
      authors: self.authors,
      abstract_text: self.abstract_text,
      year: self.year,
      url: self.url,
      pdf_url: self.pdf_url,
      text,
    }
  }
}

/// Cuts `text` to [`MAX_TEXT_CHARS`] characters and appends [`TRUNCATION_MARKER`].
///
/// Text at or below the limit is returned unchanged.
///
/// ```
/// use reviewer::paper::{truncate_text, MAX_TEXT_CHARS, TRUNCATION_MARKER};
///
/// assert_eq!(truncate_text("short".to_string()), "short");
///
/// let long = "x".repeat(MAX_TEXT_CHARS + 1);
/// let cut = truncate_text(long);
/// assert!(cut.ends_with(TRUNCATION_MARKER));
/// assert_eq!(cut.chars().count(), MAX_TEXT_CHARS + TRUNCATION_MARKER.chars().count());
/// ```
pub fn truncate_text(text: String) -> String {
  match text.char_indices().nth(MAX_TEXT_CHARS) {
    Some((byte_index, _)) => {
      debug!("Truncating extracted text at {MAX_TEXT_CHARS} characters");
      let mut truncated = text;
      truncated.truncate(byte_index);
      truncated.push_str(TRUNCATION_MARKER);
      truncated
    },
    None => text,
  }
}

/// Produces [`Paper`]s from arXiv identifiers, arXiv URLs or direct PDF URLs.
pub struct PaperFetcher {
  /// Metadata client
  arxiv:      ArxivClient,
  /// Client used for the PDF download
  client:     Client,
  /// Download timeout
  settings:   ArxivSettings,
  /// Text extraction strategies
  extractors: ExtractionChain,
}

impl PaperFetcher {
  /// Creates a fetcher using the standard extraction chain.
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self {
      arxiv:      ArxivClient::new(config)?,
      client:     http_client(config)?,
      settings:   config.arxiv.clone(),
      extractors: ExtractionChain::standard(&config.pdf),
    })
  }

  /// Replaces the extraction chain.
  pub fn with_extractors(mut self, extractors: ExtractionChain) -> Self {
    self.extractors = extractors;
    self
  }

  /// Fetches metadata and full text for `input`.
  ///
  /// # Arguments
  ///
  /// * `input` - One of:
  ///   - A bare arXiv id: "2501.01243" or "2501.01243v2"
  ///   - An arXiv URL: "https://arxiv.org/abs/2501.01243", "https://arxiv.org/pdf/2501.01243"
  ///   - Any other URL, taken to point directly at a PDF
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The input is neither an arXiv identifier nor a valid URL
  /// - The metadata query or the download fails, times out or returns a non-success status
  /// - The temporary file cannot be written
  ///
  /// Missing extraction backends are not an error; the text becomes the placeholder instead.
  pub async fn fetch(&self, input: &str) -> Result<Paper> {
    let metadata = match arxiv::extract_identifier(input) {
      Some(identifier) => {
        info!("Resolved arXiv identifier {identifier}");
        let metadata = self.arxiv.fetch_metadata(identifier).await?;
        Metadata::from_arxiv(identifier, metadata)
      },
      None => {
        info!("No arXiv identifier in {input:?}, treating it as a direct PDF URL");
        Metadata::from_pdf_url(input)
      },
    };

    let file = self.download(&metadata.pdf_url).await?;
    let text = self.extractors.extract(file.path()).await;
    file.close()?;

    Ok(metadata.with_text(truncate_text(text)))
  }

  /// Downloads `url` into a temporary `.pdf` file that is deleted when dropped.
  async fn download(&self, url: &str) -> Result<NamedTempFile> {
    let url = Url::parse(url)?;
    debug!("Downloading PDF from {url}");

    let response =
      self.client.get(url).timeout(self.settings.download_timeout()).send().await?;
    let bytes = check_status(response).await?.bytes().await?;

    let mut file = tempfile::Builder::new().prefix("paper-").suffix(".pdf").tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;
    debug!("Wrote {} bytes to {:?}", bytes.len(), file.path());
    Ok(file)
  }
}
