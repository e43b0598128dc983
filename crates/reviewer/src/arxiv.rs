//! Client for fetching paper metadata from arXiv.org.
//!
//! Identifiers are new-style arXiv ids (`2501.01243`, optionally versioned as `2501.01243v2`),
//! given either bare or inside an `arxiv.org/abs/...` or `arxiv.org/pdf/...` URL.
//!
//! Metadata comes from arXiv's Atom feed API (http://export.arxiv.org/api/query).
//!
//! # Examples
//!
//! ```no_run
//! use reviewer::{arxiv::ArxivClient, config::Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new(&Config::default())?;
//! if let Some(metadata) = client.fetch_metadata("2501.01243").await? {
//!   println!("Title: {}", metadata.title);
//! }
//! # Ok(())
//! # }
//! ```

use quick_xml::de::from_str;

use super::*;
use crate::config::ArxivSettings;

lazy_static! {
  /// A bare identifier, matched against the whole input.
  static ref BARE_IDENTIFIER: Regex = Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").unwrap();
  /// An identifier inside an abstract or PDF URL.
  static ref URL_IDENTIFIER: Regex =
    Regex::new(r"arxiv\.org/(?:abs|pdf)/(\d{4}\.\d{4,5}(?:v\d+)?)").unwrap();
}

/// Extracts an arXiv identifier from a bare id or an arXiv URL.
///
/// Returns `None` for anything else, which callers treat as a direct PDF link.
///
/// ```
/// use reviewer::arxiv::extract_identifier;
///
/// assert_eq!(extract_identifier("2501.01243"), Some("2501.01243"));
/// assert_eq!(extract_identifier("https://arxiv.org/pdf/2501.01243v2"), Some("2501.01243v2"));
/// assert_eq!(extract_identifier("https://example.com/paper.pdf"), None);
/// ```
pub fn extract_identifier(input: &str) -> Option<&str> {
  if BARE_IDENTIFIER.is_match(input) {
    return Some(input);
  }
  URL_IDENTIFIER.captures(input).and_then(|cap| cap.get(1)).map(|m| m.as_str())
}

/// Canonical abstract page for an identifier.
pub fn abs_url(identifier: &str) -> String { format!("https://arxiv.org/abs/{identifier}") }

/// PDF location used when the API does not advertise one.
pub fn default_pdf_url(identifier: &str) -> String {
  format!("https://arxiv.org/pdf/{identifier}.pdf")
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// Matching entries; empty when the identifier is unknown
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Paper title, possibly wrapped across lines
  #[serde(default)]
  title:     Option<String>,
  /// Paper abstract
  #[serde(default)]
  summary:   Option<String>,
  /// Publication timestamp such as `2025-01-02T13:14:15Z`
  #[serde(default)]
  published: Option<String>,
  /// Authors in paper order
  #[serde(rename = "author", default)]
  authors:   Vec<EntryAuthor>,
  /// Related links: abstract page, PDF, DOI
  #[serde(rename = "link", default)]
  links:     Vec<EntryLink>,
}

/// Internal representation of an author from arXiv's API response.
#[derive(Debug, Deserialize)]
struct EntryAuthor {
  /// Author's full name
  name: String,
}

/// A `<link>` element of an entry.
#[derive(Debug, Deserialize)]
struct EntryLink {
  /// Link target
  #[serde(rename = "@href")]
  href:  String,
  /// Link title; `pdf` marks the PDF link
  #[serde(rename = "@title", default)]
  title: Option<String>,
}

/// Metadata extracted from an arXiv entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArxivMetadata {
  /// Title with all whitespace runs collapsed to single spaces
  pub title:         String,
  /// Author names in paper order
  pub authors:       Vec<String>,
  /// Trimmed abstract
  pub abstract_text: String,
  /// First four characters of the publication timestamp
  pub year:          String,
  /// Link titled `pdf`, if the entry has one
  pub pdf_url:       Option<String>,
}

impl From<Entry> for ArxivMetadata {
  fn from(entry: Entry) -> Self {
    Self {
      title:         entry
        .title
        .map(|title| title.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default(),
      authors:       entry.authors.into_iter().map(|author| author.name.trim().to_string()).collect(),
      abstract_text: entry.summary.map(|summary| summary.trim().to_string()).unwrap_or_default(),
      year:          entry
        .published
        .map(|published| published.trim().chars().take(4).collect())
        .unwrap_or_default(),
      pdf_url:       entry
        .links
        .into_iter()
        .filter(|link| link.title.as_deref() == Some("pdf"))
        .map(|link| link.href)
        .last(),
    }
  }
}

/// Parses an Atom feed, returning the metadata of its first entry.
///
/// A feed without entries yields `Ok(None)`; a document that is not a feed is an error.
pub fn parse_feed(xml: &str) -> Result<Option<ArxivMetadata>> {
  let feed: Feed = from_str(xml)?;
  Ok(feed.entries.into_iter().next().map(ArxivMetadata::from))
}

/// Client for the arXiv metadata API.
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:   Client,
  /// Endpoint and timeouts
  settings: ArxivSettings,
}

impl ArxivClient {
  /// Creates a client from the shared configuration.
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self { client: http_client(config)?, settings: config.arxiv.clone() })
  }

  /// Fetches the metadata for `identifier`.
  ///
  /// Returns `Ok(None)` when arXiv answers with an empty feed.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails or times out
  /// - The API answers with a non-success status
  /// - The response is not an Atom feed
  pub async fn fetch_metadata(&self, identifier: &str) -> Result<Option<ArxivMetadata>> {
    debug!("Fetching arXiv metadata for {identifier} via {}", self.settings.api_url);

    let response = self
      .client
      .get(&self.settings.api_url)
      .query(&[("id_list", identifier)])
      .timeout(self.settings.metadata_timeout())
      .send()
      .await?;
    let body = check_status(response).await?.text().await?;

    trace!("arXiv response: {body}");
    let metadata = parse_feed(&body)?;
    if metadata.is_none() {
      warn!("arXiv returned no entry for {identifier}");
    }
    Ok(metadata)
  }
}
