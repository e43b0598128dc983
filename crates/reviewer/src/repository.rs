//! Discovery of the code repository that accompanies a paper.
//!
//! Candidates come from three places, in this order:
//!
//! 1. GitHub links found in the paper text ([`Provenance::PaperText`])
//! 2. A GitHub search for the title ([`Provenance::GithubSearch`])
//! 3. A GitHub search for the title plus the first author's surname
//!    ([`Provenance::GithubAuthorSearch`])
//!
//! Text links are deduplicated among themselves and the author search never repeats a URL that is
//! already listed. The plain title search is appended as is, so it may repeat a link from the
//! text.
//!
//! A failing search is logged and counts as zero results.

use super::*;
use crate::config::GithubSettings;

lazy_static! {
  /// `owner/repo` path of a GitHub link.
  static ref GITHUB_LINK: Regex =
    Regex::new(r"https?://github\.com/([a-zA-Z0-9_.-]+/[a-zA-Z0-9_.-]+)").unwrap();
}

/// Characters stripped from the end of a link found in running text.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ')'];

/// Which strategy produced a [`RepositoryCandidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
  /// Linked from the paper text
  PaperText,
  /// GitHub search for the title
  GithubSearch,
  /// GitHub search for the title and first author's surname
  GithubAuthorSearch,
}

impl Display for Provenance {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Provenance::PaperText => write!(f, "paper_text"),
      Provenance::GithubSearch => write!(f, "github_search"),
      Provenance::GithubAuthorSearch => write!(f, "github_author_search"),
    }
  }
}

/// A repository that may hold a paper's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCandidate {
  /// `https://github.com/<owner>/<repo>`
  pub url:         String,
  /// Star count; unknown for links found in text
  pub stars:       Option<u64>,
  /// Repository description, empty when there is none
  pub description: String,
  /// How the candidate was found
  pub source:      Provenance,
}

impl RepositoryCandidate {
  /// A candidate linked from the paper text.
  fn from_text(url: String) -> Self {
    Self { url, stars: None, description: String::new(), source: Provenance::PaperText }
  }
}

/// Extracts GitHub repository links from `text`.
///
/// Links are normalized to `https://github.com/<owner>/<repo>`, stripped of trailing punctuation
/// and deduplicated in order of first appearance.
///
/// ```
/// use reviewer::repository::github_urls_in_text;
///
/// let text = "Code: https://github.com/acme/agent. See also (http://github.com/acme/agent).";
/// assert_eq!(github_urls_in_text(text), vec!["https://github.com/acme/agent"]);
/// ```
pub fn github_urls_in_text(text: &str) -> Vec<String> {
  let mut urls: Vec<String> = Vec::new();
  for capture in GITHUB_LINK.captures_iter(text) {
    let path = capture[1].trim_end_matches(TRAILING_PUNCTUATION);
    let url = format!("https://github.com/{path}");
    if !urls.contains(&url) {
      urls.push(url);
    }
  }
  urls
}

/// Splits a comma separated author list into trimmed names, keeping empty entries in place.
///
/// ```
/// use reviewer::repository::split_authors;
///
/// assert_eq!(split_authors("Ada King Lovelace, Alan Turing"), vec!["Ada King Lovelace", "Alan Turing"]);
/// assert_eq!(split_authors(" , Alan Turing"), vec!["", "Alan Turing"]);
/// ```
pub fn split_authors(list: &str) -> Vec<String> {
  list.split(',').map(|name| name.trim().to_string()).collect()
}

/// Surname of an author: the last whitespace separated token of the name.
///
/// ```
/// use reviewer::repository::surname;
///
/// assert_eq!(surname("Ada King Lovelace"), Some("Lovelace"));
/// assert_eq!(surname("  "), None);
/// ```
pub fn surname(name: &str) -> Option<&str> { name.split_whitespace().last() }

/// Search response of the GitHub API.
#[derive(Debug, Deserialize)]
struct SearchResponse {
  /// Matching repositories
  #[serde(default)]
  items: Vec<SearchItem>,
}

/// One repository in a GitHub search response.
#[derive(Debug, Deserialize)]
struct SearchItem {
  /// Browser URL of the repository
  html_url:         String,
  /// Star count
  stargazers_count: u64,
  /// Description; null when the owner never set one
  description:      Option<String>,
}

/// Searches GitHub for repositories.
pub struct GithubSearch {
  /// Internal web client used to connect to the API.
  client:   Client,
  /// Endpoint, timeout and result cap
  settings: GithubSettings,
}

impl GithubSearch {
  /// Creates a search client from the shared configuration.
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self { client: http_client(config)?, settings: config.github.clone() })
  }

  /// Runs one search, sorted by stars, and tags every result with `source`.
  ///
  /// # Errors
  ///
  /// Network failures, non-success statuses and malformed responses are errors.
  /// [`RepositoryFinder`] turns them into empty results.
  pub async fn search(&self, query: &str, source: Provenance) -> Result<Vec<RepositoryCandidate>> {
    let url = format!("{}/search/repositories", self.settings.api_url.trim_end_matches('/'));
    let per_page = self.settings.max_results.to_string();
    debug!("Searching GitHub for {query:?}");

    let response = self
      .client
      .get(&url)
      .query(&[
        ("q", query),
        ("sort", "stars"),
        ("order", "desc"),
        ("per_page", per_page.as_str()),
      ])
      .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
      .timeout(self.settings.timeout())
      .send()
      .await?;
    let response: SearchResponse = check_status(response).await?.json().await?;

    Ok(
      response
        .items
        .into_iter()
        .map(|item| RepositoryCandidate {
          url: item.html_url,
          stars: Some(item.stargazers_count),
          description: item.description.unwrap_or_default(),
          source,
        })
        .collect(),
    )
  }
}

/// Combines text scanning and GitHub search into one candidate list.
pub struct RepositoryFinder {
  /// Search client
  search: GithubSearch,
}

impl RepositoryFinder {
  /// Creates a finder from the shared configuration.
  pub fn new(config: &Config) -> Result<Self> { Ok(Self { search: GithubSearch::new(config)? }) }

  /// Collects candidates for a paper.
  ///
  /// # Arguments
  ///
  /// * `title` - Paper title; enables both searches
  /// * `authors` - One name per element, in paper order; with a title, the first author's surname
  ///   enables the author search
  /// * `text` - Paper text to scan for links
  ///
  /// Empty strings count as absent.
  pub async fn find(
    &self,
    title: Option<&str>,
    authors: &[String],
    text: Option<&str>,
  ) -> Vec<RepositoryCandidate> {
    let title = title.filter(|title| !title.trim().is_empty());
    let mut candidates: Vec<RepositoryCandidate> = Vec::new();

    if let Some(text) = text.filter(|text| !text.is_empty()) {
      let urls = github_urls_in_text(text);
      info!("Found {} repository links in the paper text", urls.len());
      candidates.extend(urls.into_iter().map(RepositoryCandidate::from_text));
    }

    let Some(title) = title else {
      return candidates;
    };

    candidates.extend(self.search_or_log(title, Provenance::GithubSearch).await);

    if let Some(last_name) = authors.first().map(String::as_str).and_then(surname) {
      let query = format!("{title} {last_name}");
      for candidate in self.search_or_log(&query, Provenance::GithubAuthorSearch).await {
        if !candidates.iter().any(|existing| existing.url == candidate.url) {
          candidates.push(candidate);
        }
      }
    }

    candidates
  }

  /// Runs a search, logging failures and treating them as no results.
  async fn search_or_log(&self, query: &str, source: Provenance) -> Vec<RepositoryCandidate> {
    match self.search.search(query, source).await {
      Ok(results) => {
        info!("GitHub search ({source}) for {query:?} returned {} results", results.len());
        results
      },
      Err(e) => {
        warn!("GitHub search error for {query:?}: {e}");
        Vec::new()
      },
    }
  }
}
