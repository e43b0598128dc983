//! Endpoint, timeout and credential configuration.
//!
//! Every remote endpoint the tools talk to is configurable so that tests (or a proxy) can point
//! them elsewhere. Defaults are the production endpoints, and a TOML file only needs to mention
//! the values it changes:
//!
//! ```toml
//! user_agent = "my-review-bot/0.1"
//!
//! [github]
//! max_results = 10
//!
//! [notion]
//! api_key_env = "MY_NOTION_TOKEN"
//! ```

use super::*;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "paper-review/1.0";

/// Name of the directory holding the configuration file.
const CONFIG_DIR_NAME: &str = "paper-review";

/// Top level configuration shared by the three tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// User agent sent with every request
  pub user_agent: String,
  /// arXiv metadata API and PDF download settings
  pub arxiv:      ArxivSettings,
  /// Text extraction settings
  pub pdf:        PdfSettings,
  /// GitHub search settings
  pub github:     GithubSettings,
  /// Notion API settings
  pub notion:     NotionSettings,
}

/// Settings for the arXiv metadata API and PDF downloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArxivSettings {
  /// Query endpoint of the arXiv API
  pub api_url:               String,
  /// Timeout for the metadata query, in seconds
  pub metadata_timeout_secs: u64,
  /// Timeout for downloading the PDF, in seconds
  pub download_timeout_secs: u64,
}

/// Settings for PDF text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
  /// Program invoked for the first extraction tier
  pub pdftotext_program:      String,
  /// Timeout for the `pdftotext` subprocess, in seconds
  pub pdftotext_timeout_secs: u64,
}

/// Settings for the GitHub repository search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
  /// Base URL of the GitHub REST API
  pub api_url:      String,
  /// Timeout for each search request, in seconds
  pub timeout_secs: u64,
  /// Maximum number of results requested per search
  pub max_results:  u32,
}

/// Settings for the Notion REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionSettings {
  /// Base URL of the Notion API, without the `/v1` suffix
  pub api_url:      String,
  /// Value of the `Notion-Version` header
  pub version:      String,
  /// Timeout for each request, in seconds
  pub timeout_secs: u64,
  /// Environment variable holding the integration token
  pub api_key_env:  String,
  /// File holding the integration token when the environment variable is unset
  pub api_key_file: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      user_agent: DEFAULT_USER_AGENT.to_string(),
      arxiv:      ArxivSettings::default(),
      pdf:        PdfSettings::default(),
      github:     GithubSettings::default(),
      notion:     NotionSettings::default(),
    }
  }
}

impl Default for ArxivSettings {
  fn default() -> Self {
    Self {
      api_url:               "http://export.arxiv.org/api/query".to_string(),
      metadata_timeout_secs: 30,
      download_timeout_secs: 120,
    }
  }
}

impl Default for PdfSettings {
  fn default() -> Self {
    Self { pdftotext_program: "pdftotext".to_string(), pdftotext_timeout_secs: 60 }
  }
}

impl Default for GithubSettings {
  fn default() -> Self {
    Self { api_url: "https://api.github.com".to_string(), timeout_secs: 15, max_results: 5 }
  }
}

impl Default for NotionSettings {
  fn default() -> Self {
    Self {
      api_url:      "https://api.notion.com".to_string(),
      version:      "2022-06-28".to_string(),
      timeout_secs: 30,
      api_key_env:  "NOTION_API_KEY".to_string(),
      api_key_file: dirs::home_dir().map(|home| home.join(".config").join("notion").join("api_key")),
    }
  }
}

impl Config {
  /// Loads the configuration.
  ///
  /// An explicit `path` must exist and parse. Without one, the file at [`Config::default_path`]
  /// is used when present and the built-in defaults otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::from_file(path),
      None => {
        let default_path = Self::default_path();
        if default_path.exists() {
          Self::from_file(&default_path)
        } else {
          trace!("No configuration file at {default_path:?}, using defaults");
          Ok(Self::default())
        }
      },
    }
  }

  /// Parses a TOML configuration file.
  pub fn from_file(path: &Path) -> Result<Self> {
    debug!("Loading configuration from {path:?}");
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Returns the default location of the configuration file.
  ///
  /// - On Unix: `~/.config/paper-review/config.toml`
  /// - On macOS: `~/Library/Application Support/paper-review/config.toml`
  /// - On Windows: `%APPDATA%\paper-review\config.toml`
  /// - Fallback: `./paper-review/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir()
      .unwrap_or_else(|| PathBuf::from("."))
      .join(CONFIG_DIR_NAME)
      .join("config.toml")
  }

  /// Points the arXiv metadata queries at `url`.
  pub fn with_arxiv_url(mut self, url: impl Into<String>) -> Self {
    self.arxiv.api_url = url.into();
    self
  }

  /// Points the GitHub searches at `url`.
  pub fn with_github_url(mut self, url: impl Into<String>) -> Self {
    self.github.api_url = url.into();
    self
  }

  /// Points the Notion client at `url`.
  pub fn with_notion_url(mut self, url: impl Into<String>) -> Self {
    self.notion.api_url = url.into();
    self
  }

  /// Replaces the program used for the `pdftotext` extraction tier.
  pub fn with_pdftotext_program(mut self, program: impl Into<String>) -> Self {
    self.pdf.pdftotext_program = program.into();
    self
  }
}

impl ArxivSettings {
  /// Timeout for the metadata query.
  pub fn metadata_timeout(&self) -> Duration { Duration::from_secs(self.metadata_timeout_secs) }

  /// Timeout for the PDF download.
  pub fn download_timeout(&self) -> Duration { Duration::from_secs(self.download_timeout_secs) }
}

impl PdfSettings {
  /// Timeout for the `pdftotext` subprocess.
  pub fn pdftotext_timeout(&self) -> Duration { Duration::from_secs(self.pdftotext_timeout_secs) }
}

impl GithubSettings {
  /// Timeout for each search request.
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

impl NotionSettings {
  /// Timeout for each Notion request.
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}
