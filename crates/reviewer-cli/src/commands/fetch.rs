//! `fetch-paper`: download a paper and emit its metadata and text.

use reviewer::paper::PaperFetcher;

use super::*;

/// Options for `fetch-paper`.
#[derive(Args, Clone, Debug)]
pub struct FetchOptions {
  /// arXiv identifier, arXiv abstract/PDF URL, or direct PDF URL
  /// Examples: "2501.01243", "https://arxiv.org/abs/2501.01243"
  pub url_or_id: String,

  /// Write the JSON to this file instead of stdout
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Logging and configuration
  #[command(flatten)]
  pub common: CommonOptions,
}

/// Runs `fetch-paper`.
pub async fn fetch(options: FetchOptions) -> Result<()> {
  let config = options.common.load_config()?;
  let paper = PaperFetcher::new(&config)?.fetch(&options.url_or_id).await?;
  info!("Fetched {:?} ({} characters of text)", paper.title, paper.text.chars().count());

  match &options.output {
    Some(path) => save_pretty(&paper, path),
    None => print_pretty(&paper),
  }
}
