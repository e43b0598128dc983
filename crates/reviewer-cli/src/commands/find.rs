//! `find-repo`: look for a paper's code repository.

use reviewer::repository::{split_authors, RepositoryCandidate, RepositoryFinder};

use super::*;

/// Options for `find-repo`.
#[derive(Args, Clone, Debug)]
pub struct FindOptions {
  /// Paper title; enables GitHub search
  #[arg(long)]
  pub title: Option<String>,

  /// Comma separated author list; the first author's surname refines the search
  #[arg(long)]
  pub authors: Option<String>,

  /// Paper text to scan for GitHub links
  #[arg(long)]
  pub text: Option<String>,

  /// File holding the paper text; replaces --text
  #[arg(long)]
  pub text_file: Option<PathBuf>,

  /// Logging and configuration
  #[command(flatten)]
  pub common: CommonOptions,
}

/// Output of `find-repo`.
#[derive(Debug, Serialize)]
pub struct FindOutput {
  /// Candidates in discovery order
  pub repos: Vec<RepositoryCandidate>,
}

/// Runs `find-repo`.
pub async fn find(options: FindOptions) -> Result<()> {
  let config = options.common.load_config()?;

  let text = match &options.text_file {
    Some(path) => Some(
      std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.clone(), source })?,
    ),
    None => options.text.clone(),
  };
  let authors = options.authors.as_deref().map(split_authors).unwrap_or_default();

  let repos = RepositoryFinder::new(&config)?
    .find(options.title.as_deref(), &authors, text.as_deref())
    .await;
  info!("Found {} candidate repositories", repos.len());

  print_pretty(&FindOutput { repos })
}
