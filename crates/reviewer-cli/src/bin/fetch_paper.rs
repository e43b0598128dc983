//! Downloads a paper by arXiv identifier or PDF URL and prints its metadata and text as JSON.

use std::process::ExitCode;

use clap::Parser;
use reviewer_cli::{commands::*, finish, setup_logging};

/// Fetch a paper's metadata and full text
#[derive(Parser)]
#[command(name = "fetch-paper", version, about = "Fetch a paper's metadata and full text")]
struct Cli {
  /// Command options
  #[command(flatten)]
  options: FetchOptions,
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.options.common.verbose);
  finish(fetch(cli.options).await)
}
