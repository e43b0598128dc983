//! Looks for a paper's code repository in its text and on GitHub and prints the candidates.

use std::process::ExitCode;

use clap::Parser;
use reviewer_cli::{commands::*, finish, setup_logging};

/// Find the code repository of a paper
#[derive(Parser)]
#[command(name = "find-repo", version, about = "Find the code repository of a paper")]
struct Cli {
  /// Command options
  #[command(flatten)]
  options: FindOptions,
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.options.common.verbose);
  finish(find(cli.options).await)
}
