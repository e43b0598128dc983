//! Publishes a paper review to a Notion database, or replaces the content of an existing page.

use std::process::ExitCode;

use clap::Parser;
use reviewer_cli::{commands::*, finish, setup_logging};

/// Export a paper review to Notion
#[derive(Parser)]
#[command(name = "notion-export", version, about = "Export a paper review to Notion")]
struct Cli {
  /// Command options
  #[command(flatten)]
  options: ExportOptions,
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.options.common.verbose);
  finish(export(cli.options).await)
}
