//! `notion-export`: publish a review to Notion or replace an existing page.

use reviewer::{
  credentials::EnvironmentCredentials,
  notion::{Block, NotionClient, PageProperties},
};

use super::*;

/// Options for `notion-export`.
#[derive(Args, Clone, Debug)]
pub struct ExportOptions {
  /// JSON file with the page properties (Name, Authors, Year, Tags, Status, URL, GitHub, Summary)
  #[arg(long)]
  pub properties: PathBuf,

  /// JSON file with the page body as an array of Notion block objects
  #[arg(long)]
  pub blocks: PathBuf,

  /// Target database; found or created when omitted
  #[arg(long)]
  pub db: Option<String>,

  /// Replace the content of this page instead of creating a new one
  #[arg(long)]
  pub update: Option<String>,

  /// Logging and configuration
  #[command(flatten)]
  pub common: CommonOptions,
}

/// Runs `notion-export`.
pub async fn export(options: ExportOptions) -> Result<()> {
  let config = options.common.load_config()?;
  let notion = NotionClient::new(&config, &EnvironmentCredentials::from_settings(&config.notion))?;

  let properties: PageProperties = read_json(&options.properties)?;
  let blocks: Vec<Block> = read_json(&options.blocks)?;
  debug!("Loaded {} blocks", blocks.len());

  let outcome = match &options.update {
    Some(page_id) => notion.update(page_id, &properties, &blocks).await?,
    None => {
      let database = match &options.db {
        Some(database) => database.clone(),
        None => notion.find_or_create_database().await?,
      };
      notion.publish(&database, &properties, &blocks).await?
    },
  };

  print_compact(&outcome)
}
