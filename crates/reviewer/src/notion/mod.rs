//! Publishing reviews to Notion.
//!
//! A review becomes a page in a Notion database. The page's lifecycle as seen from here:
//!
//! - **absent → created**: [`NotionClient::create_page`] makes an empty page with the review's
//!   properties under a database.
//! - **created → populated**: [`NotionClient::append_blocks`] adds the body in batches of
//!   [`BATCH_SIZE`] blocks. Batches are sent in order and a failing batch leaves the earlier ones in
//!   place.
//! - **populated → emptied**: [`NotionClient::clear_children`] pages through the existing children
//!   and deletes them one by one. A block that fails to delete is recorded in the
//!   [`DeletionReport`] and skipped.
//! - **emptied → populated**: the new body is appended with the same batching.
//!
//! [`NotionClient::publish`] and [`NotionClient::update`] run these steps for the create and
//! replace flows. When no database is given, [`NotionClient::find_or_create_database`] locates a
//! database called "Papers" or provisions one.
//!
//! # Examples
//!
//! ```no_run
//! use reviewer::{
//!   config::Config,
//!   credentials::EnvironmentCredentials,
//!   notion::{Block, NotionClient, PageProperties},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let notion =
//!   NotionClient::new(&config, &EnvironmentCredentials::from_settings(&config.notion))?;
//!
//! let properties: PageProperties =
//!   serde_json::from_str(r#"{"Name": "Attention Is All You Need", "Year": "2017"}"#)?;
//! let blocks: Vec<Block> = serde_json::from_str(
//!   r#"[{"type": "paragraph", "paragraph": {"rich_text": [{"text": {"content": "Great."}}]}}]"#,
//! )?;
//!
//! let database = notion.find_or_create_database().await?;
//! let outcome = notion.publish(&database, &properties, &blocks).await?;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```

use super::*;

pub mod blocks;
pub mod client;
pub mod discovery;
pub mod properties;
pub mod sync;

pub use self::{
  blocks::{Block, BATCH_SIZE},
  client::{NotionClient, Page},
  discovery::DATABASE_TITLE,
  properties::PageProperties,
  sync::{DeletionOutcome, DeletionReport, ExportAction, ExportOutcome},
};
