//! Page body synchronization: batched append, best-effort clearing and the create/update flows.

use super::*;

/// Result of one attempt to delete a child block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
  /// Block that was targeted
  pub block_id: String,
  /// `Err` holds the failure message
  pub result:   core::result::Result<(), String>,
}

/// Every deletion attempted while clearing a page, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
  /// One entry per child block seen
  pub outcomes: Vec<DeletionOutcome>,
}

impl DeletionReport {
  /// Number of blocks whose deletion was attempted.
  pub fn attempted(&self) -> usize { self.outcomes.len() }

  /// Number of blocks deleted.
  pub fn deleted(&self) -> usize { self.outcomes.iter().filter(|o| o.result.is_ok()).count() }

  /// Identifiers of blocks that could not be deleted.
  pub fn failed(&self) -> Vec<&str> {
    self.outcomes.iter().filter(|o| o.result.is_err()).map(|o| o.block_id.as_str()).collect()
  }
}

/// What an export did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportAction {
  /// A new page was created
  Created,
  /// An existing page had its body replaced
  Updated,
}

/// Summary of an export, printed by the exporter as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
  /// Page that was written
  pub page_id: String,
  /// Browser URL of the page, when Notion reported one
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url:     Option<String>,
  /// Whether the page was created or updated
  pub action:  ExportAction,
}

impl NotionClient {
  /// Appends `blocks` to a page in order, [`BATCH_SIZE`] per request.
  ///
  /// Returns the number of requests sent. A failing batch stops the append; batches sent before it
  /// stay on the page.
  pub async fn append_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<usize> {
    let mut requests = 0;
    for batch in super::blocks::batches(blocks) {
      let start = requests * BATCH_SIZE;
      trace!("Appending blocks {start}..{} to {page_id}", start + batch.len());
      self.append_children(page_id, batch).await?;
      requests += 1;
    }
    debug!("Appended {} blocks to {page_id} in {requests} requests", blocks.len());
    Ok(requests)
  }

  /// Deletes every child block of a page.
  ///
  /// Children are listed [`BATCH_SIZE`] at a time and deleted one by one. A block that fails to
  /// delete is logged, recorded in the report and skipped.
  ///
  /// # Errors
  ///
  /// Only a failure to list the children is an error.
  pub async fn clear_children(&self, page_id: &str) -> Result<DeletionReport> {
    let mut report = DeletionReport::default();
    let mut cursor: Option<String> = None;

    loop {
      let listing = self.list_children(page_id, cursor.as_deref()).await?;
      for child in listing.results {
        let result = match self.delete_block(&child.id).await {
          Ok(()) => Ok(()),
          Err(e) => {
            warn!("Failed to delete block {}: {e}", child.id);
            Err(e.to_string())
          },
        };
        report.outcomes.push(DeletionOutcome { block_id: child.id, result });
      }

      match (listing.has_more, listing.next_cursor) {
        (true, Some(next)) => cursor = Some(next),
        _ => break,
      }
    }

    Ok(report)
  }

  /// Replaces a page's body: clears the existing children, then appends `blocks`.
  pub async fn replace_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<DeletionReport> {
    let report = self.clear_children(page_id).await?;
    info!(
      "Cleared page {page_id}: {} of {} blocks deleted",
      report.deleted(),
      report.attempted()
    );
    let failed = report.failed();
    if !failed.is_empty() {
      warn!("Blocks left on page {page_id}: {}", failed.join(", "));
    }
    self.append_blocks(page_id, blocks).await?;
    Ok(report)
  }

  /// Creates a page in `database_id` with `properties` and fills it with `blocks`.
  pub async fn publish(
    &self,
    database_id: &str,
    properties: &PageProperties,
    blocks: &[Block],
  ) -> Result<ExportOutcome> {
    let page = self.create_page(database_id, properties.to_notion()).await?;
    info!("Created page {}", page.id);
    self.append_blocks(&page.id, blocks).await?;
    Ok(ExportOutcome { page_id: page.id, url: page.url, action: ExportAction::Created })
  }

  /// Rewrites an existing page.
  ///
  /// Properties are patched first when any are given, then the body is replaced.
  pub async fn update(
    &self,
    page_id: &str,
    properties: &PageProperties,
    blocks: &[Block],
  ) -> Result<ExportOutcome> {
    let mut url = None;
    if !properties.is_empty() {
      url = self.update_page_properties(page_id, properties.to_notion()).await?.url;
    }
    self.replace_blocks(page_id, blocks).await?;
    info!("Updated page {page_id}");
    Ok(ExportOutcome { page_id: page_id.to_string(), url, action: ExportAction::Updated })
  }
}
