//! Locating or provisioning the database that holds review pages.

use super::*;

/// Title of the review database.
pub const DATABASE_TITLE: &str = "Papers";

/// Options offered by the `Tags` property of a new database.
pub const TAG_OPTIONS: [&str; 14] = [
  "LLM",
  "RL",
  "Agents",
  "Reasoning",
  "Vision",
  "Multimodal",
  "NLP",
  "Diffusion",
  "Robotics",
  "Optimization",
  "Theory",
  "Systems",
  "Benchmark",
  "Survey",
];

/// Options offered by the `Status` property of a new database.
pub const STATUS_OPTIONS: [&str; 3] = ["To Read", "Reading", "Summarized"];

/// Number of pages asked for when looking for a parent page.
const PARENT_SEARCH_SIZE: u32 = 10;

/// `select` style option list.
fn options(names: &[&str]) -> Vec<Value> { names.iter().map(|name| json!({ "name": name })).collect() }

/// Request body creating the review database under `parent_page_id`.
pub fn database_schema(parent_page_id: &str) -> Value {
  json!({
    "parent": { "type": "page_id", "page_id": parent_page_id },
    "title": [{ "type": "text", "text": { "content": DATABASE_TITLE } }],
    "properties": {
      "Name": { "title": {} },
      "Authors": { "rich_text": {} },
      "Year": { "number": { "format": "number" } },
      "Tags": { "multi_select": { "options": options(&TAG_OPTIONS) } },
      "Status": { "select": { "options": options(&STATUS_OPTIONS) } },
      "URL": { "url": {} },
      "GitHub": { "url": {} },
      "Summary": { "rich_text": {} },
    }
  })
}

/// Concatenated plain text of a search result's `title` array.
fn plain_title(object: &Value) -> String {
  object
    .get("title")
    .and_then(Value::as_array)
    .map(|parts| parts.iter().filter_map(|part| part.get("plain_text")?.as_str()).collect())
    .unwrap_or_default()
}

/// The `id` field of a search result.
fn object_id(object: &Value) -> Option<String> { object.get("id")?.as_str().map(str::to_string) }

impl NotionClient {
  /// Identifier of the database named [`DATABASE_TITLE`], creating it when there is none.
  ///
  /// An existing database matches when its plain text title equals the name, ignoring case. A new
  /// one is created under the first page the integration can see.
  ///
  /// # Errors
  ///
  /// [`ReviewError::Config`] when no database matches and the integration can see no page to
  /// create one under.
  pub async fn find_or_create_database(&self) -> Result<String> {
    let databases = self
      .search(&json!({
        "query": DATABASE_TITLE,
        "filter": { "value": "database", "property": "object" },
      }))
      .await?;

    let wanted = DATABASE_TITLE.to_lowercase();
    if let Some(id) =
      databases.iter().filter(|db| plain_title(db).to_lowercase() == wanted).find_map(object_id)
    {
      info!("Using existing {DATABASE_TITLE} database {id}");
      return Ok(id);
    }

    let pages = self
      .search(&json!({
        "filter": { "value": "page", "property": "object" },
        "page_size": PARENT_SEARCH_SIZE,
      }))
      .await?;
    let Some(parent) = pages.iter().find_map(object_id) else {
      return Err(ReviewError::Config(format!(
        "no {DATABASE_TITLE} database found and no page shared with the integration to create \
         one under; pass --db or share a page with the integration"
      )));
    };

    let id = self.create_database(&database_schema(&parent)).await?;
    info!("Created {DATABASE_TITLE} database {id} under page {parent}");
    Ok(id)
  }
}
