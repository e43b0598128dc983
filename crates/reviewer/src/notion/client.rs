//! Thin client over the Notion REST endpoints the exporter needs.

use reqwest::{Method, RequestBuilder};

use super::*;
use crate::{
  config::NotionSettings,
  credentials::{resolve_api_key, CredentialSource},
};

/// The parts of a Notion page object we use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
  /// Page identifier
  pub id:  String,
  /// Browser URL of the page
  #[serde(default)]
  pub url: Option<String>,
}

/// Reference to a child block in a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildRef {
  /// Block identifier
  pub id: String,
}

/// One page of a block-children listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenPage {
  /// Children in this page
  #[serde(default)]
  pub results:     Vec<ChildRef>,
  /// Whether more children follow
  #[serde(default)]
  pub has_more:    bool,
  /// Cursor for the next page when `has_more` is set
  #[serde(default)]
  pub next_cursor: Option<String>,
}

/// Response of the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResults {
  /// Matching pages or databases, as raw objects
  #[serde(default)]
  results: Vec<Value>,
}

/// Authenticated client for the Notion API.
pub struct NotionClient {
  /// Internal web client used to connect to the API.
  client:   Client,
  /// Integration token sent as a bearer token
  token:    String,
  /// Endpoint, API version and timeout
  settings: NotionSettings,
}

impl NotionClient {
  /// Creates a client, resolving the API key first.
  ///
  /// # Errors
  ///
  /// Fails with [`ReviewError::MissingCredential`] when `credentials` has no key. Nothing has been
  /// sent over the network at that point.
  pub fn new(config: &Config, credentials: &dyn CredentialSource) -> Result<Self> {
    let token = resolve_api_key(credentials)?;
    Ok(Self { client: http_client(config)?, token, settings: config.notion.clone() })
  }

  /// Full URL of an API path such as `pages` or `blocks/<id>/children`.
  fn endpoint(&self, path: &str) -> String {
    format!("{}/v1/{path}", self.settings.api_url.trim_end_matches('/'))
  }

  /// Starts an authenticated request.
  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self
      .client
      .request(method, self.endpoint(path))
      .bearer_auth(&self.token)
      .header("Notion-Version", &self.settings.version)
      .timeout(self.settings.timeout())
  }

  /// Sends a request and decodes the JSON answer.
  async fn send<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    Ok(check_status(response).await?.json().await?)
  }

  /// Creates a page with `properties` under the database `database_id`.
  pub async fn create_page(&self, database_id: &str, properties: Map<String, Value>) -> Result<Page> {
    debug!("Creating page in database {database_id}");
    let body = json!({
      "parent": { "database_id": database_id },
      "properties": properties,
    });
    self.send(self.request(Method::POST, "pages").json(&body)).await
  }

  /// Overwrites the given properties of an existing page.
  pub async fn update_page_properties(
    &self,
    page_id: &str,
    properties: Map<String, Value>,
  ) -> Result<Page> {
    debug!("Updating properties of page {page_id}");
    let body = json!({ "properties": properties });
    self.send(self.request(Method::PATCH, &format!("pages/{page_id}")).json(&body)).await
  }

  /// Appends `children` to a block or page in a single request.
  ///
  /// Notion accepts at most [`BATCH_SIZE`] children per call; see
  /// [`NotionClient::append_blocks`] for the batched version.
  pub async fn append_children(&self, block_id: &str, children: &[Block]) -> Result<()> {
    let children: Vec<Value> = children.iter().map(Block::to_request).collect();
    let body = json!({ "children": children });
    let _: Value =
      self.send(self.request(Method::PATCH, &format!("blocks/{block_id}/children")).json(&body)).await?;
    Ok(())
  }

  /// Lists one page of a block's children.
  pub async fn list_children(
    &self,
    block_id: &str,
    start_cursor: Option<&str>,
  ) -> Result<ChildrenPage> {
    let mut request = self
      .request(Method::GET, &format!("blocks/{block_id}/children"))
      .query(&[("page_size", BATCH_SIZE.to_string())]);
    if let Some(cursor) = start_cursor {
      request = request.query(&[("start_cursor", cursor)]);
    }
    self.send(request).await
  }

  /// Deletes (archives) a block.
  pub async fn delete_block(&self, block_id: &str) -> Result<()> {
    let _: Value = self.send(self.request(Method::DELETE, &format!("blocks/{block_id}"))).await?;
    Ok(())
  }

  /// Runs a workspace search and returns the raw result objects.
  pub async fn search(&self, body: &Value) -> Result<Vec<Value>> {
    let results: SearchResults = self.send(self.request(Method::POST, "search").json(body)).await?;
    Ok(results.results)
  }

  /// Creates a database from a full request body and returns its identifier.
  pub async fn create_database(&self, body: &Value) -> Result<String> {
    let database: Value = self.send(self.request(Method::POST, "databases").json(body)).await?;
    database
      .get("id")
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| ReviewError::UnexpectedResponse("created database has no id".to_string()))
  }
}
