use wiremock::matchers::bearer_token;

use super::*;

mod discovery;
mod export;

const TOKEN: &str = "secret-token";

pub fn client(server: &MockServer) -> NotionClient {
  let config = Config::default().with_notion_url(server.uri());
  let token = || Some(TOKEN.to_string());
  NotionClient::new(&config, &token).unwrap()
}

/// Matches requests carrying the integration token and API version.
pub fn notion(verb: &str, route: &str) -> wiremock::MockBuilder {
  Mock::given(method(verb))
    .and(path(route))
    .and(bearer_token(TOKEN))
    .and(header("Notion-Version", "2022-06-28"))
}

pub fn paragraphs(count: usize) -> Vec<Block> {
  (0..count)
    .map(|n| {
      serde_json::from_value(json!({
        "type": "paragraph",
        "paragraph": { "rich_text": [{ "text": { "content": format!("p{n}") } }] }
      }))
      .unwrap()
    })
    .collect()
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
  let server = MockServer::start().await;
  Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let config = Config::default().with_notion_url(server.uri());
  let missing = || None::<String>;
  assert!(matches!(NotionClient::new(&config, &missing), Err(ReviewError::MissingCredential)));
  assert!(request_log(&server).await.is_empty());
}
