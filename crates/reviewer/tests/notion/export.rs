use super::*;

fn properties() -> PageProperties {
  serde_json::from_value(json!({
    "Name": "Scaling Laws for Agents",
    "Year": "2025",
    "Tags": ["Agents", "LLM"],
    "Summary": "s".repeat(3000),
    "Ignored": "value",
  }))
  .unwrap()
}

/// Text contents of every appended child, in request order, plus the number of append requests.
async fn appended(server: &MockServer, page_id: &str) -> (Vec<String>, usize) {
  let route = format!("/v1/blocks/{page_id}/children");
  let requests: Vec<Request> = server
    .received_requests()
    .await
    .unwrap_or_default()
    .into_iter()
    .filter(|request| request.method.as_str() == "PATCH" && request.url.path() == route)
    .collect();

  let mut contents = Vec::new();
  for request in &requests {
    for child in body_json(request)["children"].as_array().unwrap() {
      assert_eq!(child["object"], "block");
      contents.push(child["paragraph"]["rich_text"][0]["text"]["content"].as_str().unwrap().to_string());
    }
  }
  (contents, requests.len())
}

fn expected_contents(count: usize) -> Vec<String> { (0..count).map(|n| format!("p{n}")).collect() }

#[tokio::test]
async fn test_publish_creates_then_appends_in_batches() -> TestResult<()> {
  let server = MockServer::start().await;
  notion("POST", "/v1/pages")
    .and(body_partial_json(json!({ "parent": { "database_id": "db-1" } })))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "id": "page-1", "url": "https://www.notion.so/page-1" })),
    )
    .expect(1)
    .mount(&server)
    .await;
  notion("PATCH", "/v1/blocks/page-1/children")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
    .expect(3)
    .mount(&server)
    .await;

  let outcome = client(&server).publish("db-1", &properties(), &paragraphs(250)).await?;
  assert_eq!(
    serde_json::to_value(&outcome)?,
    json!({ "page_id": "page-1", "url": "https://www.notion.so/page-1", "action": "created" })
  );

  let (contents, batches) = appended(&server, "page-1").await;
  assert_eq!(batches, 3);
  assert_eq!(contents, expected_contents(250));

  let requests = server.received_requests().await.unwrap_or_default();
  let created = body_json(&requests[0]);
  assert_eq!(created["properties"]["Year"], json!({ "number": 2025 }));
  assert_eq!(
    created["properties"]["Summary"]["rich_text"][0]["text"]["content"].as_str().unwrap().len(),
    2000
  );
  assert!(created["properties"].get("Ignored").is_none());
  assert!(created.get("children").is_none());
  Ok(())
}

#[tokio::test]
async fn test_publish_without_blocks_sends_no_append() -> TestResult<()> {
  let server = MockServer::start().await;
  notion("POST", "/v1/pages")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-2" })))
    .mount(&server)
    .await;

  let outcome = client(&server).publish("db-1", &PageProperties::default(), &[]).await?;
  assert_eq!(outcome.page_id, "page-2");
  assert_eq!(outcome.url, None);
  assert_eq!(request_log(&server).await, vec!["POST /v1/pages"]);
  Ok(())
}

#[tokio::test]
async fn test_failed_batch_keeps_earlier_batches() -> TestResult<()> {
  let server = MockServer::start().await;
  notion("PATCH", "/v1/blocks/page-3/children")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
    .up_to_n_times(1)
    .with_priority(1)
    .mount(&server)
    .await;
  notion("PATCH", "/v1/blocks/page-3/children")
    .respond_with(ResponseTemplate::new(400).set_body_string("validation_error"))
    .mount(&server)
    .await;

  let result = client(&server).append_blocks("page-3", &paragraphs(300)).await;
  assert!(matches!(result, Err(ReviewError::Api { status: 400, .. })));
  assert_eq!(request_log(&server).await.len(), 2, "the third batch is never sent");
  Ok(())
}

/// Mounts a two-page listing of `b1`, `b2` / `b3` where deleting `b2` fails.
async fn mount_existing_children(server: &MockServer) {
  notion("GET", "/v1/blocks/page-1/children")
    .and(query_param("page_size", "100"))
    .and(query_param("start_cursor", "cursor-2"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "results": [{ "id": "b3" }],
      "has_more": false,
      "next_cursor": null,
    })))
    .with_priority(1)
    .expect(1)
    .mount(server)
    .await;
  notion("GET", "/v1/blocks/page-1/children")
    .and(query_param("page_size", "100"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "results": [{ "id": "b1" }, { "id": "b2" }],
      "has_more": true,
      "next_cursor": "cursor-2",
    })))
    .expect(1)
    .mount(server)
    .await;

  for id in ["b1", "b3"] {
    notion("DELETE", &format!("/v1/blocks/{id}"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id, "archived": true })))
      .expect(1)
      .mount(server)
      .await;
  }
  notion("DELETE", "/v1/blocks/b2")
    .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_clear_children_is_best_effort() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_existing_children(&server).await;

  let report = client(&server).clear_children("page-1").await?;
  assert_eq!(report.attempted(), 3);
  assert_eq!(report.deleted(), 2);
  assert_eq!(report.failed(), vec!["b2"]);
  let order: Vec<&str> = report.outcomes.iter().map(|o| o.block_id.as_str()).collect();
  assert_eq!(order, ["b1", "b2", "b3"]);
  Ok(())
}

#[tokio::test]
async fn test_update_replaces_content() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_existing_children(&server).await;
  notion("PATCH", "/v1/pages/page-1")
    .and(body_partial_json(json!({ "properties": { "Year": { "number": 2025 } } })))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "id": "page-1", "url": "https://www.notion.so/page-1" })),
    )
    .expect(1)
    .mount(&server)
    .await;
  notion("PATCH", "/v1/blocks/page-1/children")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
    .expect(2)
    .mount(&server)
    .await;

  let outcome = client(&server).update("page-1", &properties(), &paragraphs(101)).await?;
  assert_eq!(
    serde_json::to_value(&outcome)?,
    json!({ "page_id": "page-1", "url": "https://www.notion.so/page-1", "action": "updated" })
  );

  let (contents, batches) = appended(&server, "page-1").await;
  assert_eq!(batches, 2);
  assert_eq!(contents, expected_contents(101));

  let log = request_log(&server).await;
  let last_delete = log.iter().rposition(|line| line.starts_with("DELETE")).unwrap();
  let first_append =
    log.iter().position(|line| line == "PATCH /v1/blocks/page-1/children").unwrap();
  assert!(last_delete < first_append, "content is cleared before it is appended: {log:?}");
  Ok(())
}

#[tokio::test]
async fn test_update_without_properties_leaves_them_alone() -> TestResult<()> {
  let server = MockServer::start().await;
  notion("GET", "/v1/blocks/page-9/children")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [], "has_more": false })))
    .mount(&server)
    .await;
  notion("PATCH", "/v1/blocks/page-9/children")
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
    .expect(1)
    .mount(&server)
    .await;

  let outcome = client(&server).update("page-9", &PageProperties::default(), &paragraphs(1)).await?;
  assert_eq!(outcome.url, None);
  assert!(!request_log(&server).await.iter().any(|line| line == "PATCH /v1/pages/page-9"));
  Ok(())
}

#[tokio::test]
async fn test_listing_failure_aborts_update() -> TestResult<()> {
  let server = MockServer::start().await;
  notion("GET", "/v1/blocks/page-4/children")
    .respond_with(ResponseTemplate::new(404).set_body_string("object_not_found"))
    .mount(&server)
    .await;
  notion("PATCH", "/v1/blocks/page-4/children")
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;

  let result = client(&server).update("page-4", &PageProperties::default(), &paragraphs(3)).await;
  assert!(matches!(result, Err(ReviewError::Api { status: 404, .. })));
  Ok(())
}
