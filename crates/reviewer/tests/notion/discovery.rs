use super::*;

async fn mount_search(server: &MockServer, object: &str, results: Value) {
  notion("POST", "/v1/search")
    .and(body_partial_json(json!({ "filter": { "value": object, "property": "object" } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_reuses_existing_database() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_search(
    &server,
    "database",
    json!([
      { "id": "db-other", "title": [{ "plain_text": "Papers to skim" }] },
      { "id": "db-1", "title": [{ "plain_text": "pa" }, { "plain_text": "PERS" }] },
    ]),
  )
  .await;

  assert_eq!(client(&server).find_or_create_database().await?, "db-1");
  assert_eq!(request_log(&server).await, vec!["POST /v1/search"]);
  Ok(())
}

#[tokio::test]
async fn test_creates_database_under_first_page() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_search(
    &server,
    "database",
    json!([{ "id": "db-other", "title": [{ "plain_text": "Reading list" }] }]),
  )
  .await;
  notion("POST", "/v1/search")
    .and(body_partial_json(json!({ "filter": { "value": "page" }, "page_size": 10 })))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "results": [{ "id": "parent-1" }, { "id": "parent-2" }] })),
    )
    .expect(1)
    .mount(&server)
    .await;
  notion("POST", "/v1/databases")
    .and(body_partial_json(json!({
      "parent": { "page_id": "parent-1" },
      "title": [{ "text": { "content": "Papers" } }],
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "db-new" })))
    .expect(1)
    .mount(&server)
    .await;

  assert_eq!(client(&server).find_or_create_database().await?, "db-new");

  let requests = server.received_requests().await.unwrap_or_default();
  let schema = body_json(requests.last().unwrap());
  assert_eq!(schema["properties"]["Status"]["select"]["options"].as_array().unwrap().len(), 3);
  assert_eq!(schema["properties"]["Tags"]["multi_select"]["options"].as_array().unwrap().len(), 14);
  Ok(())
}

#[tokio::test]
async fn test_no_parent_page_is_a_configuration_error() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_search(&server, "database", json!([])).await;
  mount_search(&server, "page", json!([])).await;
  notion("POST", "/v1/databases").respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let result = client(&server).find_or_create_database().await;
  assert!(matches!(result, Err(ReviewError::Config(_))));
  Ok(())
}
