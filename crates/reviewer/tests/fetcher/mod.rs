use super::*;

const PDF_BYTES: &[u8] = b"%PDF-1.4 fake paper";

/// Remembers the file it was given and answers with fixed text.
struct Recording {
  seen:   Arc<Mutex<Option<(PathBuf, Vec<u8>)>>>,
  answer: Option<String>,
}

#[async_trait]
impl TextExtractor for Recording {
  fn name(&self) -> &'static str { "recording" }

  async fn extract(&self, path: &Path) -> Option<String> {
    let contents = std::fs::read(path).unwrap();
    *self.seen.lock().unwrap() = Some((path.to_path_buf(), contents));
    self.answer.clone()
  }
}

fn recording(answer: Option<&str>) -> (ExtractionChain, Arc<Mutex<Option<(PathBuf, Vec<u8>)>>>) {
  let seen = Arc::new(Mutex::new(None));
  let extractor = Recording { seen: seen.clone(), answer: answer.map(str::to_string) };
  (ExtractionChain::new().with_extractor(extractor), seen)
}

fn feed(pdf_href: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query</title>
  <entry>
    <id>http://arxiv.org/abs/2501.01243v1</id>
    <published>2025-01-02T10:00:00Z</published>
    <title>Scaling Laws
      for Agents</title>
    <summary>
      An abstract.
    </summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2501.01243v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="{pdf_href}" rel="related" type="application/pdf"/>
  </entry>
</feed>"#
  )
}

#[tokio::test]
async fn test_fetch_arxiv_paper() -> TestResult<()> {
  let server = MockServer::start().await;
  let pdf_href = format!("{}/pdf/2501.01243v1", server.uri());

  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("id_list", "2501.01243"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&pdf_href)))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/pdf/2501.01243v1"))
    .and(header("user-agent", "paper-review/1.0"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
    .expect(1)
    .mount(&server)
    .await;

  let config = Config::default().with_arxiv_url(format!("{}/api/query", server.uri()));
  let (chain, seen) = recording(Some("Body text. Code at https://github.com/acme/agent."));
  let fetcher = PaperFetcher::new(&config)?.with_extractors(chain);

  let paper = fetcher.fetch("https://arxiv.org/abs/2501.01243").await?;
  assert_eq!(paper.title, "Scaling Laws for Agents");
  assert_eq!(paper.authors, vec!["Ada Lovelace", "Alan Turing"]);
  assert_eq!(paper.abstract_text, "An abstract.");
  assert_eq!(paper.year, "2025");
  assert_eq!(paper.url, "https://arxiv.org/abs/2501.01243");
  assert_eq!(paper.pdf_url, pdf_href);
  assert_eq!(paper.text, "Body text. Code at https://github.com/acme/agent.");

  let (downloaded, contents) = seen.lock().unwrap().clone().unwrap();
  assert_eq!(contents, PDF_BYTES);
  assert!(!downloaded.exists(), "temporary PDF should be removed");
  Ok(())
}

#[tokio::test]
async fn test_fetch_direct_pdf_url() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/papers/neat.pdf"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
    .expect(1)
    .mount(&server)
    .await;

  let (chain, seen) = recording(None);
  let fetcher = PaperFetcher::new(&Config::default())?.with_extractors(chain);
  let url = format!("{}/papers/neat.pdf", server.uri());

  let paper = fetcher.fetch(&url).await?;
  assert_eq!(paper.url, url);
  assert_eq!(paper.pdf_url, url);
  assert!(paper.title.is_empty());
  assert!(paper.authors.is_empty());
  assert!(paper.year.is_empty());
  assert_eq!(paper.text, EXTRACTION_PLACEHOLDER);

  let (downloaded, _) = seen.lock().unwrap().clone().unwrap();
  assert!(!downloaded.exists());
  Ok(())
}

#[tokio::test]
async fn test_fetch_truncates_long_text() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
    .mount(&server)
    .await;

  let long = "x".repeat(100_010);
  let (chain, _) = recording(Some(&long));
  let fetcher = PaperFetcher::new(&Config::default())?.with_extractors(chain);

  let paper = fetcher.fetch(&format!("{}/long.pdf", server.uri())).await?;
  assert!(paper.text.starts_with(&"x".repeat(100_000)));
  assert!(paper.text.ends_with("[... truncated at 100K chars ...]"));
  assert_eq!(paper.text.chars().filter(|&c| c == 'x').count(), 100_000);
  Ok(())
}

#[tokio::test]
async fn test_fetch_download_failure_is_fatal() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(404).set_body_string("no such paper"))
    .mount(&server)
    .await;

  let (chain, seen) = recording(Some("never"));
  let fetcher = PaperFetcher::new(&Config::default())?.with_extractors(chain);

  let result = fetcher.fetch(&format!("{}/missing.pdf", server.uri())).await;
  assert!(matches!(result, Err(ReviewError::Api { status: 404, .. })));
  assert!(seen.lock().unwrap().is_none());
  Ok(())
}

#[tokio::test]
async fn test_fetch_rejects_non_url_input() -> TestResult<()> {
  let (chain, _) = recording(Some("never"));
  let fetcher = PaperFetcher::new(&Config::default())?.with_extractors(chain);
  assert!(matches!(fetcher.fetch("not a paper").await, Err(ReviewError::InvalidUrl(_))));
  Ok(())
}
