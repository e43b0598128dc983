//! Text extraction from downloaded PDFs.
//!
//! Extraction is a chain of [`TextExtractor`] strategies tried in order. The first one that
//! produces non-empty text wins; when every backend is missing or comes back empty the chain
//! yields [`EXTRACTION_PLACEHOLDER`] so that a paper without text is still a usable record.
//!
//! The standard chain is:
//! 1. [`Pdftotext`]: the poppler command line tool, run with `-layout`
//! 2. [`LopdfExtractor`]: page by page through `lopdf`
//! 3. [`PdfExtractExtractor`]: the `pdf-extract` crate
//!
//! ```no_run
//! use std::path::Path;
//!
//! use reviewer::{config::Config, pdf::ExtractionChain};
//!
//! # async fn example() {
//! let chain = ExtractionChain::standard(&Config::default().pdf);
//! let text = chain.extract(Path::new("paper.pdf")).await;
//! println!("{} characters", text.chars().count());
//! # }
//! ```

use std::process::Stdio;

use lopdf::Document;
use tokio::process::Command;

use super::*;
use crate::config::PdfSettings;

/// Text used when no backend could extract anything.
pub const EXTRACTION_PLACEHOLDER: &str =
  "[Could not extract PDF text. Install pdftotext (poppler-utils) to enable text extraction.]";

/// Separator placed between the text of consecutive pages.
const PAGE_SEPARATOR: &str = "\n\n";

/// One way of turning a PDF file into text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
  /// Short name used in logs.
  fn name(&self) -> &'static str;

  /// Extracts the text of the PDF at `path`.
  ///
  /// Returns `None` when the backend is unavailable or fails. Failures are the extractor's to
  /// log; they never reach the caller.
  async fn extract(&self, path: &Path) -> Option<String>;
}

/// Joins per-page text with blank lines, skipping pages without text.
///
/// Returns `None` when no page had any text.
pub fn join_pages<I>(pages: I) -> Option<String>
where I: IntoIterator<Item = String> {
  let pages: Vec<String> = pages.into_iter().filter(|page| !page.trim().is_empty()).collect();
  if pages.is_empty() {
    None
  } else {
    Some(pages.join(PAGE_SEPARATOR))
  }
}

/// Runs `pdftotext -layout <file> -` and captures stdout.
#[derive(Debug, Clone)]
pub struct Pdftotext {
  /// Program to execute
  pub program: String,
  /// The subprocess is killed when it runs longer than this
  pub timeout: Duration,
}

impl Pdftotext {
  /// Creates the extractor from the PDF settings.
  pub fn new(settings: &PdfSettings) -> Self {
    Self { program: settings.pdftotext_program.clone(), timeout: settings.pdftotext_timeout() }
  }
}

#[async_trait]
impl TextExtractor for Pdftotext {
  fn name(&self) -> &'static str { "pdftotext" }

  async fn extract(&self, path: &Path) -> Option<String> {
    let output = Command::new(&self.program)
      .arg("-layout")
      .arg(path)
      .arg("-")
      .stdin(Stdio::null())
      .kill_on_drop(true)
      .output();

    let output = match tokio::time::timeout(self.timeout, output).await {
      Ok(Ok(output)) => output,
      Ok(Err(e)) => {
        debug!("Could not run {}: {e}", self.program);
        return None;
      },
      Err(_) => {
        warn!("{} timed out after {:?}", self.program, self.timeout);
        return None;
      },
    };

    if !output.status.success() {
      debug!(
        "{} exited with {}: {}",
        self.program,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
      );
      return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    (!text.trim().is_empty()).then_some(text)
  }
}

/// Extracts text page by page with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

#[async_trait]
impl TextExtractor for LopdfExtractor {
  fn name(&self) -> &'static str { "lopdf" }

  async fn extract(&self, path: &Path) -> Option<String> {
    let document = match Document::load(path) {
      Ok(document) => document,
      Err(e) => {
        debug!("lopdf could not load {path:?}: {e}");
        return None;
      },
    };

    let pages = document.get_pages().into_keys().filter_map(|number| {
      document
        .extract_text(&[number])
        .map_err(|e| trace!("lopdf found no text on page {number}: {e}"))
        .ok()
    });
    join_pages(pages)
  }
}

/// Extracts text page by page with the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractExtractor;

#[async_trait]
impl TextExtractor for PdfExtractExtractor {
  fn name(&self) -> &'static str { "pdf-extract" }

  async fn extract(&self, path: &Path) -> Option<String> {
    // pdf-extract panics on some fonts it does not understand
    let pages = match std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path)) {
      Ok(Ok(pages)) => pages,
      Ok(Err(e)) => {
        debug!("pdf-extract failed on {path:?}: {e}");
        return None;
      },
      Err(_) => {
        warn!("pdf-extract panicked on {path:?}");
        return None;
      },
    };

    join_pages(pages)
  }
}

/// Ordered list of extractors; the first non-empty result wins.
#[derive(Default)]
pub struct ExtractionChain {
  /// Extractors in the order they are tried
  extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractionChain {
  /// Creates an empty chain, which always yields the placeholder.
  pub fn new() -> Self { Self::default() }

  /// The `pdftotext` → `lopdf` → `pdf-extract` chain.
  pub fn standard(settings: &PdfSettings) -> Self {
    Self::new()
      .with_extractor(Pdftotext::new(settings))
      .with_extractor(LopdfExtractor)
      .with_extractor(PdfExtractExtractor)
  }

  /// Appends an extractor to the end of the chain.
  pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
    self.extractors.push(Box::new(extractor));
    self
  }

  /// Names of the extractors, in order.
  pub fn names(&self) -> Vec<&'static str> {
    self.extractors.iter().map(|extractor| extractor.name()).collect()
  }

  /// Runs the chain on `path`.
  ///
  /// Never fails: if nothing produces text the result is [`EXTRACTION_PLACEHOLDER`].
  pub async fn extract(&self, path: &Path) -> String {
    for extractor in &self.extractors {
      match extractor.extract(path).await {
        Some(text) if !text.trim().is_empty() => {
          info!("Extracted {} characters with {}", text.chars().count(), extractor.name());
          return text;
        },
        _ => debug!("{} produced no text, trying the next extractor", extractor.name()),
      }
    }
    warn!("No extractor produced text for {path:?}");
    EXTRACTION_PLACEHOLDER.to_string()
  }
}
