//! Page body blocks.
//!
//! Blocks are opaque: whatever JSON objects the caller supplies are sent as they are, with the
//! `"object": "block"` tag added. Only their order matters here.

use super::*;

/// Most children Notion accepts in one append request, and the page size used when listing.
pub const BATCH_SIZE: usize = 100;

/// One Notion block object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(Map<String, Value>);

impl Block {
  /// Wraps a JSON object.
  pub fn new(fields: Map<String, Value>) -> Self { Self(fields) }

  /// The block's fields as supplied.
  pub fn fields(&self) -> &Map<String, Value> { &self.0 }

  /// The object sent to Notion: the block with `"object": "block"` added.
  ///
  /// A block that already names its object type keeps it.
  pub fn to_request(&self) -> Value {
    let mut fields = self.0.clone();
    fields.entry("object").or_insert_with(|| Value::String("block".to_string()));
    Value::Object(fields)
  }
}

impl From<Map<String, Value>> for Block {
  fn from(fields: Map<String, Value>) -> Self { Self(fields) }
}

/// Splits `blocks` into append requests of at most [`BATCH_SIZE`], preserving order.
pub fn batches(blocks: &[Block]) -> std::slice::Chunks<'_, Block> { blocks.chunks(BATCH_SIZE) }
