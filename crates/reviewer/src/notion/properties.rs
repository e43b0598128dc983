//! Mapping of a review's property bag onto Notion property values.
//!
//! | Key     | Notion type    | Notes                                  |
//! |---------|----------------|----------------------------------------|
//! | Name    | `title`        |                                        |
//! | Authors | `rich_text`    |                                        |
//! | Year    | `number`       | numbers and numeric strings accepted   |
//! | Tags    | `multi_select` |                                        |
//! | Status  | `select`       |                                        |
//! | URL     | `url`          |                                        |
//! | GitHub  | `url`          |                                        |
//! | Summary | `rich_text`    | cut to [`SUMMARY_LIMIT`] characters    |
//!
//! Other keys are ignored, and absent keys are left out of the request entirely.

use serde::{de::Error as _, Deserializer};

use super::*;

/// Longest text Notion accepts in a single rich text object.
pub const SUMMARY_LIMIT: usize = 2000;

/// The recognised properties of a review page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProperties {
  /// Paper title
  #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
  pub name:    Option<String>,
  /// Author list as one string
  #[serde(rename = "Authors", default, skip_serializing_if = "Option::is_none")]
  pub authors: Option<String>,
  /// Publication year
  #[serde(
    rename = "Year",
    default,
    deserialize_with = "deserialize_year",
    skip_serializing_if = "Option::is_none"
  )]
  pub year:    Option<i64>,
  /// Topic tags
  #[serde(rename = "Tags", default, skip_serializing_if = "Option::is_none")]
  pub tags:    Option<Vec<String>>,
  /// Reading status
  #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
  pub status:  Option<String>,
  /// Paper link
  #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
  pub url:     Option<String>,
  /// Code repository link
  #[serde(rename = "GitHub", default, skip_serializing_if = "Option::is_none")]
  pub github:  Option<String>,
  /// Short summary
  #[serde(rename = "Summary", default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
}

/// Accepts a year as an integer, a float or a numeric string.
fn deserialize_year<'de, D>(deserializer: D) -> core::result::Result<Option<i64>, D::Error>
where D: Deserializer<'de> {
  /// The shapes a year shows up in.
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Year {
    /// `2025`
    Integer(i64),
    /// `2025.0`
    Float(f64),
    /// `"2025"`
    Text(String),
  }

  match Option::<Year>::deserialize(deserializer)? {
    None => Ok(None),
    Some(Year::Integer(year)) => Ok(Some(year)),
    Some(Year::Float(year)) if year.is_finite() => Ok(Some(year.trunc() as i64)),
    Some(Year::Float(year)) => Err(D::Error::custom(format!("Year must be a number, got {year}"))),
    Some(Year::Text(text)) => text
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| D::Error::custom(format!("Year must be an integer, got {text:?}"))),
  }
}

/// A `rich_text` or `title` array holding one text object.
fn text_content(content: &str) -> Value { json!([{ "text": { "content": content } }]) }

impl PageProperties {
  /// Whether no recognised property is set.
  pub fn is_empty(&self) -> bool { self == &Self::default() }

  /// Builds the `properties` object of a Notion request.
  pub fn to_notion(&self) -> Map<String, Value> {
    let mut properties = Map::new();

    if let Some(name) = &self.name {
      properties.insert("Name".into(), json!({ "title": text_content(name) }));
    }
    if let Some(authors) = &self.authors {
      properties.insert("Authors".into(), json!({ "rich_text": text_content(authors) }));
    }
    if let Some(year) = self.year {
      properties.insert("Year".into(), json!({ "number": year }));
    }
    if let Some(tags) = &self.tags {
      let options: Vec<Value> = tags.iter().map(|tag| json!({ "name": tag })).collect();
      properties.insert("Tags".into(), json!({ "multi_select": options }));
    }
    if let Some(status) = &self.status {
      properties.insert("Status".into(), json!({ "select": { "name": status } }));
    }
    if let Some(url) = &self.url {
      properties.insert("URL".into(), json!({ "url": url }));
    }
    if let Some(github) = &self.github {
      properties.insert("GitHub".into(), json!({ "url": github }));
    }
    if let Some(summary) = &self.summary {
      let summary: String = summary.chars().take(SUMMARY_LIMIT).collect();
      properties.insert("Summary".into(), json!({ "rich_text": text_content(&summary) }));
    }

    properties
  }
}
