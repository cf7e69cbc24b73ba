//! Paper metadata records as read from and written to the corpus.
//!
//! Records are kept as open JSON objects: only `title`, `summary`,
//! `source_file` and `survey_categories` carry meaning here, every other
//! field passes through untouched and in its original position.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::Categories;

/// Field holding the paper title.
pub const TITLE_FIELD: &str = "title";
/// Field holding the paper abstract.
pub const SUMMARY_FIELD: &str = "summary";
/// Field stamped with the basename of the corpus file a paper came from.
pub const SOURCE_FILE_FIELD: &str = "source_file";
/// Field stamped with the chapter classification.
pub const CATEGORIES_FIELD: &str = "survey_categories";

/// A single paper record (one JSON object per corpus line).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paper(Map<String, Value>);

impl Paper {
    /// Wraps an existing JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Converts a JSON value into a paper; `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Builds a paper with only a title and summary.
    #[must_use]
    pub fn with_text(title: &str, summary: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(TITLE_FIELD.to_string(), Value::from(title));
        fields.insert(SUMMARY_FIELD.to_string(), Value::from(summary));
        Self(fields)
    }

    /// Returns a string field, or `""` when absent or not a string.
    #[must_use]
    pub fn text_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Paper title (empty when missing).
    #[must_use]
    pub fn title(&self) -> &str {
        self.text_field(TITLE_FIELD)
    }

    /// Paper abstract (empty when missing).
    #[must_use]
    pub fn summary(&self) -> &str {
        self.text_field(SUMMARY_FIELD)
    }

    /// Recorded corpus file name, if present and non-empty.
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.0
            .get(SOURCE_FILE_FIELD)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Stamps the originating corpus file name.
    pub fn set_source_file(&mut self, name: &str) {
        self.0
            .insert(SOURCE_FILE_FIELD.to_string(), Value::from(name));
    }

    /// Stamps the chapter classification, replacing any previous one.
    pub fn set_categories(&mut self, categories: &Categories) {
        self.0
            .insert(CATEGORIES_FIELD.to_string(), categories.to_value());
    }

    /// Read-only access to every field.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title();
        if title.is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{title}")
        }
    }
}
