//! Result type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker appended to descriptions that were cut short
pub const TRUNCATION_MARKER: &str = "...";

/// Content category served by exactly one provider adapter
///
/// Serializes to the plural key used in `results_by_type`
/// (`code`, `videos`, `papers`, `datasets`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "videos")]
    Video,
    #[serde(rename = "papers")]
    Paper,
    #[serde(rename = "datasets")]
    Dataset,
}

impl ContentCategory {
    /// All known categories in default dispatch order
    pub const ALL: [ContentCategory; 4] = [
        ContentCategory::Code,
        ContentCategory::Video,
        ContentCategory::Paper,
        ContentCategory::Dataset,
    ];

    /// Key used for request `content_types` and `results_by_type`
    pub fn key(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Video => "videos",
            Self::Paper => "papers",
            Self::Dataset => "datasets",
        }
    }

    /// Singular form used as a result's `source_type`
    pub fn source_type(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Video => "video",
            Self::Paper => "paper",
            Self::Dataset => "dataset",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "code" => Ok(Self::Code),
            "videos" | "video" => Ok(Self::Video),
            "papers" | "paper" => Ok(Self::Paper),
            "datasets" | "dataset" => Ok(Self::Dataset),
            other => Err(format!("unknown content category: {}", other)),
        }
    }
}

/// `source_type` is written in the singular form
mod source_type_format {
    use super::ContentCategory;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        category: &ContentCategory,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(category.source_type())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ContentCategory, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single discovered item, normalized across providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier, unique within its provider
    pub id: String,
    pub title: String,
    /// Short description, already bounded by the adapter
    pub description: String,
    /// Canonical URL
    pub url: String,
    pub thumbnail_url: Option<String>,
    /// Category of the provider that produced this result
    #[serde(with = "source_type_format")]
    pub source_type: ContentCategory,
    /// Category-specific fields (stars, authors, channel, ...)
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Filled in by the scorer after retrieval
    #[serde(default)]
    pub relevance_score: f64,
}

impl SearchResult {
    /// Create a new result with an empty metadata bag and zero score
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        source_type: ContentCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            thumbnail_url: None,
            source_type,
            metadata: serde_json::Map::new(),
            relevance_score: 0.0,
        }
    }

    /// Set the description, bounded to `max_len` characters
    pub fn with_description(mut self, description: &str, max_len: usize) -> Self {
        self.description = truncate_description(description, max_len);
        self
    }

    /// Set the thumbnail URL
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Add a metadata entry
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Bound `text` to `max_len` characters.
///
/// The marker is only appended when characters were actually dropped.
pub fn truncate_description(text: &str, max_len: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_is_not_marked() {
        assert_eq!(truncate_description("short text", 200), "short text");
        assert_eq!(truncate_description("", 200), "");
    }

    #[test]
    fn test_long_description_is_cut_and_marked() {
        let long = "a".repeat(250);
        let cut = truncate_description(&long, 200);
        assert_eq!(cut.len(), 200 + TRUNCATION_MARKER.len());
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_exact_length_is_not_marked() {
        let exact = "b".repeat(200);
        assert_eq!(truncate_description(&exact, 200), exact);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "ü".repeat(10);
        assert_eq!(truncate_description(&text, 3), "üüü...");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("code".parse::<ContentCategory>(), Ok(ContentCategory::Code));
        assert_eq!("Videos".parse::<ContentCategory>(), Ok(ContentCategory::Video));
        assert_eq!("paper".parse::<ContentCategory>(), Ok(ContentCategory::Paper));
        assert_eq!(" datasets ".parse::<ContentCategory>(), Ok(ContentCategory::Dataset));
        assert!("music".parse::<ContentCategory>().is_err());
    }

    #[test]
    fn test_result_wire_shape() {
        let result = SearchResult::new("42", "tokio", "https://github.com/tokio-rs/tokio", ContentCategory::Code)
            .with_description("async runtime", 200)
            .with_meta("stars", 25000);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source_type"], "code");
        assert_eq!(json["thumbnail_url"], serde_json::Value::Null);
        assert_eq!(json["metadata"]["stars"], 25000);
        assert_eq!(json["relevance_score"], 0.0);

        let video = SearchResult::new("v", "t", "u", ContentCategory::Video);
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["source_type"], "video");

        let back: SearchResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.source_type, ContentCategory::Video);
    }
}
