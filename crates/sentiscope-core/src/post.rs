#![forbid(unsafe_code)]

//! One captured social-media post.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::metric::Metric;
use crate::text;

/// Unique identifier of a post (the `idx` field of an export).
///
/// Integers keep their numeric identity; strings are kept verbatim. Any other
/// JSON primitive (floats, booleans) is stored as its canonical JSON text so
/// that equality stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PostId {
    Int(i64),
    Text(String),
}

impl PostId {
    /// Convert a JSON primitive into an identifier.
    ///
    /// Returns `None` for `null`, arrays, and objects.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Text(n.to_string()),
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FromStr for PostId {
    type Err = std::convert::Infallible;

    /// Integers become [`PostId::Int`], everything else [`PostId::Text`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(i) => Self::Int(i),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("idx must be a primitive value, got {value}"))
        })
    }
}

/// The captured text field: a single encoded string or a list of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Single(String),
    Fragments(Vec<String>),
}

impl From<&str> for RawText {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

/// Field-level view of one export record, before text normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub idx: PostId,
    #[serde(rename = "RawTweet")]
    pub raw_text: RawText,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Dimension 1")]
    pub dimension1: f64,
    #[serde(rename = "Dimension 2")]
    pub dimension2: f64,
    #[serde(rename = "Sentiment")]
    pub sentiment: f64,
    #[serde(rename = "Subjectivity")]
    pub subjectivity: f64,
}

impl PostRecord {
    /// Start a record with zeroed coordinates and neutral scores.
    pub fn new(idx: impl Into<PostId>, raw_text: impl Into<RawText>, month: impl Into<String>) -> Self {
        Self {
            idx: idx.into(),
            raw_text: raw_text.into(),
            month: month.into(),
            dimension1: 0.0,
            dimension2: 0.0,
            sentiment: 0.0,
            subjectivity: 0.0,
        }
    }

    #[must_use]
    pub fn dimensions(mut self, dimension1: f64, dimension2: f64) -> Self {
        self.dimension1 = dimension1;
        self.dimension2 = dimension2;
        self
    }

    #[must_use]
    pub fn scores(mut self, sentiment: f64, subjectivity: f64) -> Self {
        self.sentiment = sentiment;
        self.subjectivity = subjectivity;
        self
    }

    /// Name of the first numeric field that is NaN or infinite.
    pub(crate) fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("Dimension 1", self.dimension1),
            ("Dimension 2", self.dimension2),
            ("Sentiment", self.sentiment),
            ("Subjectivity", self.subjectivity),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// A loaded post with its derived display text.
///
/// `text` is computed from the raw field once, at construction; there is no
/// way to edit it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    record: PostRecord,
    text: String,
}

impl Post {
    #[must_use]
    pub fn idx(&self) -> &PostId {
        &self.record.idx
    }

    #[must_use]
    pub fn raw_text(&self) -> &RawText {
        &self.record.raw_text
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn month(&self) -> &str {
        &self.record.month
    }

    #[must_use]
    pub fn dimension1(&self) -> f64 {
        self.record.dimension1
    }

    #[must_use]
    pub fn dimension2(&self) -> f64 {
        self.record.dimension2
    }

    #[must_use]
    pub fn sentiment(&self) -> f64 {
        self.record.sentiment
    }

    #[must_use]
    pub fn subjectivity(&self) -> f64 {
        self.record.subjectivity
    }

    /// Value of the given coloring metric.
    #[must_use]
    pub fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sentiment => self.record.sentiment,
            Metric::Subjectivity => self.record.subjectivity,
        }
    }

    #[must_use]
    pub fn record(&self) -> &PostRecord {
        &self.record
    }
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        let text = text::normalize(&record.raw_text);
        Self { record, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_string_ids_stay_distinct() {
        assert_ne!(PostId::Int(7), PostId::Text("7".into()));
        assert_eq!(PostId::from_json(&json!(7)), Some(PostId::Int(7)));
        assert_eq!(PostId::from_json(&json!("7")), Some(PostId::Text("7".into())));
    }

    #[test]
    fn non_integer_primitives_use_canonical_text() {
        assert_eq!(PostId::from_json(&json!(1.5)), Some(PostId::Text("1.5".into())));
        assert_eq!(PostId::from_json(&json!(true)), Some(PostId::Text("true".into())));
        assert_eq!(PostId::from_json(&json!(null)), None);
        assert_eq!(PostId::from_json(&json!([1])), None);
    }

    #[test]
    fn cli_strings_parse_to_ids() {
        assert_eq!("42".parse::<PostId>().unwrap(), PostId::Int(42));
        assert_eq!("abc".parse::<PostId>().unwrap(), PostId::Text("abc".into()));
    }

    #[test]
    fn post_derives_text_from_raw_field() {
        let post = Post::from(PostRecord::new(1, "b'hello'", "Jan"));
        assert_eq!(post.text(), "hello");
        assert_eq!(post.raw_text(), &RawText::Single("b'hello'".into()));
    }

    #[test]
    fn record_deserializes_export_field_names() {
        let record: PostRecord = serde_json::from_value(json!({
            "idx": 3,
            "RawTweet": ["b'a'", "b'b'"],
            "Month": "2021-03",
            "Dimension 1": 0.25,
            "Dimension 2": -1.0,
            "Sentiment": -0.5,
            "Subjectivity": 0.75,
            "Extra": "ignored"
        }))
        .expect("valid record");
        let post = Post::from(record);
        assert_eq!(post.idx(), &PostId::Int(3));
        assert_eq!(post.text(), "a b");
        assert_eq!(post.metric_value(Metric::Sentiment), -0.5);
        assert_eq!(post.metric_value(Metric::Subjectivity), 0.75);
        assert_eq!(post.dimension2(), -1.0);
    }

    #[test]
    fn post_serializes_with_derived_text() {
        let post = Post::from(PostRecord::new("x", "b\"hi\"", "Feb").scores(0.5, 0.1));
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["idx"], json!("x"));
        assert_eq!(value["text"], json!("hi"));
        assert_eq!(value["Month"], json!("Feb"));
    }
}
