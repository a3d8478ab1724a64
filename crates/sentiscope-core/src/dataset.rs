#![forbid(unsafe_code)]

//! Ingest of JSON post exports.
//!
//! A load either installs a complete [`Dataset`] or fails without producing
//! anything. Within a well-formed array, individual posts that cannot be used
//! are skipped and reported rather than failing the whole load:
//!
//! | Problem                                  | Outcome                    |
//! |------------------------------------------|----------------------------|
//! | Input is not JSON                        | [`CoreError::Json`]        |
//! | Top level is not an array                | [`CoreError::NotAnArray`]  |
//! | Field missing or of the wrong type       | post skipped               |
//! | Non-finite coordinate or score           | post skipped               |
//! | `idx` already seen earlier in the array  | later post skipped         |
//! | Non-empty array, every post skipped      | [`CoreError::NoValidPosts`]|

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::post::{Post, PostId, PostRecord};

/// Why a post was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required field is missing or has the wrong JSON type.
    Malformed(String),
    /// A numeric field is NaN or infinite.
    NonFinite(&'static str),
    /// Another post earlier in the file already uses this `idx`.
    DuplicateIdx,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed post: {detail}"),
            Self::NonFinite(field) => write!(f, "non-finite value in {field}"),
            Self::DuplicateIdx => f.write_str("duplicate idx"),
        }
    }
}

/// A post that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPost {
    /// Zero-based position in the input array.
    pub position: usize,
    /// The post's `idx`, when it could be read.
    pub idx: Option<PostId>,
    pub reason: SkipReason,
}

/// Summary of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Number of elements in the input array.
    pub total: usize,
    /// Number of posts installed.
    pub loaded: usize,
    pub skipped: Vec<SkippedPost>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// An immutable collection of posts with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    posts: Vec<Post>,
    index: HashMap<PostId, usize>,
}

impl Dataset {
    /// Parse a JSON export held in memory.
    pub fn from_json_str(input: &str) -> Result<(Self, LoadReport)> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parse a JSON export from a reader.
    pub fn from_reader(reader: impl Read) -> Result<(Self, LoadReport)> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value)
    }

    /// Read and parse a JSON export from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let loaded = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            loaded = loaded.1.loaded,
            skipped = loaded.1.skipped.len(),
            "dataset loaded"
        );
        Ok(loaded)
    }

    /// Build a dataset from an already-parsed JSON document.
    pub fn from_json_value(value: Value) -> Result<(Self, LoadReport)> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(CoreError::NotAnArray {
                    found: json_kind(&other),
                });
            }
        };

        let total = elements.len();
        let mut records = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        for (position, element) in elements.into_iter().enumerate() {
            let idx = element.get("idx").and_then(PostId::from_json);
            match serde_json::from_value::<PostRecord>(element) {
                Ok(record) => records.push((position, record)),
                Err(err) => skipped.push(SkippedPost {
                    position,
                    idx,
                    reason: SkipReason::Malformed(err.to_string()),
                }),
            }
        }

        Self::assemble(total, records, skipped)
    }

    /// Build a dataset from records, applying the same skip policy as a
    /// JSON load.
    pub fn from_records(records: impl IntoIterator<Item = PostRecord>) -> Result<(Self, LoadReport)> {
        let records: Vec<_> = records.into_iter().enumerate().collect();
        Self::assemble(records.len(), records, Vec::new())
    }

    fn assemble(
        total: usize,
        records: Vec<(usize, PostRecord)>,
        mut skipped: Vec<SkippedPost>,
    ) -> Result<(Self, LoadReport)> {
        let mut posts = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records {
            let reason = if let Some(field) = record.non_finite_field() {
                Some(SkipReason::NonFinite(field))
            } else if index.contains_key(&record.idx) {
                Some(SkipReason::DuplicateIdx)
            } else {
                None
            };
            if let Some(reason) = reason {
                skipped.push(SkippedPost {
                    position,
                    idx: Some(record.idx),
                    reason,
                });
                continue;
            }
            index.insert(record.idx.clone(), posts.len());
            posts.push(Post::from(record));
        }

        skipped.sort_by_key(|s| s.position);
        for skip in &skipped {
            tracing::warn!(
                position = skip.position,
                idx = ?skip.idx,
                reason = %skip.reason,
                "skipping post"
            );
        }

        if total > 0 && posts.is_empty() {
            return Err(CoreError::NoValidPosts { total });
        }

        let report = LoadReport {
            total,
            loaded: posts.len(),
            skipped,
        };
        Ok((Self { posts, index }, report))
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by identifier.
    #[must_use]
    pub fn get(&self, idx: &PostId) -> Option<&Post> {
        self.index.get(idx).map(|&i| &self.posts[i])
    }

    /// Distinct months in first-seen order.
    #[must_use]
    pub fn months(&self) -> Vec<&str> {
        let mut months: Vec<&str> = Vec::new();
        for post in &self.posts {
            if !months.contains(&post.month()) {
                months.push(post.month());
            }
        }
        months
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_json(idx: i64, month: &str) -> String {
        format!(
            r#"{{"idx": {idx}, "RawTweet": "b'post {idx}'", "Month": "{month}",
                "Dimension 1": {idx}.0, "Dimension 2": 0.0,
                "Sentiment": 0.1, "Subjectivity": 0.2}}"#
        )
    }

    #[test]
    fn loads_well_formed_array() {
        let input = format!("[{}, {}]", post_json(1, "Jan"), post_json(2, "Feb"));
        let (dataset, report) = Dataset::from_json_str(&input).expect("valid export");
        assert_eq!(dataset.len(), 2);
        assert!(report.is_clean());
        assert_eq!(report.total, 2);
        assert_eq!(dataset.posts()[0].text(), "post 1");
        assert_eq!(dataset.get(&PostId::Int(2)).unwrap().month(), "Feb");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = Dataset::from_json_str("[{").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn object_top_level_is_rejected() {
        let err = Dataset::from_json_str(r#"{"idx": 1}"#).unwrap_err();
        assert!(matches!(err, CoreError::NotAnArray { found: "object" }));
    }

    #[test]
    fn empty_array_is_an_empty_dataset() {
        let (dataset, report) = Dataset::from_json_str("[]").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn malformed_post_is_skipped_and_reported() {
        let input = format!(
            r#"[{}, {{"idx": 9, "RawTweet": "x", "Month": "Jan"}}]"#,
            post_json(1, "Jan")
        );
        let (dataset, report) = Dataset::from_json_str(&input).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        let skipped = &report.skipped[0];
        assert_eq!(skipped.position, 1);
        assert_eq!(skipped.idx, Some(PostId::Int(9)));
        assert!(matches!(&skipped.reason, SkipReason::Malformed(msg) if msg.contains("Dimension 1")));
    }

    #[test]
    fn duplicate_idx_keeps_first_occurrence() {
        let input = format!("[{}, {}]", post_json(1, "Jan"), post_json(1, "Feb"));
        let (dataset, report) = Dataset::from_json_str(&input).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.posts()[0].month(), "Jan");
        assert_eq!(report.skipped[0].reason, SkipReason::DuplicateIdx);
    }

    #[test]
    fn all_posts_invalid_fails_the_load() {
        let err = Dataset::from_json_str(r#"[{"idx": 1}, 5]"#).unwrap_err();
        assert!(matches!(err, CoreError::NoValidPosts { total: 2 }));
    }

    #[test]
    fn non_finite_records_are_skipped() {
        let records = vec![
            PostRecord::new(1, "a", "Jan").dimensions(f64::NAN, 0.0),
            PostRecord::new(2, "b", "Jan"),
        ];
        let (dataset, report) = Dataset::from_records(records).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NonFinite("Dimension 1"));
    }

    #[test]
    fn months_are_in_first_seen_order() {
        let input = format!(
            "[{}, {}, {}]",
            post_json(1, "Mar"),
            post_json(2, "Jan"),
            post_json(3, "Mar")
        );
        let (dataset, _) = Dataset::from_json_str(&input).unwrap();
        assert_eq!(dataset.months(), vec!["Mar", "Jan"]);
    }
}
