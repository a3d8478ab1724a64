#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of posts, found {found}")]
    NotAnArray { found: &'static str },

    #[error("none of the {total} posts could be loaded")]
    NoValidPosts { total: usize },

    #[error("unknown metric: {name} (expected Sentiment or Subjectivity)")]
    UnknownMetric { name: String },
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn not_an_array_names_the_json_kind() {
        let error = CoreError::NotAnArray { found: "object" };
        assert_eq!(
            error.to_string(),
            "expected a JSON array of posts, found object"
        );
    }

    #[test]
    fn json_errors_convert_with_question_mark() {
        fn parse() -> super::Result<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }
        let error = parse().expect_err("malformed input must fail");
        assert!(matches!(error, CoreError::Json(_)));
        assert!(error.to_string().starts_with("invalid JSON"));
    }
}
