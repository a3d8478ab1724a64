#![forbid(unsafe_code)]

use std::path::PathBuf;

use sentiscope_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not load {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl AppError {
    /// Process exit status for this error: 2 for usage mistakes, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use sentiscope_core::CoreError;

    #[test]
    fn invalid_argument_is_a_usage_error() {
        let error = AppError::invalid("bad click");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid argument: bad click");
    }

    #[test]
    fn core_errors_pass_through_unchanged() {
        let error = AppError::from(CoreError::NoValidPosts { total: 3 });
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "none of the 3 posts could be loaded");
    }
}
