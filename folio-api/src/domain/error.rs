use folio_types::ValidationErrors;
use thiserror::Error;

/// Errors that can occur while reading or writing projects.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("invalid project: {0}")]
    Invalid(ValidationErrors),
    #[error("thumbnail must be an absolute http(s) url, got '{0}'")]
    InvalidThumbnail(String),
    #[error("{0}")]
    Storage(String),
}

impl ProjectError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<sqlx::Error> for ProjectError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
