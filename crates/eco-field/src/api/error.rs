use thiserror::Error;

/// Errors surfaced by field configuration.
///
/// Drawing never fails: a missing surface is a no-op, not an error.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("malformed field config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid field config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;
