use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Name already registered: {0}")]
    DuplicateName(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for building an [`Error::InvalidParameter`].
pub(crate) fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidParameter(msg.into())
}
