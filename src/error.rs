use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The outer document is not a JSON object.
    #[error("malformed document: {0}")]
    Structural(#[from] serde_json::Error),

    /// A value failed its format check before reaching the wire.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Error {
        Error::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural(_))
    }
}
