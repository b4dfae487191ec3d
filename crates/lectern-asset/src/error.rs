//! Error type for key validation and asset transforms.

use thiserror::Error;

/// Type alias for results carrying an asset [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while validating references or transforming assets.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied an empty, unsafe or missing reference.
    #[error("invalid reference: {0}")]
    Validation(String),

    /// Stored bytes do not parse as the expected format.
    #[error("malformed asset: {0}")]
    MalformedAsset(String),

    /// A transformed asset could not be written back to bytes.
    #[error("failed to serialize asset: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether the error was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
