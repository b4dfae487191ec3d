//! Error type for object-store operations.

use strum::{AsRefStr, Display, IntoStaticStr};

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for results carrying an object-store [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of failures surfaced by the object-store boundary.
///
/// Provider-specific discriminators (e.g. `NoSuchKey`) never escape this
/// crate; they are folded into one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Missing credentials, unknown bucket or an unbuildable client.
    Configuration,
    /// The object does not exist, or its body is empty.
    NotFound,
    /// Network, authentication or server-side failure.
    Transport,
}

/// A structured error for object-store operations.
#[derive(Debug, thiserror::Error)]
#[error("[{kind}] {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Attaches a source error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error means the object is absent.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Converts an [`object_store::Error`] into a crate [`Error`].
///
/// Classification matches on the error variant, never on message text.
pub(crate) fn from_object_store(err: object_store::Error) -> Error {
    match err {
        object_store::Error::NotFound { ref path, .. } => {
            Error::not_found(format!("object not found: {path}")).with_source(err)
        }
        object_store::Error::UnknownConfigurationKey { .. } => {
            Error::configuration(err.to_string()).with_source(err)
        }
        other => Error::transport(other.to_string()).with_source(other),
    }
}
