//! HTTP error handling with builder pattern for dynamic error responses.
//!
//! Every failure of the retrieval layer ends up as one of the [`ErrorKind`]
//! variants below, each bound to a single status code.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::TRACING_TARGET_ERROR;
use crate::handler::response::ErrorResponse;

/// The error type for request handlers.
///
/// Carries the [`ErrorKind`] that selects the status code, plus an optional
/// client-facing message, the resource involved and internal context that is
/// logged but never serialized.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches internal context, logged for debugging.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Sets a custom user-friendly message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource if present.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref resource) = self.resource {
            debug_struct.field("resource", resource);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {}]", resource)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        if self.kind.is_server_error() {
            tracing::error!(
                target: TRACING_TARGET_ERROR,
                kind = ?self.kind,
                resource = self.resource.as_deref(),
                context = self.context.as_deref(),
                "request failed"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET_ERROR,
                kind = ?self.kind,
                resource = self.resource.as_deref(),
                message = self.message.as_deref(),
                "request rejected"
            );
        }

        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }

        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

/// A specialized [`Result`] type for handler operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every way a retrieval request can fail.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Empty, unsafe or missing reference, or unserved bucket
    BadRequest,
    /// 404 Not Found - Object absent, empty, or no candidate matched
    NotFound,

    // 5xx Server Errors
    /// 500 Internal Server Error - Missing credentials or unserved default bucket
    Configuration,
    /// 500 Internal Server Error - Object store unreachable or failing
    Transport,
    /// 500 Internal Server Error - Stored bytes failed to parse
    MalformedAsset,
    /// 500 Internal Server Error - Unexpected server error
    InternalServerError,
}

impl ErrorKind {
    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Whether this kind maps to a 5xx status.
    #[inline]
    pub fn is_server_error(self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns the response template for this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Configuration => ErrorResponse::CONFIGURATION,
            Self::Transport => ErrorResponse::TRANSPORT,
            Self::MalformedAsset => ErrorResponse::MALFORMED_ASSET,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        for kind in [
            ErrorKind::Configuration,
            ErrorKind::Transport,
            ErrorKind::MalformedAsset,
            ErrorKind::InternalServerError,
        ] {
            assert_eq!(kind.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(kind.is_server_error());
        }
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Thumbnail not found")
            .with_context("tried 4 candidates")
            .with_resource("lesson1.png");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Thumbnail not found"));
        assert_eq!(error.resource(), Some("lesson1.png"));
        assert_eq!(error.context(), Some("tried 4 candidates"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Document not found")
            .with_resource("worksheet.pdf");

        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Document not found"));
        assert!(display.contains("worksheet.pdf"));
    }

    #[test]
    fn into_response_keeps_status() {
        let response = ErrorKind::BadRequest
            .with_message("object key is required")
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
