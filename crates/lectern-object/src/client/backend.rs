//! Transport seam between [`ObjectStoreClient`] and a concrete store.
//!
//! [`ObjectStoreClient`]: super::ObjectStoreClient

use std::fmt;

use crate::body::StreamedBody;
use crate::types::{ObjectHead, Result};

/// Raw response of a `GET`, before the body is materialized.
#[derive(Debug)]
pub struct ObjectResponse {
    /// Body in whatever shape the transport produced.
    pub body: StreamedBody,
    /// MIME content-type declared by the store, if any.
    pub content_type: Option<String>,
    /// Byte length declared by the store, if any.
    pub content_length: Option<u64>,
}

impl ObjectResponse {
    /// Creates a response with no declared metadata.
    pub fn new(body: impl Into<StreamedBody>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
            content_length: None,
        }
    }

    /// Attaches a declared content-type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Attaches a declared content length.
    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }
}

/// A bucket-addressed object store reachable over some transport.
///
/// Implementations issue exactly one round trip per call and must report an
/// absent object as [`ErrorKind::NotFound`], any other failure as
/// [`ErrorKind::Transport`], and a bucket they cannot serve as
/// [`ErrorKind::Configuration`].
///
/// [`ErrorKind::NotFound`]: crate::ErrorKind::NotFound
/// [`ErrorKind::Transport`]: crate::ErrorKind::Transport
/// [`ErrorKind::Configuration`]: crate::ErrorKind::Configuration
#[async_trait::async_trait]
pub trait ObjectBackend: fmt::Debug + Send + Sync + 'static {
    /// Issues a `GET` for `key` in `bucket`.
    async fn get(&self, bucket: &str, key: &str) -> Result<ObjectResponse>;

    /// Issues a `HEAD` for `key` in `bucket`; no body is transferred.
    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectHead>;
}
