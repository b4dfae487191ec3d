//! Fully buffered object returned by a successful fetch.

use bytes::Bytes;

/// Result of a successful [`ObjectStoreClient::fetch_object`] call.
///
/// Owned by the request that fetched it; nothing in this crate caches it.
///
/// [`ObjectStoreClient::fetch_object`]: crate::client::ObjectStoreClient::fetch_object
#[derive(Debug, Clone)]
pub struct RetrievedObject {
    /// Contiguous, non-empty payload.
    pub data: Bytes,
    /// MIME content-type declared by the store, if any.
    pub content_type: Option<String>,
    /// Byte length declared by the store, if any.
    pub content_length: Option<u64>,
}

impl RetrievedObject {
    /// Wraps a buffer with no declared metadata.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            content_type: None,
            content_length: None,
        }
    }

    /// Returns the declared content-type.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the number of bytes actually held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty. Never true for objects produced by the client.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
