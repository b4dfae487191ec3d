//! [`ObjectBackend`] implementation over [`object_store::ObjectStore`].

use std::collections::HashMap;
use std::sync::Arc;

use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{Attribute, ObjectStore};

use super::{ObjectBackend, ObjectResponse};
use crate::body::StreamedBody;
use crate::types::{Error, ObjectHead, Result, from_object_store};

/// Immutable map from bucket name to a store handle scoped to that bucket.
///
/// `object_store` binds each handle to a single bucket at build time, so one
/// handle is built per bucket up front and looked up on every call.
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreBackend {
    buckets: HashMap<String, Arc<dyn ObjectStore>>,
}

impl ObjectStoreBackend {
    /// Creates a backend that serves no buckets yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `store` as the handle for `bucket`.
    pub fn with_bucket(mut self, bucket: impl Into<String>, store: impl ObjectStore) -> Self {
        self.buckets.insert(bucket.into(), Arc::new(store));
        self
    }

    /// Registers an already shared handle for `bucket`.
    pub fn with_shared_bucket(
        mut self,
        bucket: impl Into<String>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        self.buckets.insert(bucket.into(), store);
        self
    }

    /// Names of all served buckets.
    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    fn store(&self, bucket: &str) -> Result<&Arc<dyn ObjectStore>> {
        self.buckets
            .get(bucket)
            .ok_or_else(|| Error::configuration(format!("bucket '{bucket}' is not configured")))
    }
}

/// Maps a key to a store path verbatim.
///
/// `Path::from` percent-encodes reserved characters such as `#`, `%` or `~`,
/// which would address a different object than the one stored under `key`.
fn location(key: &str) -> Result<Path> {
    Path::parse(key).map_err(|err| {
        Error::not_found(format!("key '{key}' is not a valid object path")).with_source(err)
    })
}

#[async_trait::async_trait]
impl ObjectBackend for ObjectStoreBackend {
    async fn get(&self, bucket: &str, key: &str) -> Result<ObjectResponse> {
        let store = self.store(bucket)?;
        let result = store
            .get(&location(key)?)
            .await
            .map_err(from_object_store)?;

        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());
        let content_length = result.meta.size;
        let body = StreamedBody::from_stream(result.into_stream().map_err(from_object_store));

        let mut response = ObjectResponse::new(body).with_content_length(content_length);
        response.content_type = content_type;
        Ok(response)
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectHead> {
        let store = self.store(bucket)?;
        let meta = store
            .head(&location(key)?)
            .await
            .map_err(from_object_store)?;
        Ok(meta.into())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use object_store::memory::InMemory;
    use object_store::{PutOptions, PutPayload};

    use super::*;
    use crate::ErrorKind;

    async fn backend_with(key: &str, data: &'static [u8], content_type: Option<&str>) -> ObjectStoreBackend {
        let store = InMemory::new();
        let mut opts = PutOptions::default();
        if let Some(ct) = content_type {
            opts.attributes
                .insert(Attribute::ContentType, ct.to_string().into());
        }
        store
            .put_opts(&Path::parse(key).unwrap(), PutPayload::from_static(data), opts)
            .await
            .unwrap();
        ObjectStoreBackend::new().with_bucket("assets", store)
    }

    #[tokio::test]
    async fn get_streams_body_and_metadata() {
        let backend = backend_with("cover.png", b"\x89PNG", Some("image/png")).await;
        let response = backend.get("assets", "cover.png").await.unwrap();
        assert_eq!(response.content_type.as_deref(), Some("image/png"));
        assert_eq!(response.content_length, Some(4));

        let data = response.body.materialize().await.unwrap();
        assert_eq!(data, Some(Bytes::from_static(b"\x89PNG")));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let backend = backend_with("cover.png", b"x", None).await;
        let err = backend.get("assets", "missing.png").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn head_returns_size() {
        let backend = backend_with("doc.pdf", b"%PDF-1.7", None).await;
        let head = backend.head("assets", "doc.pdf").await.unwrap();
        assert_eq!(head.size, 8);
        assert_eq!(head.key, "doc.pdf");
    }

    #[tokio::test]
    async fn unknown_bucket_is_configuration() {
        let backend = backend_with("doc.pdf", b"x", None).await;
        let err = backend.head("other", "doc.pdf").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn reserved_characters_address_the_stored_key() {
        let store = InMemory::new();
        let keys = ["lesson#1.png", "cover~v2.jpg", "100%.pdf", "a[1].png", "notes & more.pdf"];
        for key in keys {
            store
                .put(&Path::parse(key).unwrap(), PutPayload::from(key.as_bytes().to_vec()))
                .await
                .unwrap();
        }
        let backend = ObjectStoreBackend::new().with_bucket("assets", store);

        for key in keys {
            let response = backend.get("assets", key).await.unwrap();
            let data = response.body.materialize().await.unwrap();
            assert_eq!(data.as_deref(), Some(key.as_bytes()));

            let head = backend.head("assets", key).await.unwrap();
            assert_eq!(head.key, key);
        }
    }

    #[tokio::test]
    async fn unparseable_key_is_not_found() {
        let backend = backend_with("doc.pdf", b"x", None).await;
        let err = backend.get("assets", "a//b").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
