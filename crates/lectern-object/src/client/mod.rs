//! Object-store client used by every retrieval path.
//!
//! [`ObjectStoreClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectBackend>`. It materializes response bodies, turns empty
//! bodies into not-found, and provides the existence check. Every public
//! method is instrumented with [`tracing`].

use std::sync::Arc;

use crate::TRACING_TARGET_CLIENT;
use crate::types::{Error, ObjectHead, Result, RetrievedObject};

mod backend;
mod store_backend;

pub use backend::{ObjectBackend, ObjectResponse};
pub use store_backend::ObjectStoreBackend;

/// Cloneable handle to any [`ObjectBackend`].
///
/// Holds no per-call state, so one instance can serve concurrent requests.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(Arc<dyn ObjectBackend>);

impl ObjectStoreClient {
    /// Wraps a concrete [`ObjectBackend`].
    pub fn new(backend: impl ObjectBackend) -> Self {
        Self(Arc::new(backend))
    }

    /// Wraps an already shared backend.
    pub fn from_shared(backend: Arc<dyn ObjectBackend>) -> Self {
        Self(backend)
    }

    /// Fetches and fully buffers the object stored at `key`.
    ///
    /// An absent or zero-length body is reported as not found.
    #[tracing::instrument(name = "object.fetch", skip(self), fields(size))]
    pub async fn fetch_object(&self, bucket: &str, key: &str) -> Result<RetrievedObject> {
        let response = self.0.get(bucket, key).await?;
        let data = response
            .body
            .materialize()
            .await?
            .ok_or_else(|| Error::not_found(format!("object '{key}' has an empty body")))?;

        tracing::Span::current().record("size", data.len());
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            bucket,
            key,
            size = data.len(),
            content_type = response.content_type.as_deref(),
            "fetched object"
        );

        Ok(RetrievedObject {
            data,
            content_type: response.content_type,
            content_length: response.content_length,
        })
    }

    /// Fetches object metadata without transferring the body.
    #[tracing::instrument(name = "object.probe", skip(self))]
    pub async fn probe_object(&self, bucket: &str, key: &str) -> Result<ObjectHead> {
        self.0.head(bucket, key).await
    }

    /// Reports whether `key` exists in `bucket`.
    ///
    /// Not-found maps to `false`. Any other failure propagates, since a
    /// transport error says nothing about whether the object is there.
    #[tracing::instrument(name = "object.exists", skip(self))]
    pub async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.probe_object(bucket, key).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_CLIENT,
                    bucket,
                    key,
                    error = %err,
                    "existence probe failed"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use object_store::PutPayload;
    use object_store::memory::InMemory;
    use object_store::path::Path;
    use object_store::ObjectStore;

    use super::*;
    use crate::ErrorKind;
    use crate::body::StreamedBody;

    /// Backend answering every call with the same scripted outcome.
    #[derive(Debug)]
    struct ScriptedBackend {
        kind: Option<ErrorKind>,
        body: fn() -> StreamedBody,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn failing(kind: ErrorKind) -> Self {
            Self {
                kind: Some(kind),
                body: || StreamedBody::Empty,
                calls: AtomicUsize::new(0),
            }
        }

        fn returning(body: fn() -> StreamedBody) -> Self {
            Self {
                kind: None,
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ObjectBackend for ScriptedBackend {
        async fn get(&self, _bucket: &str, key: &str) -> Result<ObjectResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.kind {
                Some(kind) => Err(Error::new(kind, key)),
                None => Ok(ObjectResponse::new((self.body)())),
            }
        }

        async fn head(&self, _bucket: &str, key: &str) -> Result<ObjectHead> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.kind {
                Some(kind) => Err(Error::new(kind, key)),
                None => Ok(ObjectHead::new(key, 1)),
            }
        }
    }

    async fn memory_client() -> ObjectStoreClient {
        let store = InMemory::new();
        store
            .put(&Path::parse("lesson1.pdf").unwrap(), PutPayload::from_static(b"%PDF-1.7"))
            .await
            .unwrap();
        ObjectStoreClient::new(ObjectStoreBackend::new().with_bucket("documents", store))
    }

    #[tokio::test]
    async fn fetch_object() {
        let client = memory_client().await;
        let object = client.fetch_object("documents", "lesson1.pdf").await.unwrap();
        assert_eq!(object.data, Bytes::from_static(b"%PDF-1.7"));
        assert_eq!(object.content_length, Some(8));
    }

    #[tokio::test]
    async fn fetch_missing_object() {
        let client = memory_client().await;
        let err = client.fetch_object("documents", "nope.pdf").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fetch_empty_body_is_not_found() {
        let client = ObjectStoreClient::new(ScriptedBackend::returning(|| StreamedBody::Empty));
        let err = client.fetch_object("documents", "empty.pdf").await.unwrap_err();
        assert!(err.is_not_found());

        let client =
            ObjectStoreClient::new(ScriptedBackend::returning(|| Bytes::new().into()));
        let err = client.fetch_object("documents", "empty.pdf").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn exists() {
        let client = memory_client().await;
        assert!(client.exists("documents", "lesson1.pdf").await.unwrap());
        assert!(!client.exists("documents", "lesson2.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn exists_maps_not_found_to_false() {
        let client = ObjectStoreClient::new(ScriptedBackend::failing(ErrorKind::NotFound));
        assert!(!client.exists("documents", "gone.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn exists_propagates_transport_errors() {
        let client = ObjectStoreClient::new(ScriptedBackend::failing(ErrorKind::Transport));
        let err = client.exists("documents", "lesson1.pdf").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn probe_issues_one_call() {
        let backend = Arc::new(ScriptedBackend::returning(|| StreamedBody::Empty));
        let client = ObjectStoreClient::from_shared(backend.clone());
        let head = client.probe_object("documents", "lesson1.pdf").await.unwrap();
        assert_eq!(head.key, "lesson1.pdf");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }
}
