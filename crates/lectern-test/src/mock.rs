//! Scripted object backend for testing.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::stream;
use lectern_object::{
    Error, ErrorKind, ObjectBackend, ObjectHead, ObjectResponse, ObjectStoreClient, Result,
    StreamedBody,
};

/// Shape in which [`MockBackend`] serves object bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyShape {
    /// Whole payload as one buffer.
    #[default]
    Bytes,
    /// Payload split into chunks of the given size.
    Chunks(usize),
    /// Payload behind an async reader.
    Reader,
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// A `GET` for `(bucket, key)`.
    Get(String, String),
    /// A `HEAD` for `(bucket, key)`.
    Head(String, String),
}

impl StoreCall {
    /// Key addressed by this call.
    pub fn key(&self) -> &str {
        match self {
            Self::Get(_, key) | Self::Head(_, key) => key,
        }
    }
}

/// Shared, append-only log of backend calls.
#[derive(Debug, Default)]
pub struct CallLog(Mutex<Vec<StoreCall>>);

impl CallLog {
    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.0.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.0.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Keys addressed so far, in order.
    pub fn keys(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.key().to_string()).collect()
    }

    fn record(&self, call: StoreCall) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }
}

#[derive(Debug, Clone)]
struct MockObject {
    data: Bytes,
    content_type: Option<String>,
}

/// In-memory [`ObjectBackend`] with call recording and failure injection.
#[derive(Debug, Default)]
pub struct MockBackend {
    objects: HashMap<(String, String), MockObject>,
    failures: HashMap<String, ErrorKind>,
    fail_all: Option<ErrorKind>,
    shape: BodyShape,
    log: Arc<CallLog>,
}

impl MockBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object without a declared content-type.
    pub fn with_object(self, bucket: &str, key: &str, data: impl Into<Bytes>) -> Self {
        self.insert(bucket, key, data.into(), None)
    }

    /// Stores an object with a declared content-type.
    pub fn with_typed_object(
        self,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
        content_type: &str,
    ) -> Self {
        self.insert(bucket, key, data.into(), Some(content_type.to_string()))
    }

    /// Makes every call addressing `key` fail with `kind`.
    pub fn with_failure(mut self, key: &str, kind: ErrorKind) -> Self {
        self.failures.insert(key.to_string(), kind);
        self
    }

    /// Makes every call fail with `kind`.
    pub fn failing(mut self, kind: ErrorKind) -> Self {
        self.fail_all = Some(kind);
        self
    }

    /// Serves bodies in the given shape.
    pub fn with_shape(mut self, shape: BodyShape) -> Self {
        self.shape = shape;
        self
    }

    /// Handle to the call log; stays valid after the backend is moved.
    pub fn call_log(&self) -> Arc<CallLog> {
        self.log.clone()
    }

    /// Wraps this backend in a client, returning the call log alongside.
    pub fn into_client(self) -> (ObjectStoreClient, Arc<CallLog>) {
        let log = self.call_log();
        (ObjectStoreClient::new(self), log)
    }

    fn insert(
        mut self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<String>,
    ) -> Self {
        let object = MockObject { data, content_type };
        self.objects
            .insert((bucket.to_string(), key.to_string()), object);
        self
    }

    fn lookup(&self, bucket: &str, key: &str) -> Result<&MockObject> {
        if let Some(kind) = self.fail_all.or_else(|| self.failures.get(key).copied()) {
            return Err(Error::new(kind, format!("scripted failure for '{key}'")));
        }

        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .ok_or_else(|| Error::not_found(format!("object not found: {key}")))
    }

    fn body(&self, data: Bytes) -> StreamedBody {
        match self.shape {
            BodyShape::Bytes => StreamedBody::Bytes(data),
            BodyShape::Chunks(size) => {
                let chunks: Vec<Result<Bytes>> = data
                    .chunks(size.max(1))
                    .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
                    .collect();
                StreamedBody::from_stream(stream::iter(chunks))
            }
            BodyShape::Reader => StreamedBody::from_reader(Cursor::new(data.to_vec())),
        }
    }
}

#[async_trait::async_trait]
impl ObjectBackend for MockBackend {
    async fn get(&self, bucket: &str, key: &str) -> Result<ObjectResponse> {
        self.log
            .record(StoreCall::Get(bucket.to_string(), key.to_string()));

        let object = self.lookup(bucket, key)?;
        let mut response = ObjectResponse::new(self.body(object.data.clone()))
            .with_content_length(object.data.len() as u64);
        response.content_type = object.content_type.clone();
        Ok(response)
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectHead> {
        self.log
            .record(StoreCall::Head(bucket.to_string(), key.to_string()));

        let object = self.lookup(bucket, key)?;
        Ok(ObjectHead::new(key, object.data.len() as u64))
    }
}
