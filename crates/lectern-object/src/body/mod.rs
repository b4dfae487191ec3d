//! Response body shapes and their conversion into a contiguous buffer.
//!
//! Transports hand back bodies in one of three shapes: a payload that is
//! already fully buffered, a stream of chunks, or a push-style reader.
//! [`materialize`] accepts any of them and produces the same [`Bytes`] value
//! regardless of which shape it received or how the payload was chunked.

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::TRACING_TARGET_BODY;
use crate::types::{Error, Result};

/// Boxed push-style reader.
pub type BoxedReader = Pin<Box<dyn AsyncRead + Send>>;

/// A response payload in whatever shape the transport produced.
pub enum StreamedBody {
    /// The whole payload is already available as one buffer.
    Bytes(Bytes),
    /// The payload arrives as an ordered sequence of chunks.
    Chunks(BoxStream<'static, Result<Bytes>>),
    /// The payload is pushed through an async reader.
    Reader(BoxedReader),
    /// The transport returned no body at all.
    Empty,
}

impl StreamedBody {
    /// Wraps a chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self::Chunks(stream.boxed())
    }

    /// Wraps an async reader.
    pub fn from_reader(reader: impl AsyncRead + Send + 'static) -> Self {
        Self::Reader(Box::pin(reader))
    }

    /// Returns a short label for the body shape, used in logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Chunks(_) => "chunks",
            Self::Reader(_) => "reader",
            Self::Empty => "empty",
        }
    }

    /// Buffers this body. See [`materialize`].
    pub async fn materialize(self) -> Result<Option<Bytes>> {
        materialize(self).await
    }
}

impl From<Bytes> for StreamedBody {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for StreamedBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl fmt::Debug for StreamedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            other => f.debug_tuple(other.shape()).finish(),
        }
    }
}

/// Converts a [`StreamedBody`] into one contiguous buffer.
///
/// Shapes are tried in a fixed order: a fully buffered payload is returned as
/// is, chunked and reader bodies are accumulated in arrival order. An absent
/// or zero-length body yields `Ok(None)`; callers treat that as not found.
/// A chunk that fails mid-stream aborts with the chunk's error.
pub async fn materialize(body: StreamedBody) -> Result<Option<Bytes>> {
    let shape = body.shape();
    let data = match body {
        StreamedBody::Bytes(bytes) => bytes,
        StreamedBody::Chunks(stream) => collect_chunks(stream).await?,
        StreamedBody::Reader(reader) => {
            let stream = ReaderStream::new(reader).map_err(|err| {
                Error::transport(format!("failed to read response body: {err}")).with_source(err)
            });
            collect_chunks(stream.boxed()).await?
        }
        StreamedBody::Empty => return Ok(None),
    };

    tracing::trace!(
        target: TRACING_TARGET_BODY,
        shape,
        size = data.len(),
        "materialized response body"
    );

    Ok((!data.is_empty()).then_some(data))
}

async fn collect_chunks(mut stream: BoxStream<'static, Result<Bytes>>) -> Result<Bytes> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.try_next().await? {
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}
