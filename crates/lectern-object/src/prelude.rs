//! Convenience re-exports.

pub use crate::body::{StreamedBody, materialize};
pub use crate::client::{ObjectBackend, ObjectResponse, ObjectStoreBackend, ObjectStoreClient};
pub use crate::providers::{Client, S3Credentials, S3Provider};
pub use crate::types::{Error, ErrorKind, ObjectHead, RetrievedObject};
