#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client operations.
pub const TRACING_TARGET_CLIENT: &str = "lectern_object::client";

/// Tracing target for body materialization.
pub const TRACING_TARGET_BODY: &str = "lectern_object::body";

/// Response body shapes and materialization.
pub mod body;
pub mod client;
/// Provider trait and object storage provider factories.
pub mod providers;
/// Error, retrieved object and head metadata types.
pub mod types;

#[doc(hidden)]
pub mod prelude;

pub use crate::body::{StreamedBody, materialize};
pub use crate::client::{ObjectBackend, ObjectResponse, ObjectStoreBackend, ObjectStoreClient};
pub use crate::types::{Error, ErrorKind, ObjectHead, Result, RetrievedObject};
