//! Client trait for creating authenticated store connections.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::types::Error;

/// Factory for an authenticated connection to an object store provider.
///
/// Implementations validate credentials up front: a missing credential must
/// fail here, before any request is attempted.
pub trait Client: Sized + Send + Sync + 'static {
    /// Strongly-typed credentials for this provider.
    type Credentials: DeserializeOwned + Send + Sync;

    /// Unique identifier (e.g. "s3").
    const ID: &str;

    /// Create a connected client instance.
    fn connect(creds: &Self::Credentials) -> impl Future<Output = Result<Self, Error>> + Send;
}
