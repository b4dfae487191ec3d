use lectern_object::{ObjectStoreClient, Result};

use super::{DefaultBuckets, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Cloning is
/// cheap: the object store client is a shared handle and the bucket names
/// never change after startup.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub object_client: ObjectStoreClient,
    pub buckets: DefaultBuckets,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// # Errors
    ///
    /// Fails with a `Configuration` error if the object store client cannot
    /// be built from the configured credentials.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            object_client: config.connect()?,
            buckets: config.buckets(),
        })
    }

    /// Creates state around an existing client.
    pub fn new(object_client: ObjectStoreClient, buckets: DefaultBuckets) -> Self {
        Self {
            object_client,
            buckets,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(object_client: ObjectStoreClient);
impl_di!(buckets: DefaultBuckets);
