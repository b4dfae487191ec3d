//! Direct asset fetches by exact key.

use axum::extract::{Query, State};
use lectern_asset::{ObjectKey, infer_content_type};
use lectern_object::ObjectStoreClient;

use super::request::ResolvedBucket;
use super::{AssetRequest, AssetResponse, CachePolicy, Result, TRACING_TARGET_ASSETS};
use crate::service::DefaultBuckets;

/// Serves the object stored under `key`.
///
/// The content type is the one declared by the store, or inferred from the
/// key's extension when the store declares none.
#[tracing::instrument(skip_all)]
pub async fn fetch_asset(
    State(object_client): State<ObjectStoreClient>,
    State(buckets): State<DefaultBuckets>,
    Query(request): Query<AssetRequest>,
) -> Result<AssetResponse> {
    let key = ObjectKey::new(request.key.as_str())?;
    let bucket = ResolvedBucket::resolve(request.bucket.as_deref(), &buckets.assets);

    let object = object_client
        .fetch_object(bucket.name(), key.as_str())
        .await
        .map_err(|err| bucket.error(err, &key))?;

    let content_type = object
        .content_type
        .unwrap_or_else(|| infer_content_type(key.as_str()).to_string());

    tracing::info!(
        target: TRACING_TARGET_ASSETS,
        bucket = %bucket,
        key = %key,
        content_type = %content_type,
        size = object.data.len(),
        "Asset served"
    );

    Ok(AssetResponse::new(key, object.data, content_type, CachePolicy::Asset))
}
