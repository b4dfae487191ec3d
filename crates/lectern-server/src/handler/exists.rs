//! Existence checks.

use axum::extract::{Query, State};
use lectern_asset::ObjectKey;
use lectern_object::ObjectStoreClient;

use super::request::ResolvedBucket;
use super::{ExistsRequest, ExistsResponse, Result, TRACING_TARGET_EXISTS};
use crate::service::DefaultBuckets;

/// Reports whether an asset exists, without transferring its body.
#[tracing::instrument(skip_all)]
pub async fn check_asset(
    State(object_client): State<ObjectStoreClient>,
    State(buckets): State<DefaultBuckets>,
    Query(request): Query<ExistsRequest>,
) -> Result<ExistsResponse> {
    let key = ObjectKey::new(request.key.as_str())?;
    let bucket = ResolvedBucket::resolve(request.bucket.as_deref(), &buckets.assets);

    let exists = object_client
        .exists(bucket.name(), key.as_str())
        .await
        .map_err(|err| bucket.error(err, &key))?;

    tracing::debug!(
        target: TRACING_TARGET_EXISTS,
        bucket = %bucket,
        key = %key,
        exists,
        "Existence checked"
    );

    Ok(ExistsResponse::new(key, exists))
}
