//! Thumbnail lookups over a fallback list of candidate keys.

use axum::extract::{Query, State};
use lectern_asset::{CandidateSet, infer_content_type};
use lectern_object::ObjectStoreClient;

use super::request::ResolvedBucket;
use super::{
    AssetResponse, CachePolicy, ErrorKind, Result, TRACING_TARGET_THUMBNAILS,
    ThumbnailRequest,
};
use crate::service::DefaultBuckets;

/// Serves the first thumbnail found among the request's candidate keys.
///
/// Candidates are tried one at a time in order. A missing candidate moves on
/// to the next one; any other failure ends the search.
#[tracing::instrument(skip_all)]
pub async fn fetch_thumbnail(
    State(object_client): State<ObjectStoreClient>,
    State(buckets): State<DefaultBuckets>,
    Query(request): Query<ThumbnailRequest>,
) -> Result<AssetResponse> {
    let candidates = CandidateSet::expand(request.key.as_deref(), request.file.as_deref())?;
    let bucket = ResolvedBucket::resolve(request.bucket.as_deref(), &buckets.thumbnails);

    tracing::debug!(
        target: TRACING_TARGET_THUMBNAILS,
        bucket = %bucket,
        candidates = ?candidates.to_strings(),
        "Resolving thumbnail"
    );

    for candidate in candidates.iter() {
        match object_client.fetch_object(bucket.name(), candidate.as_str()).await {
            Ok(object) => {
                let content_type = object
                    .content_type
                    .unwrap_or_else(|| infer_content_type(candidate.as_str()).to_string());

                tracing::info!(
                    target: TRACING_TARGET_THUMBNAILS,
                    bucket = %bucket,
                    key = %candidate,
                    content_type = %content_type,
                    size = object.data.len(),
                    "Thumbnail served"
                );

                return Ok(AssetResponse::new(
                    candidate.clone(),
                    object.data,
                    content_type,
                    CachePolicy::Thumbnail,
                ));
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(
                    target: TRACING_TARGET_THUMBNAILS,
                    bucket = %bucket,
                    key = %candidate,
                    "Thumbnail candidate missing"
                );
            }
            Err(err) => {
                return Err(bucket.error(err, candidate));
            }
        }
    }

    Err(ErrorKind::NotFound
        .with_message("No thumbnail found")
        .with_context(format!(
            "none of {} candidates present in bucket '{bucket}'",
            candidates.len()
        )))
}
