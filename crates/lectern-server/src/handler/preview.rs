//! Document previews with optional page limiting.

use axum::extract::{Query, State};
use lectern_asset::{AssetFormat, ObjectKey, limit_pages};
use lectern_object::ObjectStoreClient;

use super::request::ResolvedBucket;
use super::{
    AssetResponse, CachePolicy, Error, ErrorKind, PreviewRequest, Result, TRACING_TARGET_PREVIEW,
};
use crate::service::DefaultBuckets;

/// Serves a stored PDF, keeping only its first `pages` pages when asked.
///
/// The response is always labelled `application/pdf` and displayed inline
/// under the document's key. Without a positive page limit the stored bytes
/// are returned as they are; otherwise the PDF is rewritten on the blocking
/// thread pool.
#[tracing::instrument(skip_all)]
pub async fn preview_document(
    State(object_client): State<ObjectStoreClient>,
    State(buckets): State<DefaultBuckets>,
    Query(request): Query<PreviewRequest>,
) -> Result<AssetResponse> {
    let key = ObjectKey::new(request.key.as_str())?;
    let bucket = ResolvedBucket::resolve(request.bucket.as_deref(), &buckets.documents);
    let requested = request.requested_pages();

    tracing::debug!(
        target: TRACING_TARGET_PREVIEW,
        bucket = %bucket,
        key = %key,
        requested,
        "Previewing document"
    );

    let object = object_client
        .fetch_object(bucket.name(), key.as_str())
        .await
        .map_err(|err| bucket.error(err, &key))?;

    let source_size = object.len();
    let body = if requested > 0 {
        tokio::task::spawn_blocking(move || limit_pages(object.data, requested))
            .await
            .map_err(|err| {
                ErrorKind::InternalServerError
                    .with_message("Failed to produce the transformed asset")
                    .with_context(format!("page limiting task failed: {err}"))
                    .with_resource(key.to_string())
            })?
            .map_err(|err| Error::from(err).with_resource(key.to_string()))?
    } else {
        object.data
    };

    tracing::info!(
        target: TRACING_TARGET_PREVIEW,
        bucket = %bucket,
        key = %key,
        requested,
        source_size,
        size = body.len(),
        "Document preview served"
    );

    let response = AssetResponse::new(key, body, AssetFormat::Pdf.mime_type(), CachePolicy::Preview);
    Ok(response.with_inline_disposition())
}
