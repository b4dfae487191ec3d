//! Binary asset response with content and caching headers.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// Caching policy attached to a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Page-limited or full document previews.
    Preview,
    /// Thumbnail images, immutable once stored.
    Thumbnail,
    /// Any other stored asset.
    Asset,
    /// Responses that must never be cached.
    NoStore,
}

impl CachePolicy {
    /// Returns the `Cache-Control` header value.
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::Preview => "private, max-age=300",
            Self::Thumbnail => "public, max-age=31536000, immutable",
            Self::Asset => "public, max-age=3600",
            Self::NoStore => "no-store",
        }
    }
}

/// Bytes of a retrieved (and possibly transformed) asset.
#[derive(Debug, Clone)]
#[must_use = "responses do nothing unless returned"]
pub struct AssetResponse {
    /// Object key the bytes were read from.
    pub key: String,
    /// Response body.
    pub body: Bytes,
    /// MIME type, declared by the store or inferred.
    pub content_type: String,
    /// Caching policy.
    pub cache: CachePolicy,
    /// Whether to send an inline `Content-Disposition` naming the key.
    pub inline: bool,
}

impl AssetResponse {
    /// Creates a response for `body` read from `key`.
    pub fn new(
        key: impl Into<String>,
        body: Bytes,
        content_type: impl Into<String>,
        cache: CachePolicy,
    ) -> Self {
        Self {
            key: key.into(),
            body,
            content_type: content_type.into(),
            cache,
            inline: false,
        }
    }

    /// Marks the response as displayed inline under the key's name.
    pub fn with_inline_disposition(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Builds the response headers.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&self.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
        );

        if self.inline {
            let disposition = format!("inline; filename=\"{}\"", self.key.replace('"', ""));
            headers.insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("inline")),
            );
        }

        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(self.cache.header_value()),
        );
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from(self.body.len() as u64),
        );
        headers
    }
}

impl IntoResponse for AssetResponse {
    fn into_response(self) -> Response {
        let headers = self.headers();
        (StatusCode::OK, headers, self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_headers() {
        let response = AssetResponse::new(
            "lesson1.pdf",
            Bytes::from_static(b"%PDF-1.7"),
            "application/pdf",
            CachePolicy::Preview,
        )
        .with_inline_disposition();

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"lesson1.pdf\""
        );
        assert_eq!(headers[header::CACHE_CONTROL], "private, max-age=300");
        assert_eq!(headers[header::CONTENT_LENGTH], "8");
    }

    #[test]
    fn thumbnail_headers_have_no_disposition() {
        let response = AssetResponse::new(
            "cover.png",
            Bytes::from_static(b"png"),
            "image/png",
            CachePolicy::Thumbnail,
        );

        let headers = response.headers();
        assert!(headers.get(header::CONTENT_DISPOSITION).is_none());
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
    }

    #[test]
    fn invalid_content_type_falls_back() {
        let response = AssetResponse::new(
            "notes",
            Bytes::new(),
            "text/plain\n",
            CachePolicy::Asset,
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
    }

    #[test]
    fn into_response_is_ok() {
        let response =
            AssetResponse::new("a.png", Bytes::from_static(b"x"), "image/png", CachePolicy::Asset)
                .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
