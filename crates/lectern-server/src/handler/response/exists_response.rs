use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::CachePolicy;

/// Result of an existence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "responses do nothing unless returned"]
pub struct ExistsResponse {
    /// The checked key.
    pub key: String,
    /// Whether the object is present.
    pub exists: bool,
}

impl ExistsResponse {
    /// Creates a new existence result.
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

impl IntoResponse for ExistsResponse {
    fn into_response(self) -> Response {
        let cache = [(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CachePolicy::NoStore.header_value()),
        )];
        (StatusCode::OK, cache, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_key_and_flag() {
        let json = serde_json::to_value(ExistsResponse::new("cover.png", true)).unwrap();
        assert_eq!(json, serde_json::json!({ "key": "cover.png", "exists": true }));
    }

    #[test]
    fn is_never_cached() {
        let response = ExistsResponse::new("cover.png", false).into_response();
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
