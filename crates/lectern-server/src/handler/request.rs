//! Request payloads accepted by the handlers.
//!
//! All requests deserialize from query strings as well as JSON, using
//! camelCase field names. A blank `bucket` counts as absent.

use std::fmt;

use lectern_asset::parse_page_request;
use lectern_object::{Error as ObjectError, ErrorKind as ObjectErrorKind};
use serde::{Deserialize, Serialize};

use super::{Error, ErrorKind};

/// Requested page limit, as delivered by the caller.
///
/// Query strings only ever carry text, JSON may carry a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRequest {
    Number(i64),
    Text(String),
}

impl PageRequest {
    /// Number of pages to keep; zero or less means no limit.
    pub fn requested(&self) -> i64 {
        match self {
            Self::Number(pages) => *pages,
            Self::Text(raw) => parse_page_request(raw),
        }
    }
}

/// Request for a (possibly page-limited) document preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Document key.
    #[serde(default)]
    pub key: String,
    /// Number of leading pages to keep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageRequest>,
    /// Bucket override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
}

impl PreviewRequest {
    /// Number of pages to keep; zero when no limit was asked for.
    pub fn requested_pages(&self) -> i64 {
        self.pages.as_ref().map_or(0, PageRequest::requested)
    }
}

/// Request for a stored asset by exact key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    /// Asset key.
    #[serde(default)]
    pub key: String,
    /// Bucket override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
}

/// Request for a thumbnail by key and/or original filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    /// Explicit thumbnail key, tried first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Original filename the thumbnail belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Bucket override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
}

/// Request to check whether an asset exists.
pub type ExistsRequest = AssetRequest;

/// Bucket a request is served from.
///
/// Remembers whether the caller named the bucket, so an unknown bucket can be
/// blamed on the request rather than on the service's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedBucket<'a> {
    name: &'a str,
    requested: bool,
}

impl<'a> ResolvedBucket<'a> {
    /// Picks the requested bucket, or `default` when none was given.
    pub fn resolve(requested: Option<&'a str>, default: &'a str) -> Self {
        match requested.map(str::trim).filter(|bucket| !bucket.is_empty()) {
            Some(name) => Self {
                name,
                requested: true,
            },
            None => Self {
                name: default,
                requested: false,
            },
        }
    }

    /// Bucket name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Converts a store error for `resource` fetched from this bucket.
    ///
    /// A bucket the caller named but the service does not serve is a bad
    /// request; an unserved default bucket stays a configuration error.
    pub fn error(&self, error: ObjectError, resource: impl ToString) -> Error<'static> {
        let error = match error.kind() {
            ObjectErrorKind::Configuration if self.requested => ErrorKind::BadRequest
                .with_message(format!("Bucket '{}' is not served", self.name))
                .with_context(error.to_string()),
            _ => Error::from(error),
        };
        error.with_resource(resource.to_string())
    }
}

impl fmt::Display for ResolvedBucket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
