//! Retrieval handlers.
//!
//! Each handler validates its request before touching the network, fetches
//! through the shared [`ObjectStoreClient`] and answers with bytes plus
//! content and caching headers, or with a structured [`Error`].
//!
//! Handlers use axum extractors so they can be mounted on any router, but
//! they are plain async functions and are equally callable directly:
//!
//! ```rust,no_run
//! use axum::extract::{Query, State};
//! use lectern_server::handler::{AssetRequest, fetch_asset};
//! use lectern_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::builder().build()?;
//! let state = ServiceState::from_config(&config)?;
//!
//! let request = AssetRequest {
//!     key: "cover.png".to_string(),
//!     bucket: None,
//! };
//! let response = fetch_asset(
//!     State(state.object_client.clone()),
//!     State(state.buckets.clone()),
//!     Query(request),
//! )
//! .await;
//! # Ok(())
//! # }
//! ```
//!
//! [`ObjectStoreClient`]: lectern_object::ObjectStoreClient

mod assets;
mod error;
mod exists;
mod preview;
mod request;
mod response;
mod thumbnails;

pub use crate::handler::assets::fetch_asset;
pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::exists::check_asset;
pub use crate::handler::preview::preview_document;
pub use crate::handler::request::{
    AssetRequest, ExistsRequest, PageRequest, PreviewRequest, ThumbnailRequest,
};
pub use crate::handler::response::{AssetResponse, CachePolicy, ErrorResponse, ExistsResponse};
pub use crate::handler::thumbnails::fetch_thumbnail;

/// Tracing target for document previews.
pub const TRACING_TARGET_PREVIEW: &str = "lectern_server::handler::preview";

/// Tracing target for direct asset fetches.
pub const TRACING_TARGET_ASSETS: &str = "lectern_server::handler::assets";

/// Tracing target for thumbnail lookups.
pub const TRACING_TARGET_THUMBNAILS: &str = "lectern_server::handler::thumbnails";

/// Tracing target for existence checks.
pub const TRACING_TARGET_EXISTS: &str = "lectern_server::handler::exists";

/// Tracing target for error responses.
pub const TRACING_TARGET_ERROR: &str = "lectern_server::handler::error";
