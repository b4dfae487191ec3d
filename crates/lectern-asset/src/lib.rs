#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for PDF transforms.
pub const TRACING_TARGET_PDF: &str = "lectern_asset::pdf";

mod error;

/// Object key validation and candidate expansion.
pub mod key;
pub mod mime;
/// PDF page counting and page limiting.
pub mod pdf;

pub use crate::error::{Error, Result};
pub use crate::key::{CandidateSet, ObjectKey};
pub use crate::mime::{AssetFormat, infer_content_type};
pub use crate::pdf::{limit_pages, page_count, parse_page_request};
