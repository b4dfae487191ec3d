//! Content-type inference from object key extensions.

use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Fallback content-type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Asset formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AssetFormat {
    Jpeg,
    Png,
    Webp,
    Pdf,
}

impl AssetFormat {
    /// Returns the MIME type of this format.
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Pdf => "application/pdf",
        }
    }

    /// Extensions that map to this format, without the leading dot.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Webp => &["webp"],
            Self::Pdf => &["pdf"],
        }
    }

    /// Detects the format from the key's extension, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        let (_, extension) = key.rsplit_once('.')?;
        Self::iter().find(|format| {
            format
                .extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }
}

/// Infers a MIME type for `key` from its extension.
///
/// Only consulted when the store did not declare a content-type.
pub fn infer_content_type(key: &str) -> &'static str {
    AssetFormat::from_key(key).map_or(OCTET_STREAM, AssetFormat::mime_type)
}
