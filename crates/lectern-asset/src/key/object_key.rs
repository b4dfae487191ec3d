//! Validated object key.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A flat object key that is safe to send to the store.
///
/// Keys are flat names within a bucket: they may not contain `/` or `\`,
/// and may not contain `..` anywhere. Validation happens on construction, so
/// holding an `ObjectKey` means no network call will ever see an unsafe key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validates `key` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the key is empty or fails
    /// [`is_safe`](Self::is_safe).
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::Validation("object key is required".to_string()));
        }
        if !Self::is_safe(&key) {
            return Err(Error::Validation(format!(
                "object key '{key}' contains a path separator or parent traversal"
            )));
        }
        Ok(Self(key))
    }

    /// Whether `key` is free of path separators and parent traversal.
    pub fn is_safe(key: &str) -> bool {
        !key.contains(['/', '\\']) && !key.contains("..")
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectKey {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

impl PartialEq<str> for ObjectKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ObjectKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_flat_keys() {
        for key in ["worksheet.pdf", "cover", "lesson 1.png", "a.b.c", ".hidden"] {
            let parsed = ObjectKey::new(key).unwrap();
            assert_eq!(parsed.as_str(), key);
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(ObjectKey::new("").unwrap_err().is_validation());
    }

    #[test]
    fn rejects_unsafe_keys() {
        for key in [
            "a/b.pdf",
            "/etc/passwd",
            "a\\b.pdf",
            "..",
            "..secret",
            "lesson..pdf",
            "../lesson.pdf",
        ] {
            assert!(ObjectKey::new(key).is_err(), "{key} should be rejected");
            assert!(!ObjectKey::is_safe(key));
        }
    }

    #[test]
    fn deserialize_validates() {
        let key: ObjectKey = serde_json::from_str(r#""cover.png""#).unwrap();
        assert_eq!(key, "cover.png");
        assert!(serde_json::from_str::<ObjectKey>(r#""../cover.png""#).is_err());
    }

    #[test]
    fn from_str_round_trip() {
        let key: ObjectKey = "notes.webp".parse().unwrap();
        assert_eq!(key.to_string(), "notes.webp");
        assert_eq!(String::from(key), "notes.webp");
    }
}
