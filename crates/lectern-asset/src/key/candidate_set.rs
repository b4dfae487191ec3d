//! Ordered fallback keys for image lookups.

use super::ObjectKey;
use crate::{Error, Result};

/// Image extensions tried after the explicit key, in preference order.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Strips the last `.<extension>` suffix from `name`.
///
/// A trailing dot with nothing after it is not an extension and is kept.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    }
}

/// Ordered, deduplicated list of keys to try one after another.
///
/// Built from an explicit key and/or the original filename of the asset the
/// image belongs to. The explicit key always comes first, followed by the
/// base name with each of [`IMAGE_EXTENSIONS`] appended. A key proposed twice
/// keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet(Vec<ObjectKey>);

impl CandidateSet {
    /// Expands `key` and `file` into candidate keys.
    ///
    /// The base name is taken from `file` when supplied, otherwise from
    /// `key`. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when neither reference is supplied, or
    /// when the explicit `key` is unsafe. An unsafe `file` contributes no
    /// variants, and variants that turn out unsafe are skipped; either way
    /// the set may come back empty, which callers treat as not found.
    pub fn expand(key: Option<&str>, file: Option<&str>) -> Result<Self> {
        let key = non_blank(key);
        let file = non_blank(file);

        let base = match (key, file) {
            (None, None) => {
                return Err(Error::Validation("no key or file reference supplied".into()));
            }
            (_, Some(file)) => file,
            (Some(key), None) => key,
        };

        let mut set = Self::default();
        if let Some(key) = key {
            set.push(ObjectKey::new(key)?);
        }

        if !ObjectKey::is_safe(base) {
            return Ok(set);
        }

        let base = strip_extension(base);
        if !base.is_empty() {
            for extension in IMAGE_EXTENSIONS {
                if let Ok(candidate) = ObjectKey::new(format!("{base}.{extension}")) {
                    set.push(candidate);
                }
            }
        }

        Ok(set)
    }

    /// Appends `key` unless it is already present.
    pub fn push(&mut self, key: ObjectKey) {
        if !self.0.contains(&key) {
            self.0.push(key);
        }
    }

    /// Iterates candidates in trial order.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectKey> {
        self.0.iter()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no candidate survived filtering.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Candidates as plain strings, in trial order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for CandidateSet {
    type IntoIter = std::vec::IntoIter<ObjectKey>;
    type Item = ObjectKey;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type IntoIter = std::slice::Iter<'a, ObjectKey>;
    type Item = &'a ObjectKey;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
