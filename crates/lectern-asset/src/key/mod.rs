//! Object key validation and candidate expansion.
//!
//! [`ObjectKey`] is the strict form used for direct fetches: one key, checked
//! for path safety. [`CandidateSet`] is the expansion form used for image
//! lookups, where the exact stored extension is not known in advance.

mod candidate_set;
mod object_key;

pub use candidate_set::{CandidateSet, IMAGE_EXTENSIONS, strip_extension};
pub use object_key::ObjectKey;
