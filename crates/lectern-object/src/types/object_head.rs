//! Metadata returned by a head-only probe.

use jiff::Timestamp;
use object_store::ObjectMeta;

/// Object metadata obtained without transferring the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHead {
    /// Object key as reported by the store.
    pub key: String,
    /// Size of the object in bytes.
    pub size: u64,
    /// Entity tag, if the store provides one.
    pub e_tag: Option<String>,
    /// Last modification time, if representable.
    pub last_modified: Option<Timestamp>,
}

impl ObjectHead {
    /// Creates head metadata for a key of the given size.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            e_tag: None,
            last_modified: None,
        }
    }
}

impl From<ObjectMeta> for ObjectHead {
    fn from(meta: ObjectMeta) -> Self {
        let last_modified = Timestamp::new(
            meta.last_modified.timestamp(),
            meta.last_modified.timestamp_subsec_nanos() as i32,
        )
        .ok();

        Self {
            key: meta.location.to_string(),
            size: meta.size,
            e_tag: meta.e_tag,
            last_modified,
        }
    }
}
