#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;
pub mod pdf;

pub use mock::{BodyShape, CallLog, MockBackend, StoreCall};
