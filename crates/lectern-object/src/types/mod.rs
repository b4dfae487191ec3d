//! Error, retrieved object and head metadata types.

mod error;
mod object_head;
mod retrieved_object;

pub(crate) use error::from_object_store;
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use object_head::ObjectHead;
pub use retrieved_object::RetrievedObject;
