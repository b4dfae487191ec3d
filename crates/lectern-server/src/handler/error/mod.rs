//! [`Error`], [`ErrorKind`] and [`Result`].

mod asset_error;
mod http_error;
mod object_error;

pub use http_error::{Error, ErrorKind, Result};
