//! Response types returned by the handlers.

mod asset_response;
mod error_response;
mod exists_response;

pub use asset_response::{AssetResponse, CachePolicy};
pub use error_response::ErrorResponse;
pub use exists_response::ExistsResponse;
