//! Application state and configuration.

mod config;
mod state;

pub use crate::service::config::{DefaultBuckets, ServiceConfig, ServiceConfigBuilder};
pub use crate::service::state::ServiceState;
