//! wrp-logging - Tracing subscriber setup for WRP endpoints
//!
//! This crate provides:
//! - [`init_logging`] to install a formatted subscriber at a given level
//! - [`init_from_config`] to do the same from an [`wrp_core::EndpointConfig`]
//! - [`ReloadHandle`] for changing the level at runtime

mod reload;
mod subscriber;

pub use reload::ReloadHandle;
pub use subscriber::{init_from_config, init_logging};
pub use wrp_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_from_config, init_logging};
}
