//! Global subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use parking_lot::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;
use wrp_core::{EndpointConfig, LogLevel, WrpResult};

/// Install a formatted subscriber filtered at `level`
///
/// The level can be changed later through [`ReloadHandle::global`]. If a
/// global subscriber is already installed this only updates the level.
pub fn init_logging(level: LogLevel) {
    static INSTALL: Mutex<()> = Mutex::new(());
    let _install = INSTALL.lock();

    let reload_handle = ReloadHandle::global();
    if reload_handle.is_initialized() {
        apply_level(reload_handle, level);
        return;
    }

    let (filter, handle) = reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));

    // Ignore the error if another subscriber was installed first
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        reload_handle.attach(handle, level);
    }
}

/// Reload an attached subscriber, logging instead of failing
///
/// Returns whether `level` is now in effect.
fn apply_level(reload_handle: &ReloadHandle, level: LogLevel) -> bool {
    match reload_handle.reload_level(level) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%level, error = %err, "keeping previous log level");
            false
        }
    }
}

/// Install the subscriber at the level named in the configuration
pub fn init_from_config(config: &EndpointConfig) -> WrpResult<()> {
    init_logging(config.log_level()?);
    Ok(())
}

#[cfg(test)]
#[path = "subscriber/subscriber_tests.rs"]
mod subscriber_tests;
