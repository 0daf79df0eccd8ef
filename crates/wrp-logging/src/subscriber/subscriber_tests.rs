#![allow(non_snake_case)]

use super::*;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use wrp_core::WrpError;

#[test]
fn init_logging___installs_reloadable_subscriber() {
    init_logging(LogLevel::Info);
    init_logging(LogLevel::Debug);

    assert!(ReloadHandle::global().is_initialized());
    assert!(ReloadHandle::global().reload_level(LogLevel::Warn).is_ok());
}

#[test]
fn apply_level___subscriber_gone___reports_not_applied() {
    let (layer, filter) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
    let handle = ReloadHandle::new();
    handle.attach(filter, LogLevel::Info);
    drop(layer);

    assert!(!apply_level(&handle, LogLevel::Debug));
    assert_eq!(handle.level(), Some(LogLevel::Info));
}

#[test]
fn apply_level___live_subscriber___records_level() {
    let (_layer, filter) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
    let handle = ReloadHandle::new();
    handle.attach(filter, LogLevel::Info);

    assert!(apply_level(&handle, LogLevel::Error));
    assert_eq!(handle.level(), Some(LogLevel::Error));
}

#[test]
fn init_from_config___invalid_level___returns_config_error() {
    let config = EndpointConfig {
        log_level: "chatty".to_string(),
        ..EndpointConfig::default()
    };

    let result = init_from_config(&config);

    assert!(matches!(result, Err(WrpError::ConfigError(_))));
}

#[test]
fn init_from_config___valid_level___succeeds() {
    let result = init_from_config(&EndpointConfig::default());

    assert!(result.is_ok());
}
