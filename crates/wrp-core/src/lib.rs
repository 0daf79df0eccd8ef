//! wrp-core - Message model and shared types for WRP endpoints
//!
//! This crate provides the foundational types used by the envelope layer:
//! - [`Message`] and [`MessageType`] for decoded WRP messages
//! - [`Format`] for wire format identity
//! - [`Context`] for cancellation and deadline propagation
//! - [`Span`] and [`Spanner`] for completion tracing
//! - [`WrpError`] for error handling
//! - [`EndpointConfig`] for endpoint configuration

mod config;
mod context;
mod error;
mod format;
mod message;
mod span;

pub use config::{DEFAULT_POOL_SIZE, EndpointConfig};
pub use context::{CancelHandle, Context};
pub use error::{WrpError, WrpResult};
pub use format::Format;
pub use message::{Message, MessageType};
pub use span::{Span, SpanTimer, Spanned, Spanner};

/// Log levels understood by the logging setup and configuration
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl std::str::FromStr for LogLevel {
    type Err = WrpError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(WrpError::ConfigError(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CancelHandle, Context, EndpointConfig, Format, LogLevel, Message, MessageType, Span,
        Spanned, Spanner, WrpError, WrpResult,
    };
}
