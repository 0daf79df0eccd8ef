//! Endpoint configuration types

use crate::{Format, LogLevel, WrpError, WrpResult};
use serde::{Deserialize, Serialize};

/// Pool capacity used when none is configured
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Configuration for an endpoint's codec pools and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Wire format used for encoding and decoding
    #[serde(default)]
    pub format: Format,

    /// Number of pooled encoders kept ready
    #[serde(default = "default_pool_size")]
    pub encoder_pool_size: usize,

    /// Number of pooled decoders kept ready
    #[serde(default = "default_pool_size")]
    pub decoder_pool_size: usize,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            encoder_pool_size: default_pool_size(),
            decoder_pool_size: default_pool_size(),
            log_level: default_log_level(),
        }
    }
}

impl EndpointConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    ///
    /// Empty input yields the defaults.
    pub fn from_json(bytes: &[u8]) -> WrpResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the wire format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set both pool sizes
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.encoder_pool_size = size;
        self.decoder_pool_size = size;
        self
    }

    /// Reject settings that cannot produce a working endpoint
    pub fn validate(&self) -> WrpResult<()> {
        if self.encoder_pool_size == 0 {
            return Err(WrpError::ConfigError(
                "encoder_pool_size must be at least 1".to_string(),
            ));
        }
        if self.decoder_pool_size == 0 {
            return Err(WrpError::ConfigError(
                "decoder_pool_size must be at least 1".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    /// The configured log level
    pub fn log_level(&self) -> WrpResult<LogLevel> {
        self.log_level.parse()
    }
}
