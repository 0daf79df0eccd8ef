//! # wrp-endpoint
//!
//! Envelopes for carrying WRP messages through a request/response pipeline.
//!
//! A decoded message keeps the bytes it arrived as, tagged with their wire
//! format. Re-encoding to that same format copies the cached bytes instead of
//! serializing again, which makes pass-through relays cheap; any other format
//! is encoded fresh through a pooled encoder. Requests and responses are
//! immutable and can be shared freely across threads.
//!
//! ## Relaying a Request
//!
//! ```ignore
//! use wrp_endpoint::prelude::*;
//!
//! let config = EndpointConfig::from_json(br#"{"format": "json"}"#)?;
//! wrp_endpoint::init_from_config(&config)?;
//!
//! let decoders = DecoderPool::from_config(&config);
//! let encoders = EncoderPool::from_config(&config);
//!
//! let (ctx, _cancel) = Context::background().with_timeout(Duration::from_secs(5));
//! let request = decode_request_bytes(Some(ctx), inbound_bytes, &decoders)?;
//! tracing::info!(destination = request.destination(), "relaying");
//!
//! // Same format as the input: the original bytes are written back verbatim
//! let outbound = request.encode_bytes(&encoders)?;
//! ```
//!
//! ## Serving Requests
//!
//! ```ignore
//! use wrp_endpoint::prelude::*;
//!
//! let echo = Traced::new("echo", service_fn(|request: &Request| {
//!     let reply = request.message().response_to(request.message().payload.clone());
//!     Ok(wrap_as_response(reply))
//! }));
//!
//! let reply_bytes = serve_bytes(&echo, None, inbound_bytes, &decoders, &encoders)?;
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`wrp_core`] - Messages, formats, contexts, spans, errors and configuration
//! - [`wrp_transport`] - Codecs, codec pools, envelopes and the decode pipeline
//! - [`wrp_logging`] - Tracing subscriber setup

// Re-export core types
pub use wrp_core::{
    CancelHandle, Context, DEFAULT_POOL_SIZE, EndpointConfig, Format, LogLevel, Message,
    MessageType, Span, SpanTimer, Spanned, Spanner, WrpError, WrpResult,
};

// Re-export transport types
pub use wrp_transport::{
    BincodeCodec, Codec, CodecError, Decoder, DecoderPool, Encoder, EncoderPool, Envelope,
    JsonCodec, Note, Request, Response, Service, ServiceFn, Traced, codec_for, decode_request,
    decode_request_async, decode_request_bytes, decode_response, decode_response_async,
    decode_response_bytes, serve_bytes, service_fn, wrap_as_request, wrap_as_response,
};

// Re-export logging setup
pub use wrp_logging::{ReloadHandle, init_from_config, init_logging};

// Re-export common dependencies that service authors need
pub use bytes;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use wrp_endpoint::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Envelopes: `Note`, `Request`, `Response`, `Envelope`
/// - Pools: `EncoderPool`, `DecoderPool`
/// - Decoding and wrapping functions
/// - Services: `Service`, `Traced`, `service_fn`, `serve_bytes`
/// - Core types: `Context`, `EndpointConfig`, `Format`, `Message`, `WrpError`
pub mod prelude {
    pub use crate::{
        Context, DecoderPool, EncoderPool, EndpointConfig, Envelope, Format, Message,
        MessageType, Note, Request, Response, Service, Span, Spanned, Traced, WrpError,
        WrpResult, decode_request, decode_request_bytes, decode_response, decode_response_bytes,
        serve_bytes, service_fn, wrap_as_request, wrap_as_response,
    };
    pub use std::time::Duration;
}

#[cfg(test)]
mod lib_tests;
