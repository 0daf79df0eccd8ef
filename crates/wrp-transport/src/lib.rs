//! wrp-transport - Codec pools, envelopes and the decode pipeline
//!
//! This crate provides:
//! - [`Codec`] trait with [`JsonCodec`] and [`BincodeCodec`] implementations
//! - [`EncoderPool`] and [`DecoderPool`] for reusing codec instances
//! - [`Note`], [`Request`] and [`Response`] envelopes that cache the bytes a
//!   message was decoded from and reuse them when re-encoding to that format
//! - decode functions that turn byte sources into requests and responses
//! - the [`Service`] seam for handling requests

mod codec;
mod decode;
mod envelope;
mod pool;
mod service;

pub use codec::{BincodeCodec, Codec, CodecError, JsonCodec, codec_for};
pub use decode::{
    decode_request, decode_request_async, decode_request_bytes, decode_response,
    decode_response_async, decode_response_bytes,
};
pub use envelope::{Envelope, Note, Request, Response, wrap_as_request, wrap_as_response};
pub use pool::{Decoder, DecoderPool, Encoder, EncoderPool, Pool, PoolGuard, Poolable};
pub use service::{Service, ServiceFn, Traced, serve_bytes, service_fn};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Codec, CodecError, DecoderPool, EncoderPool, Envelope, Note, Request, Response, Service,
        decode_request, decode_request_bytes, decode_response, decode_response_bytes,
        wrap_as_request, wrap_as_response,
    };
}
