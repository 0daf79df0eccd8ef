//! Turning serialized bytes into requests and responses

use crate::codec::CodecError;
use crate::envelope::{Note, Request, Response};
use crate::pool::DecoderPool;
use bytes::Bytes;
use std::io::Read;
use tokio::io::{AsyncRead, AsyncReadExt};
use wrp_core::Context;

/// Decode a note from `contents`, keeping `contents` as its cached encoding
fn decode_note(contents: Bytes, pool: &DecoderPool) -> Result<Note, CodecError> {
    let mut decoder = pool.get();
    decoder.reset_bytes(contents.clone());
    let message = decoder.decode().inspect_err(|err| {
        tracing::debug!(format = %pool.format(), len = contents.len(), error = %err, "failed to decode WRP message");
    })?;
    Ok(Note::decoded(message, contents, pool.format()))
}

/// Read all of `source` and decode it as a request
pub fn decode_request<R: Read + ?Sized>(
    ctx: Option<Context>,
    source: &mut R,
    pool: &DecoderPool,
) -> Result<Request, CodecError> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;
    decode_request_bytes(ctx, contents, pool)
}

/// Decode a request from `contents`
///
/// The request takes ownership of `contents` and reuses it when encoded back
/// to the pool's format.
pub fn decode_request_bytes(
    ctx: Option<Context>,
    contents: impl Into<Bytes>,
    pool: &DecoderPool,
) -> Result<Request, CodecError> {
    let note = decode_note(contents.into(), pool)?;
    Ok(Request::from_note(ctx, note))
}

/// Read all of `source` and decode it as a response
pub fn decode_response<R: Read + ?Sized>(source: &mut R, pool: &DecoderPool) -> Result<Response, CodecError> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;
    decode_response_bytes(contents, pool)
}

/// Decode a response with no spans from `contents`
pub fn decode_response_bytes(contents: impl Into<Bytes>, pool: &DecoderPool) -> Result<Response, CodecError> {
    let note = decode_note(contents.into(), pool)?;
    Ok(Response::from_note(note))
}

/// Read an async source to its end and decode it as a request
pub async fn decode_request_async<R: AsyncRead + Unpin + ?Sized>(
    ctx: Option<Context>,
    source: &mut R,
    pool: &DecoderPool,
) -> Result<Request, CodecError> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents).await?;
    decode_request_bytes(ctx, contents, pool)
}

/// Read an async source to its end and decode it as a response
pub async fn decode_response_async<R: AsyncRead + Unpin + ?Sized>(
    source: &mut R,
    pool: &DecoderPool,
) -> Result<Response, CodecError> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents).await?;
    decode_response_bytes(contents, pool)
}
