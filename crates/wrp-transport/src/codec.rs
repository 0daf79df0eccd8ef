//! Codec trait and the per-format implementations

use thiserror::Error;
use wrp_core::{Format, Message, WrpError};

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            CodecError::Io(err.into())
        } else if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Deserialization(err.to_string())
        } else {
            CodecError::Serialization(err.to_string())
        }
    }
}

/// Classify a serde_json failure raised while encoding
///
/// serde_json reports custom serialize errors as data errors, which the
/// `From` impl would treat as a decode failure.
fn encode_error(err: serde_json::Error) -> CodecError {
    if err.is_io() {
        CodecError::Io(err.into())
    } else {
        CodecError::Serialization(err.to_string())
    }
}

impl From<CodecError> for WrpError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Serialization(msg) => WrpError::SerializationError(msg),
            CodecError::Deserialization(msg) => WrpError::DeserializationError(msg),
            CodecError::InvalidFormat(msg) => WrpError::UnsupportedFormat(msg),
            CodecError::Io(err) => WrpError::Io(err),
        }
    }
}

/// Serializes messages in one wire format
pub trait Codec: Send + Sync {
    /// The format this codec reads and writes
    fn format(&self) -> Format;

    /// Append the encoded message to `output`
    fn encode_into(&self, output: &mut Vec<u8>, message: &Message) -> Result<(), CodecError>;

    /// Decode one message from `data`
    fn decode(&self, data: &[u8]) -> Result<Message, CodecError>;

    /// Encode a message to a new buffer
    fn encode(&self, message: &Message) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::new();
        self.encode_into(&mut output, message)?;
        Ok(output)
    }

    /// Get the content type for this codec
    fn content_type(&self) -> &'static str {
        self.format().content_type()
    }
}

/// The codec for a format
pub fn codec_for(format: Format) -> &'static dyn Codec {
    match format {
        Format::Json => &JsonCodec,
        Format::Bincode => &BincodeCodec,
    }
}

/// JSON codec implementation using serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode_into(&self, output: &mut Vec<u8>, message: &Message) -> Result<(), CodecError> {
        serde_json::to_writer(output, message).map_err(encode_error)
    }

    fn decode(&self, data: &[u8]) -> Result<Message, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Deserialization("empty input".to_string()));
        }
        serde_json::from_slice(data).map_err(Into::into)
    }
}

/// Binary codec implementation using bincode
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn format(&self) -> Format {
        Format::Bincode
    }

    fn encode_into(&self, output: &mut Vec<u8>, message: &Message) -> Result<(), CodecError> {
        bincode::serialize_into(output, message).map_err(|err| match *err {
            bincode::ErrorKind::Io(io) => CodecError::Io(io),
            other => CodecError::Serialization(other.to_string()),
        })
    }

    fn decode(&self, data: &[u8]) -> Result<Message, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Deserialization("empty input".to_string()));
        }
        bincode::deserialize(data).map_err(|err| CodecError::Deserialization(err.to_string()))
    }
}

#[cfg(test)]
#[path = "codec/codec_tests.rs"]
mod codec_tests;
