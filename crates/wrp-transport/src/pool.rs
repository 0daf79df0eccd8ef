//! Pools of reusable encoders and decoders bound to one wire format

use crate::codec::{Codec, CodecError, codec_for};
use bytes::Bytes;
use parking_lot::Mutex;
use std::io::Write;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use wrp_core::{DEFAULT_POOL_SIZE, EndpointConfig, Format, Message};

/// Scratch buffers above this size are released instead of being kept for reuse
const MAX_RETAINED_BUFFER: usize = 64 * 1024;

/// An instance a pool can hand out and take back
pub trait Poolable: Sized {
    /// Create a fresh instance for the format
    fn create(format: Format) -> Self;

    /// Drop per-use state before the instance goes back into the pool
    fn reset(&mut self);
}

/// Encodes messages, reusing an internal scratch buffer between calls
pub struct Encoder {
    codec: &'static dyn Codec,
    buffer: Vec<u8>,
}

impl Encoder {
    /// Create an encoder for the format
    pub fn new(format: Format) -> Self {
        Self {
            codec: codec_for(format),
            buffer: Vec::new(),
        }
    }

    pub fn format(&self) -> Format {
        self.codec.format()
    }

    /// Encode the message and write it to `output`
    ///
    /// The message is fully serialized before anything is written, so a
    /// serialization failure leaves `output` untouched.
    pub fn encode<W: Write + ?Sized>(
        &mut self,
        output: &mut W,
        message: &Message,
    ) -> Result<(), CodecError> {
        self.buffer.clear();
        self.codec.encode_into(&mut self.buffer, message)?;
        output.write_all(&self.buffer)?;
        Ok(())
    }

    /// Replace the contents of `output` with the encoded message
    pub fn encode_bytes(&mut self, output: &mut Vec<u8>, message: &Message) -> Result<(), CodecError> {
        output.clear();
        self.codec.encode_into(output, message)
    }
}

impl Poolable for Encoder {
    fn create(format: Format) -> Self {
        Self::new(format)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        if self.buffer.capacity() > MAX_RETAINED_BUFFER {
            self.buffer = Vec::new();
        }
    }
}

/// Decodes one message at a time from the bytes it was last reset with
pub struct Decoder {
    codec: &'static dyn Codec,
    source: Bytes,
}

impl Decoder {
    /// Create a decoder for the format
    pub fn new(format: Format) -> Self {
        Self {
            codec: codec_for(format),
            source: Bytes::new(),
        }
    }

    pub fn format(&self) -> Format {
        self.codec.format()
    }

    /// Point the decoder at new input
    pub fn reset_bytes(&mut self, contents: Bytes) {
        self.source = contents;
    }

    /// Decode a message from the current input
    pub fn decode(&mut self) -> Result<Message, CodecError> {
        self.codec.decode(&self.source)
    }
}

impl Poolable for Decoder {
    fn create(format: Format) -> Self {
        Self::new(format)
    }

    fn reset(&mut self) {
        self.source = Bytes::new();
    }
}

/// A bounded set of idle instances for one format
///
/// Instances are handed out through [`PoolGuard`], which returns them when it
/// goes out of scope. An empty pool allocates a fresh instance rather than
/// blocking, and returns beyond capacity are dropped.
pub struct Pool<T: Poolable> {
    format: Format,
    capacity: usize,
    idle: Mutex<Vec<T>>,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool pre-filled to `capacity`; a zero capacity uses [`DEFAULT_POOL_SIZE`]
    pub fn new(capacity: usize, format: Format) -> Self {
        let capacity = if capacity < 1 {
            DEFAULT_POOL_SIZE
        } else {
            capacity
        };
        let idle = (0..capacity).map(|_| T::create(format)).collect();
        Self {
            format,
            capacity,
            idle: Mutex::new(idle),
        }
    }

    /// The format every instance in this pool is bound to
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of instances currently waiting in the pool
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Borrow an instance until the returned guard is dropped
    pub fn get(&self) -> PoolGuard<'_, T> {
        let reused = self.idle.lock().pop();
        let item = reused.unwrap_or_else(|| {
            tracing::trace!(format = %self.format, "codec pool empty, allocating instance");
            T::create(self.format)
        });
        PoolGuard {
            pool: self,
            item: ManuallyDrop::new(item),
        }
    }

    fn put(&self, mut item: T) {
        item.reset();
        let mut idle = self.idle.lock();
        if idle.len() < self.capacity {
            idle.push(item);
        } else {
            tracing::trace!(format = %self.format, "codec pool full, discarding instance");
        }
    }
}

/// An instance borrowed from a [`Pool`]; returned to the pool on drop
pub struct PoolGuard<'a, T: Poolable> {
    pool: &'a Pool<T>,
    item: ManuallyDrop<T>,
}

impl<T: Poolable> Deref for PoolGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Poolable> DerefMut for PoolGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Poolable> Drop for PoolGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: `item` is taken exactly once, here, and never touched again
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.put(item);
    }
}

/// A pool of encoders for one format
pub struct EncoderPool {
    pool: Pool<Encoder>,
}

impl EncoderPool {
    pub fn new(capacity: usize, format: Format) -> Self {
        Self {
            pool: Pool::new(capacity, format),
        }
    }

    /// Build the pool described by a configuration
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self::new(config.encoder_pool_size, config.format)
    }

    pub fn format(&self) -> Format {
        self.pool.format()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn idle(&self) -> usize {
        self.pool.idle()
    }

    /// Borrow an encoder until the returned guard is dropped
    pub fn get(&self) -> PoolGuard<'_, Encoder> {
        self.pool.get()
    }

    /// Encode the message to `output` using a pooled encoder
    pub fn encode<W: Write + ?Sized>(&self, output: &mut W, message: &Message) -> Result<(), CodecError> {
        self.get().encode(output, message)
    }

    /// Replace the contents of `output` with the encoded message using a pooled encoder
    pub fn encode_bytes(&self, output: &mut Vec<u8>, message: &Message) -> Result<(), CodecError> {
        self.get().encode_bytes(output, message)
    }
}

impl std::fmt::Debug for EncoderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderPool")
            .field("format", &self.format())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// A pool of decoders for one format
pub struct DecoderPool {
    pool: Pool<Decoder>,
}

impl DecoderPool {
    pub fn new(capacity: usize, format: Format) -> Self {
        Self {
            pool: Pool::new(capacity, format),
        }
    }

    /// Build the pool described by a configuration
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self::new(config.decoder_pool_size, config.format)
    }

    pub fn format(&self) -> Format {
        self.pool.format()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn idle(&self) -> usize {
        self.pool.idle()
    }

    /// Borrow a decoder until the returned guard is dropped
    pub fn get(&self) -> PoolGuard<'_, Decoder> {
        self.pool.get()
    }

    /// Decode one message from `contents` using a pooled decoder
    pub fn decode_bytes(&self, contents: impl Into<Bytes>) -> Result<Message, CodecError> {
        let mut decoder = self.get();
        decoder.reset_bytes(contents.into());
        decoder.decode()
    }
}

impl std::fmt::Debug for DecoderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderPool")
            .field("format", &self.format())
            .field("capacity", &self.capacity())
            .finish()
    }
}
