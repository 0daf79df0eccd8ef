//! Envelope types that carry a decoded WRP message through a request/response flow
//!
//! Every type here is immutable once built. Operations that look like updates
//! ([`Request::with_context`], [`Response::add_spans`]) return new values, so
//! envelopes can be shared across threads without locking.

use crate::codec::CodecError;
use crate::pool::EncoderPool;
use bytes::Bytes;
use std::io::Write;
use std::sync::Arc;
use wrp_core::{Context, Format, Message, Span, Spanned, WrpError, WrpResult};

/// A decoded message together with the bytes it was decoded from
///
/// The cached bytes are only reused when encoding to the exact format they were
/// produced in; any other format is serialized fresh from the message.
#[derive(Debug, Clone)]
pub struct Note {
    destination: String,
    transaction_id: String,
    message: Arc<Message>,
    contents: Bytes,
    format: Option<Format>,
}

impl Note {
    /// Wrap a message that has no cached encoding
    pub fn new(message: impl Into<Arc<Message>>) -> Self {
        let message = message.into();
        Self {
            destination: message.destination.clone(),
            transaction_id: message.transaction_uuid.clone(),
            message,
            contents: Bytes::new(),
            format: None,
        }
    }

    /// Wrap a message decoded from `contents` in `format`
    pub(crate) fn decoded(message: Message, contents: Bytes, format: Format) -> Self {
        Self {
            contents,
            format: Some(format),
            ..Self::new(message)
        }
    }

    /// The destination captured when this note was built
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The transaction UUID captured when this note was built; may be empty
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The decoded message
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The format the cached bytes were produced in, if any
    pub fn raw_format(&self) -> Option<Format> {
        self.format
    }

    fn cached_for(&self, format: Format) -> Option<&Bytes> {
        (self.format == Some(format) && !self.contents.is_empty()).then_some(&self.contents)
    }

    /// Write the message in the pool's format
    pub fn encode<W: Write + ?Sized>(&self, output: &mut W, pool: &EncoderPool) -> Result<(), CodecError> {
        if let Some(contents) = self.cached_for(pool.format()) {
            tracing::trace!(format = %pool.format(), len = contents.len(), "reusing cached encoding");
            output.write_all(contents)?;
            return Ok(());
        }
        pool.encode(output, &self.message)
    }

    /// Encode the message in the pool's format to a buffer the caller owns
    pub fn encode_bytes(&self, pool: &EncoderPool) -> Result<Vec<u8>, CodecError> {
        if let Some(contents) = self.cached_for(pool.format()) {
            tracing::trace!(format = %pool.format(), len = contents.len(), "reusing cached encoding");
            return Ok(contents.to_vec());
        }
        let mut output = Vec::new();
        pool.encode_bytes(&mut output, &self.message)?;
        Ok(output)
    }
}

/// Implemented by every type that carries a [`Note`]
pub trait Envelope {
    /// The underlying note
    fn note(&self) -> &Note;

    fn destination(&self) -> &str {
        self.note().destination()
    }

    fn transaction_id(&self) -> &str {
        self.note().transaction_id()
    }

    fn message(&self) -> &Message {
        self.note().message()
    }

    fn encode<W: Write + ?Sized>(&self, output: &mut W, pool: &EncoderPool) -> Result<(), CodecError>
    where
        Self: Sized,
    {
        self.note().encode(output, pool)
    }

    fn encode_bytes(&self, pool: &EncoderPool) -> Result<Vec<u8>, CodecError> {
        self.note().encode_bytes(pool)
    }
}

impl Envelope for Note {
    fn note(&self) -> &Note {
        self
    }
}

/// A WRP request with the context downstream handlers should honor
#[derive(Clone)]
pub struct Request {
    inner: Arc<RequestInner>,
}

#[derive(Clone)]
struct RequestInner {
    note: Note,
    ctx: Option<Context>,
}

impl Request {
    pub(crate) fn from_note(ctx: Option<Context>, note: Note) -> Self {
        Self {
            inner: Arc::new(RequestInner { note, ctx }),
        }
    }

    /// The request's context, or [`Context::background`] when none was attached
    pub fn context(&self) -> Context {
        self.inner.ctx.clone().unwrap_or_else(Context::background)
    }

    /// A copy of this request carrying `ctx`; this request is unchanged
    pub fn with_context(&self, ctx: Context) -> Request {
        let mut inner = (*self.inner).clone();
        inner.ctx = Some(ctx);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Like [`Request::with_context`], but for callers holding an optional context
    ///
    /// An absent context is a caller bug and is rejected rather than defaulted.
    pub fn try_with_context(&self, ctx: Option<Context>) -> WrpResult<Request> {
        ctx.map(|ctx| self.with_context(ctx))
            .ok_or_else(|| WrpError::InvalidArgument("nil context".to_string()))
    }

    /// Whether two requests are the same instance
    pub fn ptr_eq(a: &Request, b: &Request) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Envelope for Request {
    fn note(&self) -> &Note {
        &self.inner.note
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("destination", &self.destination())
            .field("transaction_id", &self.transaction_id())
            .field("context", &self.inner.ctx)
            .finish()
    }
}

/// A WRP response annotated with the spans of the work that produced it
#[derive(Clone)]
pub struct Response {
    inner: Arc<ResponseInner>,
}

struct ResponseInner {
    note: Note,
    spans: Vec<Span>,
}

impl Response {
    pub(crate) fn from_note(note: Note) -> Self {
        Self {
            inner: Arc::new(ResponseInner {
                note,
                spans: Vec::new(),
            }),
        }
    }

    /// Spans in completion order
    pub fn spans(&self) -> &[Span] {
        &self.inner.spans
    }

    /// A copy of this response with `spans` appended after the existing ones
    ///
    /// Appending nothing returns this same instance.
    pub fn add_spans(&self, spans: impl IntoIterator<Item = Span>) -> Response {
        let mut incoming = spans.into_iter().peekable();
        if incoming.peek().is_none() {
            return self.clone();
        }

        let (lower, _) = incoming.size_hint();
        let mut combined = Vec::with_capacity(self.inner.spans.len() + lower);
        combined.extend_from_slice(&self.inner.spans);
        combined.extend(incoming);

        Self {
            inner: Arc::new(ResponseInner {
                note: self.inner.note.clone(),
                spans: combined,
            }),
        }
    }

    /// Whether two responses are the same instance
    pub fn ptr_eq(a: &Response, b: &Response) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Envelope for Response {
    fn note(&self) -> &Note {
        &self.inner.note
    }
}

impl Spanned for Response {
    fn spans(&self) -> &[Span] {
        Response::spans(self)
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("destination", &self.destination())
            .field("transaction_id", &self.transaction_id())
            .field("spans", &self.inner.spans.len())
            .finish()
    }
}

/// Wrap an already-decoded message as a request with no cached encoding
pub fn wrap_as_request(ctx: Option<Context>, message: impl Into<Arc<Message>>) -> Request {
    Request::from_note(ctx, Note::new(message))
}

/// Wrap an already-decoded message as a response with no cached encoding
pub fn wrap_as_response(message: impl Into<Arc<Message>>) -> Response {
    Response::from_note(Note::new(message))
}
