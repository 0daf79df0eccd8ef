//! Service seam for handling decoded requests

use crate::decode::decode_request_bytes;
use crate::envelope::{Envelope, Request, Response};
use crate::pool::{DecoderPool, EncoderPool};
use bytes::Bytes;
use std::time::Duration;
use wrp_core::{Context, Spanner, WrpResult};

/// Handles one request and produces its response
pub trait Service: Send + Sync {
    fn serve(&self, request: &Request) -> WrpResult<Response>;
}

impl<S: Service + ?Sized> Service for std::sync::Arc<S> {
    fn serve(&self, request: &Request) -> WrpResult<Response> {
        (**self).serve(request)
    }
}

/// A [`Service`] backed by a closure
pub struct ServiceFn<F> {
    f: F,
}

/// Adapt a closure into a [`Service`]
pub fn service_fn<F>(f: F) -> ServiceFn<F>
where
    F: Fn(&Request) -> WrpResult<Response> + Send + Sync,
{
    ServiceFn { f }
}

impl<F> Service for ServiceFn<F>
where
    F: Fn(&Request) -> WrpResult<Response> + Send + Sync,
{
    fn serve(&self, request: &Request) -> WrpResult<Response> {
        (self.f)(request)
    }
}

/// Records a span around every call to the wrapped service
///
/// Successful responses come back with the span appended. Failures are logged
/// with the span's timing since there is no response to attach it to.
pub struct Traced<S> {
    service: S,
    name: String,
    spanner: Spanner,
}

impl<S: Service> Traced<S> {
    pub fn new(name: impl Into<String>, service: S) -> Self {
        Self::with_spanner(name, service, Spanner::new())
    }

    pub fn with_spanner(name: impl Into<String>, service: S, spanner: Spanner) -> Self {
        Self {
            service,
            name: name.into(),
            spanner,
        }
    }
}

impl<S: Service> Service for Traced<S> {
    fn serve(&self, request: &Request) -> WrpResult<Response> {
        let timer = self.spanner.start(self.name.as_str());
        match self.service.serve(request) {
            Ok(response) => Ok(response.add_spans([timer.finish(None)])),
            Err(err) => {
                let span = timer.finish(Some(&err));
                tracing::warn!(
                    span = span.name(),
                    destination = request.destination(),
                    transaction_id = request.transaction_id(),
                    elapsed_us = elapsed_micros(span.duration()),
                    error = %err,
                    "service call failed"
                );
                Err(err)
            }
        }
    }
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`
fn elapsed_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Decode a request, serve it, and encode the response in the encoder pool's format
///
/// A request whose context is already done is not served.
pub fn serve_bytes<S: Service + ?Sized>(
    service: &S,
    ctx: Option<Context>,
    contents: impl Into<Bytes>,
    decoders: &DecoderPool,
    encoders: &EncoderPool,
) -> WrpResult<Vec<u8>> {
    let request = decode_request_bytes(ctx, contents, decoders)?;
    if let Some(err) = request.context().err() {
        tracing::debug!(transaction_id = request.transaction_id(), error = %err, "skipping request with finished context");
        return Err(err);
    }
    let response = service.serve(&request)?;
    Ok(response.encode_bytes(encoders)?)
}
