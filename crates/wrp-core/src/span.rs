//! Completion spans for traced request handling

use std::time::{Duration, SystemTime};

/// A completed unit of traced work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    name: String,
    start: SystemTime,
    duration: Duration,
    error: Option<String>,
}

impl Span {
    /// Create a successful span
    pub fn new(name: impl Into<String>, start: SystemTime, duration: Duration) -> Self {
        Self {
            name: name.into(),
            start,
            duration,
            error: None,
        }
    }

    /// Record the error the traced work ended with
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> SystemTime {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The error text, if the traced work failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Implemented by anything that carries completed spans
pub trait Spanned {
    /// Spans in completion order
    fn spans(&self) -> &[Span];
}

/// Produces spans by timing named units of work
#[derive(Debug, Clone, Copy)]
pub struct Spanner {
    now: fn() -> SystemTime,
}

impl Spanner {
    /// Create a spanner backed by the system clock
    pub fn new() -> Self {
        Self {
            now: SystemTime::now,
        }
    }

    /// Create a spanner with a custom clock
    pub fn with_clock(now: fn() -> SystemTime) -> Self {
        Self { now }
    }

    /// Begin timing a unit of work
    pub fn start(&self, name: impl Into<String>) -> SpanTimer {
        SpanTimer {
            name: name.into(),
            start: (self.now)(),
            now: self.now,
        }
    }
}

impl Default for Spanner {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight span; call [`SpanTimer::finish`] when the work completes
#[derive(Debug)]
#[must_use = "a span is only recorded when finished"]
pub struct SpanTimer {
    name: String,
    start: SystemTime,
    now: fn() -> SystemTime,
}

impl SpanTimer {
    /// Complete the span, recording the error if the work failed
    ///
    /// A clock that moves backwards yields a zero duration.
    pub fn finish(self, error: Option<&dyn std::error::Error>) -> Span {
        let duration = (self.now)()
            .duration_since(self.start)
            .unwrap_or_default();
        let span = Span::new(self.name, self.start, duration);
        match error {
            Some(err) => span.with_error(err.to_string()),
            None => span,
        }
    }
}
