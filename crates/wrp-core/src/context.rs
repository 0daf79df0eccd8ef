//! Cancellation and deadline propagation for requests

use crate::WrpError;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Execution context carried by a request for downstream consumers
///
/// Contexts form a tree: cancelling one cancels all of its descendants, and a
/// child's deadline is never later than its parent's. Cloning is cheap and
/// clones observe the same cancellation.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    // Keeps intermediate ancestors alive so cancellation still cascades.
    _parent: Option<Context>,
    deadline: Option<Instant>,
    cancel: Option<CancelState>,
}

struct CancelState {
    cancelled: AtomicBool,
    sender: broadcast::Sender<()>,
    children: Mutex<Vec<Weak<ContextInner>>>,
}

impl ContextInner {
    fn cancel(&self) {
        let Some(state) = &self.cancel else {
            return;
        };
        if state.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = state.sender.send(());
        let children = std::mem::take(&mut *state.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|state| state.cancelled.load(Ordering::SeqCst))
    }
}

impl Context {
    /// The root context: never cancelled and without a deadline
    ///
    /// Every call returns the same shared instance.
    pub fn background() -> Context {
        static BACKGROUND: OnceCell<Context> = OnceCell::new();
        BACKGROUND
            .get_or_init(|| Context {
                inner: Arc::new(ContextInner {
                    _parent: None,
                    deadline: None,
                    cancel: None,
                }),
            })
            .clone()
    }

    /// Derive a child that can be cancelled independently of this context
    pub fn with_cancel(&self) -> (Context, CancelHandle) {
        self.derive(self.inner.deadline)
    }

    /// Derive a child that is cancelled once `deadline` passes
    pub fn with_deadline(&self, deadline: Instant) -> (Context, CancelHandle) {
        let deadline = match self.inner.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        self.derive(Some(deadline))
    }

    /// Derive a child that is cancelled after `timeout` elapses
    ///
    /// A timeout too large to represent as an instant imposes no deadline of
    /// its own; the child keeps its parent's.
    pub fn with_timeout(&self, timeout: Duration) -> (Context, CancelHandle) {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.derive(self.inner.deadline),
        }
    }

    fn derive(&self, deadline: Option<Instant>) -> (Context, CancelHandle) {
        let (sender, _) = broadcast::channel(1);
        let child = Arc::new(ContextInner {
            _parent: Some(self.clone()),
            deadline,
            cancel: Some(CancelState {
                cancelled: AtomicBool::new(false),
                sender,
                children: Mutex::new(Vec::new()),
            }),
        });

        if let Some(state) = &self.inner.cancel {
            let mut children = state.children.lock();
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child));
        }
        // Checked after registering so a concurrent parent cancel is never missed.
        if self.inner.is_cancelled() {
            child.cancel();
        }

        let handle = CancelHandle {
            inner: Arc::downgrade(&child),
        };
        (Context { inner: child }, handle)
    }

    /// The instant after which this context counts as expired
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Whether this context was cancelled or its deadline has passed
    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }

    /// Why this context is done, or `None` while it is still live
    pub fn err(&self) -> Option<WrpError> {
        if self.inner.is_cancelled() {
            return Some(WrpError::Cancelled);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(WrpError::Timeout),
            _ => None,
        }
    }

    /// Wait until this context is cancelled or its deadline passes
    ///
    /// Never resolves for the background context.
    pub async fn cancelled(&self) {
        let Some(state) = &self.inner.cancel else {
            std::future::pending::<()>().await;
            return;
        };
        let mut receiver = state.sender.subscribe();
        if self.is_cancelled() {
            return;
        }
        match self.inner.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = receiver.recv() => {}
                    _ = tokio::time::sleep_until(deadline.into()) => {}
                }
            }
            None => {
                let _ = receiver.recv().await;
            }
        }
    }

    /// Whether two contexts are the same instance
    pub fn ptr_eq(a: &Context, b: &Context) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("deadline", &self.inner.deadline)
            .field("cancelled", &self.inner.is_cancelled())
            .finish()
    }
}

/// Cancels the context it was created with
///
/// Holds only a weak reference, so an outstanding handle does not keep a
/// dropped context alive.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    inner: Weak<ContextInner>,
}

impl CancelHandle {
    /// Cancel the context and all of its descendants; idempotent
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel();
        }
    }
}
