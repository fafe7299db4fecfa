use std::{
    fmt::{self, Formatter},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::future::{self, BoxFuture, FutureExt, Shared};

use super::{Fault, Value};

/// The outcome of a [`Deferred`].
pub type Settled = Result<Value, Fault>;

/// A pending value that settles exactly once.
///
/// A `Deferred` is lazy: it settles the first time any of its clones
/// is polled, and every clone then observes the same outcome. It is
/// never cancelled and never blocks the caller that created it.
#[derive(Clone)]
pub struct Deferred {
    inner: Shared<BoxFuture<'static, Settled>>,
}

impl Deferred {
    pub fn new(future: impl Future<Output = Settled> + Send + 'static) -> Self {
        Deferred {
            inner: future.boxed().shared(),
        }
    }

    pub fn resolved(value: Value) -> Self {
        Deferred::new(future::ready(Ok(value)))
    }

    pub fn rejected(fault: Fault) -> Self {
        Deferred::new(future::ready(Err(fault)))
    }

    /// Returns the outcome if some clone has already observed it.
    pub fn peek(&self) -> Option<Settled> {
        self.inner.peek().cloned()
    }

    pub fn is_settled(&self) -> bool {
        self.inner.peek().is_some()
    }

    pub fn ptr_eq(&self, other: &Deferred) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for Deferred {
    type Output = Settled;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner.peek() {
            None => f.write_str("Pending { <pending> }"),
            Some(Ok(value)) => write!(f, "Pending {{ <resolved> {:?} }}", value),
            Some(Err(fault)) => write!(f, "Pending {{ <rejected> {} }}", fault),
        }
    }
}
