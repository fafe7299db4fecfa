use std::sync::atomic::{AtomicU64, Ordering};

use crate::{matcher::InvocationMatcher, Fault, Func, Settled, Value};

// shared by every double so calls can be ordered across doubles
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_sequence() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// A single recorded invocation of a double.
///
/// Records are appended when a call starts; the outcome is filled in
/// once, when the call finishes. A record obtained while its call is
/// still running (e.g. from inside a fake) has no outcome yet.
#[derive(Clone, Debug)]
pub struct CallRecord {
    pub(crate) index: usize,
    pub(crate) sequence: u64,
    pub(crate) args: Vec<Value>,
    pub(crate) this: Value,
    pub(crate) outcome: Option<Settled>,
}

impl CallRecord {
    /// Position of this call in its double's history, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arg(&self, position: usize) -> Option<&Value> {
        self.args.get(position)
    }

    pub fn last_arg(&self) -> Option<&Value> {
        self.args.last()
    }

    /// The `this` context the double was invoked on.
    pub fn this(&self) -> &Value {
        &self.this
    }

    /// The last function-typed argument, if any.
    pub fn callback(&self) -> Option<&Func> {
        self.args.iter().rev().find_map(Value::as_func)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&Settled> {
        self.outcome.as_ref()
    }

    /// The value returned by the call, if it returned.
    pub fn return_value(&self) -> Option<&Value> {
        match &self.outcome {
            Some(Ok(value)) => Some(value),
            _ => None,
        }
    }

    /// The fault thrown by the call, if it threw.
    pub fn exception(&self) -> Option<&Fault> {
        match &self.outcome {
            Some(Err(fault)) => Some(fault),
            _ => None,
        }
    }

    pub fn threw(&self) -> bool {
        self.exception().is_some()
    }

    pub fn returned(&self, value: &Value) -> bool {
        self.return_value() == Some(value)
    }

    /// The settlement of a pending return value, once it has been
    /// observed.
    pub fn settled(&self) -> Option<Settled> {
        self.return_value()
            .and_then(Value::as_pending)
            .and_then(|deferred| deferred.peek())
    }

    /// Checks if the leading arguments match.
    pub fn called_with(&self, matcher: impl InvocationMatcher) -> bool {
        matcher.matches(&self.args)
    }

    /// Checks if the arguments match and no extra arguments were
    /// given.
    pub fn called_with_exactly(&self, matcher: impl InvocationMatcher) -> bool {
        matcher.matches_exactly(&self.args)
    }

    pub fn called_on(&self, this: &Value) -> bool {
        &self.this == this
    }

    /// Checks if this call happened before `other`, which may belong
    /// to a different double.
    pub fn called_before(&self, other: &CallRecord) -> bool {
        self.sequence < other.sequence
    }

    pub fn called_after(&self, other: &CallRecord) -> bool {
        self.sequence > other.sequence
    }
}
