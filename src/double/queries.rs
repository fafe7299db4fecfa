use super::Double;
use crate::{call::CallRecord, matcher::InvocationMatcher, Func, OutOfRange, Value};

/// Read-only questions about the calls a double received.
impl Double {
    /// Snapshot of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.inner.state.lock().store.all().to_vec()
    }

    /// The arguments of every recorded call, oldest first.
    pub fn args(&self) -> Vec<Vec<Value>> {
        self.with_calls(|calls| calls.iter().map(|call| call.args().to_vec()).collect())
    }

    pub fn call_count(&self) -> usize {
        self.inner.state.lock().store.len()
    }

    pub fn called(&self) -> bool {
        self.call_count() > 0
    }

    pub fn not_called(&self) -> bool {
        self.call_count() == 0
    }

    pub fn called_once(&self) -> bool {
        self.call_count() == 1
    }

    pub fn called_twice(&self) -> bool {
        self.call_count() == 2
    }

    pub fn called_thrice(&self) -> bool {
        self.call_count() == 3
    }

    /// The call at `index`, counting from 0.
    pub fn get_call(&self, index: usize) -> Result<CallRecord, OutOfRange> {
        self.inner.state.lock().store.at(index).cloned()
    }

    pub fn first_call(&self) -> Result<CallRecord, OutOfRange> {
        self.inner.state.lock().store.first().cloned()
    }

    pub fn second_call(&self) -> Result<CallRecord, OutOfRange> {
        self.get_call(1)
    }

    pub fn third_call(&self) -> Result<CallRecord, OutOfRange> {
        self.get_call(2)
    }

    pub fn last_call(&self) -> Result<CallRecord, OutOfRange> {
        self.inner.state.lock().store.last().cloned()
    }

    /// The last function-typed argument passed to the double, across
    /// all of its calls.
    pub fn last_callback(&self) -> Option<Func> {
        self.inner.state.lock().last_callback.clone()
    }

    /// Checks if at least one call had matching leading arguments.
    pub fn called_with(&self, matcher: impl InvocationMatcher) -> bool {
        self.with_calls(|calls| calls.iter().any(|call| matcher.matches(call.args())))
    }

    /// Checks if at least one call had exactly the matching arguments.
    pub fn called_with_exactly(&self, matcher: impl InvocationMatcher) -> bool {
        self.with_calls(|calls| {
            calls
                .iter()
                .any(|call| matcher.matches_exactly(call.args()))
        })
    }

    /// Checks if the double was called and every call matched.
    pub fn always_called_with(&self, matcher: impl InvocationMatcher) -> bool {
        self.with_calls(|calls| {
            !calls.is_empty() && calls.iter().all(|call| matcher.matches(call.args()))
        })
    }

    pub fn never_called_with(&self, matcher: impl InvocationMatcher) -> bool {
        !self.called_with(matcher)
    }

    /// Checks if at least one call was made on `this`.
    pub fn called_on(&self, this: &Value) -> bool {
        self.with_calls(|calls| calls.iter().any(|call| call.called_on(this)))
    }

    /// Checks if at least one call returned `value`.
    pub fn returned(&self, value: &Value) -> bool {
        self.with_calls(|calls| calls.iter().any(|call| call.returned(value)))
    }

    /// Checks if at least one call threw.
    pub fn threw(&self) -> bool {
        self.with_calls(|calls| calls.iter().any(CallRecord::threw))
    }

    /// Checks if this double's first call happened before `other`'s
    /// last call.
    ///
    /// False if either double was never called.
    pub fn called_before(&self, other: &Double) -> bool {
        match (self.first_call(), other.last_call()) {
            (Ok(mine), Ok(theirs)) => mine.called_before(&theirs),
            _ => false,
        }
    }

    /// Checks if this double's last call happened after `other`'s
    /// first call.
    pub fn called_after(&self, other: &Double) -> bool {
        match (self.last_call(), other.first_call()) {
            (Ok(mine), Ok(theirs)) => mine.called_after(&theirs),
            _ => false,
        }
    }

    pub(crate) fn with_calls<T>(&self, f: impl FnOnce(&[CallRecord]) -> T) -> T {
        let state = self.inner.state.lock();
        f(state.store.all())
    }
}
