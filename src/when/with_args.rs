use std::fmt::{self, Formatter};

use super::{private, Behaves, CallScope, OnCall};
use crate::{call::CallRecord, double::SharedMatcher, Behavior, Double};

/// The calls of a double whose arguments match.
///
/// Created with [`Double::with_args`]. Behaviors set through it only
/// apply to matching calls and take precedence over the double's
/// other behaviors. Queries on it only count matching calls.
///
/// ```
/// use decoy::{args, Double};
///
/// # fn main() -> Result<(), decoy::Error> {
/// let spy = Double::spy();
/// spy.invoke(args![42]).unwrap();
/// spy.invoke(args![1]).unwrap();
///
/// assert!(spy.with_args((1,))?.called_once());
/// assert_eq!(spy.with_args((42,))?.first_call()?.index(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WithArgs {
    double: Double,
    matcher: SharedMatcher,
}

impl WithArgs {
    pub(crate) fn new(double: Double, matcher: SharedMatcher) -> Self {
        WithArgs { double, matcher }
    }

    /// The double these calls belong to.
    pub fn double(&self) -> &Double {
        &self.double
    }

    /// Scopes the next behavior to the matching call at `index`,
    /// counting matching calls only.
    pub fn on_call(&self, index: usize) -> OnCall<&Self> {
        OnCall::new(self, index)
    }

    pub fn on_first_call(&self) -> OnCall<&Self> {
        self.on_call(0)
    }

    pub fn on_second_call(&self) -> OnCall<&Self> {
        self.on_call(1)
    }

    pub fn on_third_call(&self) -> OnCall<&Self> {
        self.on_call(2)
    }

    /// The matching calls, oldest first.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.double.with_calls(|calls| {
            calls
                .iter()
                .filter(|call| self.matcher.matches(call.args()))
                .cloned()
                .collect()
        })
    }

    pub fn call_count(&self) -> usize {
        self.double.with_calls(|calls| {
            calls
                .iter()
                .filter(|call| self.matcher.matches(call.args()))
                .count()
        })
    }

    pub fn called(&self) -> bool {
        self.call_count() > 0
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

    /// The matching call at `index`, counting matching calls only.
    pub fn get_call(&self, index: usize) -> Result<CallRecord, crate::OutOfRange> {
        let mut calls = self.calls();
        let len = calls.len();
        if index < len {
            Ok(calls.swap_remove(index))
        } else {
            Err(crate::OutOfRange { index, len })
        }
    }

    pub fn first_call(&self) -> Result<CallRecord, crate::OutOfRange> {
        self.get_call(0)
    }
}

impl private::Sealed for &WithArgs {}

impl CallScope for &WithArgs {
    fn set_for_call(self, index: usize, behavior: Behavior) {
        self.double
            .set_for_args_and_call(&self.matcher, index, behavior);
    }
}

impl<'w> Behaves for &'w WithArgs {
    type Output = &'w WithArgs;

    fn behave(self, behavior: Behavior) -> Self::Output {
        self.double.set_for_args(&self.matcher, behavior);
        self
    }
}

impl fmt::Debug for WithArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithArgs")
            .field("double", &self.double.name())
            .field("matcher", &self.matcher.describe())
            .finish()
    }
}
