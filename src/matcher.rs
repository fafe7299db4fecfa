//! Tools to check if an argument or a whole invocation matches an
//! expectation.
//!
//! An [`ArgMatcher`] checks a single argument. An
//! [`InvocationMatcher`] checks an entire argument list and is what
//! [`Double::with_args`](crate::Double::with_args) and the
//! `called_with` family of queries take.

mod any;
mod eq;
mod from_fn;
mod invocation_matcher;

pub use any::{any, Any};
pub use eq::{eq, Eq};
pub use from_fn::from_fn;
pub use invocation_matcher::{AnyInvocation, InvocationMatcher};

use std::fmt;

use crate::Value;

/// Matcher for a single argument.
///
/// Implementors provide an expectation that an argument either
/// matches or not. The [`fmt::Display`] form of the matcher is the
/// expectation shown in debug output.
///
/// Plain values are matchers too: a [`Value`], an integer, a float, a
/// bool or a string matches arguments equal to it.
///
/// # Examples
///
/// ```
/// use decoy::{matcher::ArgMatcher, Value};
/// use std::fmt::{self, Formatter};
///
/// struct Even;
///
/// impl ArgMatcher for Even {
///     fn matches(&self, arg: &Value) -> bool {
///         arg.as_int().map_or(false, |i| i % 2 == 0)
///     }
/// }
///
/// impl fmt::Display for Even {
///     fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
///         f.write_str("<even>")
///     }
/// }
///
/// assert!(Even.matches(&Value::from(4)));
/// assert!(!Even.matches(&Value::from(3)));
/// ```
pub trait ArgMatcher: fmt::Display {
    /// Checks if the argument matches the expectation.
    fn matches(&self, arg: &Value) -> bool;

    /// Returns why the expectation can never be matched, if so.
    fn malformed(&self) -> Option<String> {
        None
    }
}

impl ArgMatcher for Value {
    fn matches(&self, arg: &Value) -> bool {
        self == arg
    }

    fn malformed(&self) -> Option<String> {
        self.unmatchable()
    }
}

macro_rules! value_matcher {
    ($($ty:ty),+) => {
        $(
            impl ArgMatcher for $ty {
                fn matches(&self, arg: &Value) -> bool {
                    &Value::from(self.clone()) == arg
                }

                fn malformed(&self) -> Option<String> {
                    Value::from(self.clone()).unmatchable()
                }
            }
        )+
    };
}

value_matcher!(bool, i32, i64, u32, f64, &'static str, String);

/// Returns an [`ArgMatcher`] that succeeds if the pattern matches the
/// argument.
///
/// The returned matcher displays as the stringified pattern.
///
/// ```
/// use decoy::{pattern, matcher::ArgMatcher, Value};
///
/// let big = pattern!(Value::Int(n) if *n > 100);
/// assert!(big.matches(&Value::from(500)));
/// assert!(!big.matches(&Value::from(5)));
/// assert!(!big.matches(&Value::from("500")));
/// println!("{}", big); // 'Value::Int(n) if *n > 100'
/// ```
#[macro_export]
macro_rules! pattern {
    ($( $pattern:pat_param )|+ $( if $guard: expr )? $(,)?) => (
        $crate::matcher::from_fn(
            move |arg: &$crate::Value| matches!(arg, $($pattern)|+ $(if $guard)?),
            stringify!($($pattern)|+ $(if $guard)?),
        )
    );
}

/// Returns an [`ArgMatcher`] that succeeds based on the provided
/// closure.
///
/// The returned matcher displays as the stringified closure.
///
/// ```
/// use decoy::{from_fn, matcher::ArgMatcher, Value};
///
/// let greeting = from_fn!(|arg: &Value| arg.as_str().map_or(false, |s| s.contains("hello")));
/// assert!(greeting.matches(&Value::from("hello world")));
/// assert!(!greeting.matches(&Value::from("bye world")));
/// ```
#[macro_export]
macro_rules! from_fn {
    ($matcher:expr) => {
        $crate::matcher::from_fn($matcher, stringify!($matcher))
    };
}
