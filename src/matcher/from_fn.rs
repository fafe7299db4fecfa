use super::ArgMatcher;
use crate::Value;
use std::fmt;

struct FromFn<F> {
    message: String,
    matcher: F,
}

impl<F> ArgMatcher for FromFn<F>
where
    F: Fn(&Value) -> bool,
{
    fn matches(&self, argument: &Value) -> bool {
        let matcher = &self.matcher;
        matcher(argument)
    }
}

impl<F> fmt::Display for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Returns an [`ArgMatcher`] backed by a closure and displayed as
/// `message`.
///
/// See [`from_fn!`](crate::from_fn!) for a version that uses the
/// closure's source as the message.
pub fn from_fn(
    matcher: impl Fn(&Value) -> bool + Send + Sync + 'static,
    message: impl fmt::Display,
) -> impl ArgMatcher + Send + Sync + 'static {
    FromFn {
        matcher,
        message: message.to_string(),
    }
}
