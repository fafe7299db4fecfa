use std::fmt::{self, Formatter};

use super::ArgMatcher;
use crate::Value;

/// Equality matcher.
///
/// Uses the equality of [`Value`]: structural for data, identity for
/// functions, hosts and pending values.
pub struct Eq(Value);

impl ArgMatcher for Eq {
    fn matches(&self, actual: &Value) -> bool {
        &self.0 == actual
    }

    fn malformed(&self) -> Option<String> {
        self.0.unmatchable()
    }
}

impl fmt::Display for Eq {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Creates an [`Eq`](struct@Eq) matcher.
pub fn eq(expected: impl Into<Value>) -> Eq {
    Eq(expected.into())
}
