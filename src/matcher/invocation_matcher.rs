use paste::paste;

use super::ArgMatcher;
use crate::Value;

/// Matcher for the arguments of an invocation.
///
/// Expectations are checked positionally against a prefix of the
/// arguments: an invocation with more arguments than expectations
/// still matches. An expectation past the end of the arguments is
/// checked against `undefined`.
///
/// This trait is implemented for:
///
/// * tuples of up to ten [`ArgMatcher`]s,
/// * `Vec<Value>`, as built by [`args!`](crate::args!), where each
///   value must equal its argument,
/// * `()`, which expects nothing and so matches every invocation,
/// * [`AnyInvocation`].
///
/// The trait is sealed.
///
/// # Examples
///
/// ```
/// use decoy::{args, matcher::{self, InvocationMatcher}};
///
/// let matcher = (matcher::eq(5), matcher::any());
/// assert!(matcher.matches(&args![5, "hello"]));
/// assert!(!matcher.matches(&args![3, "hello"]));
///
/// // single argument matchers are tuples too
/// assert!((20,).matches(&args![20, "extra"]));
/// assert!(!(20,).matches_exactly(&args![20, "extra"]));
/// ```
pub trait InvocationMatcher: private::Sealed + Send + Sync {
    /// Checks the arguments against every expectation.
    fn matches(&self, args: &[Value]) -> bool;

    /// One formatted expectation per expected argument.
    fn expectations(&self) -> Vec<String>;

    /// Number of expected arguments, `None` if any number is fine.
    fn arity(&self) -> Option<usize>;

    /// Returns why the matcher can never match deterministically, if
    /// so.
    fn malformed(&self) -> Option<String>;

    /// Like [`matches`](Self::matches) but also requires the number of
    /// arguments to equal the number of expectations.
    fn matches_exactly(&self, args: &[Value]) -> bool {
        self.arity().map_or(true, |arity| arity == args.len()) && self.matches(args)
    }

    /// Human readable form of the expectations.
    fn describe(&self) -> String {
        match self.arity() {
            None => "<any>".to_string(),
            Some(_) => format!("[{}]", self.expectations().join(", ")),
        }
    }
}

mod private {
    pub trait Sealed {}
}

static MISSING: Value = Value::Undefined;

/// Matches every invocation, whatever its arguments.
pub struct AnyInvocation;

impl private::Sealed for AnyInvocation {}

impl InvocationMatcher for AnyInvocation {
    fn matches(&self, _: &[Value]) -> bool {
        true
    }

    fn expectations(&self) -> Vec<String> {
        vec![]
    }

    fn arity(&self) -> Option<usize> {
        None
    }

    fn malformed(&self) -> Option<String> {
        None
    }
}

impl private::Sealed for () {}

impl InvocationMatcher for () {
    /// Always succeeds, as there are no expectations.
    fn matches(&self, _: &[Value]) -> bool {
        true
    }

    fn expectations(&self) -> Vec<String> {
        vec![]
    }

    fn arity(&self) -> Option<usize> {
        Some(0)
    }

    fn malformed(&self) -> Option<String> {
        None
    }
}

impl private::Sealed for Vec<Value> {}

impl InvocationMatcher for Vec<Value> {
    fn matches(&self, args: &[Value]) -> bool {
        self.iter()
            .enumerate()
            .all(|(i, expected)| expected == args.get(i).unwrap_or(&MISSING))
    }

    fn expectations(&self) -> Vec<String> {
        self.iter().map(|expected| format!("{:?}", expected)).collect()
    }

    fn arity(&self) -> Option<usize> {
        Some(self.len())
    }

    fn malformed(&self) -> Option<String> {
        self.iter().find_map(Value::unmatchable)
    }
}

// (a,b,c) => tuple!(b,c)
macro_rules! peel {
    ($idx:tt $(, $other:tt)*) => (tuple! { $($other),* })
}

// (a,b,c,...) => a
macro_rules! pop_front {
    ($first:tt $(, $other:tt)*) => {
        $first
    };
}

// implement InvocationMatcher for tuples of ArgMatchers
//
// elements are named after the given indices in descending order so
// the position of element `idx` in a tuple of `len` is `len - idx`
macro_rules! tuple {
    () => ();
    ($($idx:tt),+) => (
        paste! {
            impl<$([<AM $idx>]: ArgMatcher + Send + Sync),+> private::Sealed for ($([<AM $idx>],)+) {}

            impl<$([<AM $idx>]: ArgMatcher + Send + Sync),+> InvocationMatcher for ($([<AM $idx>],)+) {
                /// Succeeds if every argument matches its corresponding [`ArgMatcher`].
                fn matches(&self, args: &[Value]) -> bool {
                    const LEN: usize = pop_front! { $($idx),+ };
                    let ($([<am $idx>],)+) = self;

                    $([<am $idx>].matches(args.get(LEN - $idx).unwrap_or(&MISSING)))&&+
                }

                fn expectations(&self) -> Vec<String> {
                    let ($([<am $idx>],)+) = self;

                    vec![
                        $([<am $idx>].to_string()),+
                    ]
                }

                fn arity(&self) -> Option<usize> {
                    Some(pop_front! { $($idx),+ })
                }

                fn malformed(&self) -> Option<String> {
                    let ($([<am $idx>],)+) = self;

                    None$(.or_else(|| [<am $idx>].malformed()))+
                }
            }
        }
        peel! { $($idx),+ }
    )
}

tuple! { 10, 9, 8, 7, 6, 5, 4, 3, 2, 1 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, matcher};

    #[test]
    fn tuple_elements_match_in_order() {
        let matcher = (1, "two", matcher::any());
        assert!(matcher.matches(&args![1, "two", 3]));
        assert!(matcher.matches(&args![1, "two"]));
        assert!(!matcher.matches(&args!["two", 1, 3]));
        assert_eq!(matcher.expectations(), vec!["1", "two", "_"]);
    }

    #[test]
    fn missing_arguments_are_undefined() {
        assert!((matcher::eq(()),).matches(&args![]));
        assert!(!(42,).matches(&args![]));
        assert!(!args![42].matches(&args![]));
    }

    #[test]
    fn exact_matching_checks_the_length() {
        assert!(args![1, 2].matches_exactly(&args![1, 2]));
        assert!(!args![1, 2].matches_exactly(&args![1, 2, 3]));
        assert!(AnyInvocation.matches_exactly(&args![1, 2, 3]));
        assert!(().matches_exactly(&args![]));
    }

    #[test]
    fn describes_expectations() {
        assert_eq!(args![1, "a"].describe(), "[1, \"a\"]");
        assert_eq!(AnyInvocation.describe(), "<any>");
    }

    #[test]
    fn nan_expectations_are_malformed() {
        assert!((1, f64::NAN).malformed().is_some());
        assert!(args![f64::NAN].malformed().is_some());
        assert!((1, 2.5).malformed().is_none());
    }
}
