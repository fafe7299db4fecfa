//! # Decoy
//!
//! A library to create fakes, spies and stubs for dynamically typed
//! call targets.
//!
//! A [`Double`] stands in for a function. Every invocation is
//! recorded in order, with its arguments, `this` context and outcome,
//! and answered with a configured [`Behavior`]: return a value, throw
//! a [`Fault`], resolve or reject a pending value, yield to a callback,
//! or call through to a wrapped original.
//!
//! Arguments and results are [`Value`]s, so a double can replace
//! anything from a free function to a method on a [`Host`] object.
//!
//! ## Setup
//!
//! Behaviors are configured through the [`Behaves`] trait, either on
//! the double itself or on a narrower scope:
//!
//! * [`Double::on_call`] applies to a single call, by index.
//! * [`Double::with_args`] applies to calls with matching arguments
//!   and can be further scoped by index among those calls.
//!
//! When several behaviors apply, matching arguments win over a call
//! index, which wins over the default. An unconfigured double calls
//! through to its original, or returns `undefined` if it has none.
//!
//! ```
//! use decoy::{args, matcher, Behaves, Double, Fault, Value};
//!
//! # fn main() -> Result<(), decoy::Error> {
//! let fetch = Double::stub().named("fetch");
//! fetch.returns("cached");
//! fetch.on_first_call().throws(Fault::new("cold cache"));
//! fetch.with_args(("/health", matcher::any()))?.returns("ok");
//!
//! assert!(fetch.invoke(args!["/users"]).is_err());
//! assert_eq!(fetch.invoke(args!["/users"]), Ok(Value::from("cached")));
//! assert_eq!(fetch.invoke(args!["/health", 1]), Ok(Value::from("ok")));
//!
//! assert_eq!(fetch.call_count(), 3);
//! assert!(fetch.first_call()?.threw());
//! assert!(fetch.called_with(("/health",)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Patching
//!
//! [`Double::spy_on`] and [`Double::stub_on`] swap a property of a
//! [`Host`] for a double until it is restored. A [`Sandbox`] groups the
//! doubles and patches of a test and restores them all at once.
//!
//! ```
//! use decoy::{args, Double, Func, Host, Object, Value};
//!
//! # fn main() -> Result<(), decoy::Error> {
//! let calculator = Host::new(
//!     Object::new().with("double", Func::new(|args| {
//!         Ok(Value::from(args[0].as_int().unwrap_or(0) * 2))
//!     })),
//! );
//!
//! let spy = Double::spy_on(&calculator, "double")?;
//! assert_eq!(calculator.call("double", &args![21]), Ok(Value::from(42)));
//! assert!(spy.called_with((21,)));
//!
//! spy.restore();
//! # Ok(())
//! # }
//! ```

mod call;
mod double;
mod error;
mod sandbox;
mod value;
mod when;

pub mod fake;
pub mod matcher;
pub mod patch;

pub use call::CallRecord;
pub use double::{Behavior, Double};
pub use error::{ConfigError, Error, OutOfRange};
pub use patch::{Host, Object, Patch, Patchable, Slot};
pub use sandbox::Sandbox;
pub use value::{Deferred, Fault, Func, Settled, Value};
pub use when::{Behaves, CallScope, OnCall, WithArgs};

/// Implements [`Patchable`] for a struct whose patchable fields are
/// [`Slot`]s.
///
/// Fields that are not slots must be marked `#[patchable(skip)]`.
/// A field can be exposed under another property name with
/// `#[patchable(rename = "...")]`.
///
/// ```
/// use decoy::{args, Behaves, Double, Func, Host, Patchable, Slot, Value};
///
/// #[derive(Patchable)]
/// struct Mailer {
///     #[patchable(rename = "sendMail")]
///     send: Slot,
///     #[patchable(skip)]
///     sent: usize,
/// }
///
/// # fn main() -> Result<(), decoy::Error> {
/// let mailer = Host::new(Mailer {
///     send: Slot::new(Func::noop()),
///     sent: 0,
/// });
///
/// let stub = Double::stub_on(&mailer, "sendMail")?;
/// stub.returns(true);
/// assert_eq!(mailer.call("sendMail", &args!["hi"]), Ok(Value::from(true)));
/// # Ok(())
/// # }
/// ```
pub use decoy_macros::Patchable;

/// Builds a `Vec<Value>` argument list from anything that converts
/// into a [`Value`].
///
/// ```
/// use decoy::{args, Value};
///
/// assert_eq!(args![1, "two"], vec![Value::from(1), Value::from("two")]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::Value::from($arg)),+]
    };
}
