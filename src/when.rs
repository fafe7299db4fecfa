//! Tools to configure what a double does when it is invoked.

mod with_args;

pub use with_args::WithArgs;

use crate::{Behavior, Double, Fault, Func, Value};

/// Sets the behavior of a double, or of a scoped subset of its calls.
///
/// Implemented for:
///
/// * `&Double`: sets the default behavior, used when no scoped
///   behavior applies.
/// * [`OnCall`]: sets the behavior of a single call, by index.
/// * `&WithArgs`: sets the behavior of calls with matching arguments.
///
/// Every setter returns something that can be configured further, so
/// setups read as a single chain. Setting a behavior for a scope that
/// already has one replaces it.
///
/// # Examples
///
/// ```
/// use decoy::{args, Behaves, Double, Fault, Value};
///
/// let stub = Double::stub();
/// stub.returns("default")
///     .on_first_call()
///     .throws(Fault::new("first call fails"));
///
/// assert!(stub.invoke(args![]).is_err());
/// assert_eq!(stub.invoke(args![]), Ok(Value::from("default")));
/// ```
pub trait Behaves: Sized {
    /// What is handed back for further configuration.
    type Output;

    /// Installs `behavior` for the scope this was created for.
    fn behave(self, behavior: Behavior) -> Self::Output;

    /// Returns `value`.
    fn returns(self, value: impl Into<Value>) -> Self::Output {
        self.behave(Behavior::ReturnsValue(value.into()))
    }

    /// Throws `fault` synchronously to the caller.
    fn throws(self, fault: impl Into<Fault>) -> Self::Output {
        self.behave(Behavior::ThrowsError(fault.into()))
    }

    /// Returns a pending value that resolves to `value`.
    fn resolves(self, value: impl Into<Value>) -> Self::Output {
        self.behave(Behavior::ResolvesWith(value.into()))
    }

    /// Returns a pending value that rejects with `fault`.
    ///
    /// The call itself never throws.
    fn rejects(self, fault: impl Into<Fault>) -> Self::Output {
        self.behave(Behavior::RejectsWith(fault.into()))
    }

    /// Delegates the call to `fake`.
    fn calls_fake(self, fake: impl Into<Func>) -> Self::Output {
        self.behave(Behavior::CallsFake(fake.into()))
    }

    /// Calls the last function-typed argument with `args`.
    fn yields(self, args: Vec<Value>) -> Self::Output {
        self.behave(Behavior::YieldsArgs(args))
    }

    /// Returns a pending value that resolves to the argument at
    /// `position`.
    fn resolves_arg(self, position: usize) -> Self::Output {
        self.behave(Behavior::ResolvesArgAt(position))
    }

    /// Returns a pending value that rejects with the argument at
    /// `position`.
    fn throws_arg(self, position: usize) -> Self::Output {
        self.behave(Behavior::ThrowsArgAt(position))
    }

    /// Returns the argument at `position`.
    fn returns_arg(self, position: usize) -> Self::Output {
        self.behave(Behavior::ReturnsArgAt(position))
    }

    /// Returns the `this` context of the call.
    fn returns_this(self) -> Self::Output {
        self.behave(Behavior::ReturnsThis)
    }

    /// Calls the wrapped original, or returns `undefined` if there is
    /// none.
    fn calls_through(self) -> Self::Output {
        self.behave(Behavior::CallsThrough)
    }
}

impl<'d> Behaves for &'d Double {
    type Output = &'d Double;

    fn behave(self, behavior: Behavior) -> Self::Output {
        self.set_default(behavior);
        self
    }
}

/// Something whose calls can be told apart by index.
///
/// This trait is sealed.
pub trait CallScope: Copy + private::Sealed {
    #[doc(hidden)]
    fn set_for_call(self, index: usize, behavior: Behavior);
}

mod private {
    pub trait Sealed {}
}

impl private::Sealed for &Double {}

impl CallScope for &Double {
    fn set_for_call(self, index: usize, behavior: Behavior) {
        Double::set_for_call(self, index, behavior)
    }
}

/// Scopes a behavior to a single call.
///
/// Created with `on_call` and friends on a [`Double`] or a
/// [`WithArgs`]. On a `WithArgs`, the index counts matching calls
/// only.
pub struct OnCall<P> {
    parent: P,
    index: usize,
}

impl<P: CallScope> OnCall<P> {
    pub(crate) fn new(parent: P, index: usize) -> Self {
        OnCall { parent, index }
    }
}

impl<P: CallScope> Behaves for OnCall<P> {
    type Output = P;

    fn behave(self, behavior: Behavior) -> P {
        self.parent.set_for_call(self.index, behavior);
        self.parent
    }
}
