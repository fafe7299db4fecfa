//! The test double: records its calls and answers them with the
//! configured behavior.

mod behavior;
mod queries;
pub(crate) mod store;
mod table;

pub use behavior::Behavior;

use std::{
    fmt::{self, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    matcher::InvocationMatcher,
    patch::{self, Host, Patch},
    when::{OnCall, WithArgs},
    ConfigError, Fault, Func, Value,
};
use behavior::Invocation;
use store::Store;
pub(crate) use table::SharedMatcher;
use table::Table;

/// A fake, spy, or stub.
///
/// A `Double` is a cheap handle: clones share the same call history
/// and behaviors. Doubles are invoked with [`invoke`](Double::invoke),
/// or converted into a [`Func`] so they can stand in for a function
/// anywhere a [`Value`] is expected.
///
/// # Examples
///
/// ```
/// use decoy::{args, Behaves, Double, Value};
///
/// let stub = Double::stub();
/// stub.on_call(0).returns(1).on_call(1).returns(2).returns(3);
///
/// let results: Vec<_> = (0..4).map(|_| stub.invoke(args![]).unwrap()).collect();
/// assert_eq!(results, vec![Value::from(1), Value::from(2), Value::from(3), Value::from(3)]);
/// assert_eq!(stub.call_count(), 4);
/// ```
#[derive(Clone)]
pub struct Double {
    inner: Arc<Inner>,
}

struct Inner {
    // set at creation, called through when nothing else is configured
    original: Option<Func>,
    state: Mutex<State>,
}

struct State {
    name: String,
    store: Store,
    table: Table,
    last_callback: Option<Func>,
    binding: Option<Patch>,
}

impl Double {
    fn new(name: impl Into<String>, original: Option<Func>) -> Self {
        Double {
            inner: Arc::new(Inner {
                original,
                state: Mutex::new(State {
                    name: name.into(),
                    store: Store::default(),
                    table: Table::default(),
                    last_callback: None,
                    binding: None,
                }),
            }),
        }
    }

    /// Creates a stub that returns `undefined` until configured.
    pub fn stub() -> Self {
        Double::new("stub", None)
    }

    /// Creates an anonymous spy: it only records its calls.
    pub fn spy() -> Self {
        Double::new("spy", None)
    }

    /// Creates a spy around `original`.
    ///
    /// Until another behavior is configured, calls are forwarded to
    /// `original` with the same `this` and arguments, and its result
    /// or fault is recorded and passed back.
    pub fn wrap(original: Func) -> Self {
        let name = original.name().unwrap_or("spy").to_string();
        Double::new(name, Some(original))
    }

    /// Replaces the function at `property` on `host` with a spy
    /// wrapping it.
    ///
    /// Use [`restore`](Double::restore) to put the original back.
    pub fn spy_on(host: &Host, property: &str) -> Result<Self, ConfigError> {
        let original = match host.get(property) {
            Some(Value::Func(func)) => func,
            Some(_) => {
                return Err(ConfigError::NotAFunction {
                    property: property.to_string(),
                })
            }
            None => {
                return Err(ConfigError::NonExistentProperty {
                    property: property.to_string(),
                })
            }
        };

        let spy = Double::new(property, Some(original));
        spy.bind(host, property)?;
        Ok(spy)
    }

    /// Replaces `property` on `host` with a stub that does not call
    /// the original.
    pub fn stub_on(host: &Host, property: &str) -> Result<Self, ConfigError> {
        let stub = Double::new(property, None);
        stub.bind(host, property)?;
        Ok(stub)
    }

    fn bind(&self, host: &Host, property: &str) -> Result<(), ConfigError> {
        let patch = patch::patch(host, property, self.as_func())?;
        self.inner.state.lock().binding = Some(patch);
        Ok(())
    }

    /// Renames the double. The name shows up in faults and log events.
    pub fn named(self, name: impl Into<String>) -> Self {
        self.inner.state.lock().name = name.into();
        self
    }

    pub fn name(&self) -> String {
        self.inner.state.lock().name.clone()
    }

    /// The patch installed by [`spy_on`](Double::spy_on) or
    /// [`stub_on`](Double::stub_on), if any.
    pub fn binding(&self) -> Option<Patch> {
        self.inner.state.lock().binding.clone()
    }

    /// Puts the original property value back on the host this double
    /// was patched into.
    ///
    /// Does nothing for doubles that were never patched in, or that
    /// were already restored.
    pub fn restore(&self) {
        // do not hold the lock while the host is written to
        let binding = self.binding();
        if let Some(patch) = binding {
            patch.restore();
        }
    }

    /// Invokes the double with an `undefined` context.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, Fault> {
        self.invoke_on(Value::Undefined, args)
    }

    /// Invokes the double as a method of `this`.
    ///
    /// The call is recorded before its behavior runs, so a fake that
    /// calls the double again sees its own call in the history and
    /// nested calls get later indices.
    pub fn invoke_on(&self, this: Value, args: Vec<Value>) -> Result<Value, Fault> {
        let (handle, behavior, name) = {
            let mut guard = self.inner.state.lock();
            let state = &mut *guard;

            let index = state.store.len();
            let behavior = state
                .table
                .lookup(index, &args, state.store.all())
                .cloned()
                .unwrap_or(Behavior::CallsThrough);

            if let Some(callback) = args.iter().rev().find_map(Value::as_func) {
                state.last_callback = Some(callback.clone());
            }

            trace!(double = state.name.as_str(), index, ?behavior, "dispatching call");
            let handle = state.store.record(args.clone(), this.clone());
            (handle, behavior, state.name.clone())
        };

        // user code may run here so the lock must be released
        let outcome = behavior.execute(&Invocation {
            name: &name,
            this: &this,
            args: &args,
            original: self.inner.original.as_ref(),
        });

        if let Err(fault) = &outcome {
            trace!(double = name.as_str(), %fault, "call threw");
        }

        self.inner.state.lock().store.finalize(handle, outcome.clone());
        outcome
    }

    /// A function value that invokes this double, forwarding its
    /// `this` context.
    ///
    /// Every function returned for the same double (or any of its
    /// clones) compares equal to the others.
    pub fn as_func(&self) -> Func {
        let double = self.clone();
        Func::method(move |this, args| double.invoke_on(this.clone(), args.to_vec()))
            .named(self.name())
            .with_identity(Arc::as_ptr(&self.inner) as usize)
    }

    /// Clears the call history. Configured behaviors are kept.
    pub fn reset_history(&self) {
        let mut state = self.inner.state.lock();
        state.store.reset();
        state.last_callback = None;
        debug!(double = state.name.as_str(), "reset history");
    }

    /// Forgets every configured behavior. The call history is kept.
    pub fn reset_behavior(&self) {
        let mut state = self.inner.state.lock();
        state.table.reset();
        debug!(double = state.name.as_str(), "reset behavior");
    }

    /// Resets both history and behavior.
    pub fn reset(&self) {
        self.reset_history();
        self.reset_behavior();
    }

    /// Scopes the next behavior to the call at `index`, counting from
    /// 0.
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

    /// Scopes behaviors and queries to calls whose arguments match.
    ///
    /// Fails if the matcher holds an expectation that can never be
    /// matched, such as `NaN`.
    ///
    /// ```
    /// use decoy::{args, Behaves, Double, Value};
    ///
    /// # fn main() -> Result<(), decoy::Error> {
    /// let stub = Double::stub();
    /// stub.returns(0);
    /// stub.with_args((42,))?.on_first_call().returns(1).on_second_call().returns(2);
    ///
    /// assert_eq!(stub.invoke(args![42]), Ok(Value::from(1)));
    /// assert_eq!(stub.invoke(args![42]), Ok(Value::from(2)));
    /// assert_eq!(stub.invoke(args![]), Ok(Value::from(0)));
    /// assert_eq!(stub.invoke(args![1]), Ok(Value::from(0)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_args(
        &self,
        matcher: impl InvocationMatcher + 'static,
    ) -> Result<WithArgs, ConfigError> {
        if let Some(reason) = matcher.malformed() {
            return Err(ConfigError::MalformedMatcher { reason });
        }

        Ok(WithArgs::new(self.clone(), Arc::new(matcher)))
    }

    pub(crate) fn set_default(&self, behavior: Behavior) {
        let mut state = self.inner.state.lock();
        debug!(double = state.name.as_str(), ?behavior, "set default behavior");
        state.table.set_default(behavior);
    }

    pub(crate) fn set_for_call(&self, index: usize, behavior: Behavior) {
        let mut state = self.inner.state.lock();
        debug!(double = state.name.as_str(), index, ?behavior, "set behavior for call");
        state.table.set_for_call(index, behavior);
    }

    pub(crate) fn set_for_args(&self, matcher: &SharedMatcher, behavior: Behavior) {
        let mut state = self.inner.state.lock();
        debug!(
            double = state.name.as_str(),
            matcher = %matcher.describe(),
            ?behavior,
            "set behavior for arguments"
        );
        state.table.set_for_args(matcher, behavior);
    }

    pub(crate) fn set_for_args_and_call(
        &self,
        matcher: &SharedMatcher,
        relative: usize,
        behavior: Behavior,
    ) {
        let mut state = self.inner.state.lock();
        debug!(
            double = state.name.as_str(),
            matcher = %matcher.describe(),
            relative,
            ?behavior,
            "set behavior for matching call"
        );
        state.table.set_for_args_and_call(matcher, relative, behavior);
    }
}

impl From<Double> for Func {
    fn from(double: Double) -> Self {
        double.as_func()
    }
}

impl From<&Double> for Func {
    fn from(double: &Double) -> Self {
        double.as_func()
    }
}

impl From<Double> for Value {
    fn from(double: Double) -> Self {
        Value::Func(double.as_func())
    }
}

impl From<&Double> for Value {
    fn from(double: &Double) -> Self {
        Value::Func(double.as_func())
    }
}

impl fmt::Debug for Double {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Double")
            .field("name", &state.name)
            .field("calls", &state.store.len())
            .field("configured", &!state.table.is_empty())
            .field("wraps_original", &self.inner.original.is_some())
            .finish()
    }
}
