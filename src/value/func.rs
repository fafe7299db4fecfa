use std::{
    fmt::{self, Formatter},
    sync::Arc,
};

use super::{Fault, Value};

type Callable = dyn Fn(&Value, &[Value]) -> Result<Value, Fault> + Send + Sync;

/// A shared, callable function value.
///
/// Cloning a `Func` is cheap and the clone compares equal to the
/// original. Two separately created functions never compare equal,
/// even if they do the same thing, unless they stand in for the same
/// [`Double`](crate::Double).
#[derive(Clone)]
pub struct Func {
    name: Option<Arc<str>>,
    callable: Arc<Callable>,
    // address of an allocation the callable keeps alive, shared by every
    // function standing in for the same double
    identity: Option<usize>,
}

impl Func {
    /// Creates a function that ignores its `this` context.
    ///
    /// ```
    /// use decoy::{Func, Value};
    ///
    /// let double = Func::new(|args| Ok(Value::from(args.len() as i64 * 2)));
    /// assert_eq!(double.invoke(&[Value::Null]).unwrap(), Value::from(2));
    /// ```
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, Fault> + Send + Sync + 'static) -> Self {
        Func::method(move |_, args| f(args))
    }

    /// Creates a function that receives the `this` context it was
    /// invoked on.
    pub fn method(
        f: impl Fn(&Value, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    ) -> Self {
        Func {
            name: None,
            callable: Arc::new(f),
            identity: None,
        }
    }

    /// A function that does nothing and returns `undefined`.
    pub fn noop() -> Self {
        Func::new(|_| Ok(Value::Undefined))
    }

    /// Labels the function for debug output.
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, Fault> {
        (self.callable)(this, args)
    }

    /// Calls the function with an `undefined` context.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, Fault> {
        self.call(&Value::Undefined, args)
    }

    /// Gives the function the identity of an allocation its callable
    /// owns, so separately built functions over it compare equal.
    pub(crate) fn with_identity(mut self, identity: usize) -> Self {
        self.identity = Some(identity);
        self
    }

    fn identity(&self) -> usize {
        self.identity
            .unwrap_or_else(|| Arc::as_ptr(&self.callable) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &Func) -> bool {
        self.identity() == other.identity()
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {}]", name),
            None => f.write_str("[Function]"),
        }
    }
}
