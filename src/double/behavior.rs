use tracing::trace;

use crate::{Deferred, Fault, Func, Value};

/// What a double does when it is invoked.
///
/// Set through the methods of [`Behaves`](crate::Behaves) rather
/// than built directly.
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Returns the value.
    ReturnsValue(Value),
    /// Throws the fault to the caller.
    ThrowsError(Fault),
    /// Returns a pending value that resolves to the value.
    ResolvesWith(Value),
    /// Returns a pending value that rejects with the fault.
    RejectsWith(Fault),
    /// Delegates to the function, with the same `this` and arguments.
    CallsFake(Func),
    /// Calls the last function-typed argument with the given arguments.
    YieldsArgs(Vec<Value>),
    /// Returns a pending value resolving to the argument at the index.
    ResolvesArgAt(usize),
    /// Returns a pending value rejecting with the argument at the index.
    ThrowsArgAt(usize),
    /// Returns the argument at the index.
    ReturnsArgAt(usize),
    /// Returns the `this` context.
    ReturnsThis,
    /// Calls the wrapped original function, if any.
    CallsThrough,
}

/// Everything a behavior may need to know about the call it answers.
pub(crate) struct Invocation<'a> {
    pub name: &'a str,
    pub this: &'a Value,
    pub args: &'a [Value],
    pub original: Option<&'a Func>,
}

impl Behavior {
    pub(crate) fn execute(&self, invocation: &Invocation<'_>) -> Result<Value, Fault> {
        let Invocation {
            name,
            this,
            args,
            original,
        } = invocation;

        match self {
            Behavior::ReturnsValue(value) => Ok(value.clone()),
            Behavior::ThrowsError(fault) => Err(fault.clone()),
            Behavior::ResolvesWith(value) => Ok(Deferred::resolved(value.clone()).into()),
            Behavior::RejectsWith(fault) => Ok(Deferred::rejected(fault.clone()).into()),
            Behavior::CallsFake(fake) => fake.call(this, args),
            Behavior::YieldsArgs(yielded) => {
                let callback = args.iter().rev().find_map(Value::as_func).ok_or_else(|| {
                    Fault::type_error(format!(
                        "{} expected to yield, but no callback was passed.",
                        name
                    ))
                })?;

                trace!(double = *name, "yielding to callback");
                callback.invoke(yielded)?;
                Ok(Value::Undefined)
            }
            Behavior::ResolvesArgAt(position) => {
                let deferred = match args.get(*position) {
                    Some(arg) => Deferred::resolved(arg.clone()),
                    None => Deferred::rejected(missing_arg(*position)),
                };
                Ok(deferred.into())
            }
            Behavior::ThrowsArgAt(position) => {
                let fault = match args.get(*position) {
                    Some(arg) => Fault::thrown(arg.clone()),
                    None => missing_arg(*position),
                };
                Ok(Deferred::rejected(fault).into())
            }
            Behavior::ReturnsArgAt(position) => Ok(args.get(*position).cloned().unwrap_or_default()),
            Behavior::ReturnsThis => Ok((*this).clone()),
            Behavior::CallsThrough => match original {
                Some(original) => original.call(this, args),
                None => Ok(Value::Undefined),
            },
        }
    }
}

fn missing_arg(position: usize) -> Fault {
    Fault::type_error(format!("argument at index {} is not present", position))
}
