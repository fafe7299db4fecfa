//! Shorthands for doubles with a single behavior.
//!
//! ```
//! use decoy::{args, fake, Value};
//!
//! let answer = fake::returns(42);
//! assert_eq!(answer.invoke(args![]), Ok(Value::from(42)));
//! assert!(answer.called_once());
//! ```

use crate::{Behaves, Double, Fault, Func, Value};

/// A fake that does nothing and returns `undefined`.
pub fn new() -> Double {
    Double::stub().named("fake")
}

/// A fake that always returns `value`.
pub fn returns(value: impl Into<Value>) -> Double {
    let fake = new();
    fake.returns(value);
    fake
}

/// A fake that always throws `fault`.
pub fn throws(fault: impl Into<Fault>) -> Double {
    let fake = new();
    fake.throws(fault);
    fake
}

/// A fake returning a pending value that resolves to `value`.
pub fn resolves(value: impl Into<Value>) -> Double {
    let fake = new();
    fake.resolves(value);
    fake
}

/// A fake returning a pending value that rejects with `fault`.
pub fn rejects(fault: impl Into<Fault>) -> Double {
    let fake = new();
    fake.rejects(fault);
    fake
}

/// A fake that calls its last function argument with `args`.
pub fn yields(args: Vec<Value>) -> Double {
    let fake = new();
    fake.yields(args);
    fake
}

/// A fake that calls through to `original`, recording each call.
pub fn wrap(original: Func) -> Double {
    Double::wrap(original)
}
