//! Dynamically typed values flowing through a double.

mod deferred;
mod fault;
mod func;

pub use deferred::{Deferred, Settled};
pub use fault::Fault;
pub use func::Func;

use std::{
    collections::BTreeMap,
    fmt::{self, Formatter},
    sync::Arc,
};

use crate::patch::Host;

/// A value passed to, returned from, or thrown by a double.
///
/// Scalars, strings, lists, and maps compare structurally. Functions,
/// hosts, and pending values compare by identity: two of them are
/// equal only if they are clones of the same handle.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Func(Func),
    Host(Host),
    Error(Fault),
    Pending(Deferred),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }

    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Value::Error(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn as_pending(&self) -> Option<&Deferred> {
        match self {
            Value::Pending(deferred) => Some(deferred),
            _ => None,
        }
    }

    /// Name of the variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Func(_) => "function",
            Value::Host(_) => "host",
            Value::Error(_) => "error",
            Value::Pending(_) => "pending",
        }
    }

    /// Returns why this value can never be matched deterministically,
    /// if that is the case.
    ///
    /// `NaN` is never equal to anything and a pending value is only
    /// ever equal to itself, so expectations holding either are
    /// rejected when a matcher is configured.
    pub(crate) fn unmatchable(&self) -> Option<String> {
        match self {
            Value::Float(f) if f.is_nan() => Some("NaN never matches".to_string()),
            Value::Pending(_) => Some("pending values cannot be matched".to_string()),
            Value::List(list) => list.iter().find_map(Value::unmatchable),
            Value::Map(map) => map.values().find_map(Value::unmatchable),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                int_eq_float(*i, *f)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::Host(a), Value::Host(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// exact: `i as f64` would round integers past 2^53
fn int_eq_float(i: i64, f: f64) -> bool {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

    f.fract() == 0.0 && (-BOUND..BOUND).contains(&f) && f as i64 == i
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(list) => f.debug_list().entries(list).finish(),
            Value::Map(map) => f.debug_map().entries(map).finish(),
            Value::Func(func) => write!(f, "{:?}", func),
            Value::Host(host) => write!(f, "{:?}", host),
            Value::Error(fault) => write!(f, "[{}]", fault),
            Value::Pending(deferred) => write!(f, "{:?}", deferred),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => write!(f, "{:?}", other),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )+
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(list: Vec<T>) -> Self {
        Value::List(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Undefined, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Func> for Value {
    fn from(func: Func) -> Self {
        Value::Func(func)
    }
}

impl From<Host> for Value {
    fn from(host: Host) -> Self {
        Value::Host(host)
    }
}

impl From<Fault> for Value {
    fn from(fault: Fault) -> Self {
        Value::Error(fault)
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Value::Pending(deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_variants() {
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_ne!(Value::from(2), Value::from(2.5));
        assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(1), Value::from(f64::INFINITY));
    }

    #[test]
    fn large_integers_compare_exactly_with_floats() {
        let above = Value::Int((1 << 53) + 1);
        let float = Value::Float((1u64 << 53) as f64);

        assert_ne!(above, float);
        assert_eq!(Value::Int(1 << 53), float);
        assert_ne!(Value::Int(i64::MAX), Value::Float(i64::MAX as f64));
        assert_eq!(Value::Int(i64::MIN), Value::Float(i64::MIN as f64));
    }

    #[test]
    fn functions_compare_by_identity() {
        let a = Func::noop();
        let b = Func::noop();

        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn maps_compare_structurally() {
        let a: Value = [("message", "Resolved value")].into_iter().collect();
        let b: Value = [("message", "Resolved value")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn unmatchable_values_are_found_in_nested_lists() {
        let value = Value::from(vec![Value::from(1), Value::from(vec![f64::NAN])]);
        assert!(value.unmatchable().is_some());
        assert!(Value::from(vec![1, 2]).unmatchable().is_none());
    }

    #[test]
    fn strings_display_unquoted() {
        assert_eq!(Value::from("john").to_string(), "john");
        assert_eq!(format!("{:?}", Value::from("john")), "\"john\"");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }
}
