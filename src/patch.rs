//! Swapping named properties of host objects and swapping them back.

mod object;

pub use object::{Object, Slot};

use std::{
    fmt::{self, Formatter},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
};

use tracing::debug;

use crate::{ConfigError, Fault, Value};

/// An object whose properties can be read and replaced by name.
///
/// Implemented by [`Object`] and by any struct deriving
/// [`Patchable`](derive@crate::Patchable). Writes go through `&self`
/// so a host can be patched while it is shared with the code under
/// test.
pub trait Patchable: Send + Sync {
    /// Returns the current value of a property, `None` if the host has
    /// no such property.
    fn get(&self, property: &str) -> Option<Value>;

    /// Replaces the value of a property, returning the previous one.
    fn set(&self, property: &str, value: Value) -> Result<Value, ConfigError>;

    /// Names of every property the host exposes.
    fn properties(&self) -> Vec<String>;
}

/// A shared reference to a [`Patchable`] host.
///
/// Hosts compare by identity when held in a [`Value`].
#[derive(Clone)]
pub struct Host(Arc<dyn Patchable>);

impl Host {
    pub fn new(host: impl Patchable + 'static) -> Self {
        Host(Arc::new(host))
    }

    pub fn get(&self, property: &str) -> Option<Value> {
        self.0.get(property)
    }

    pub fn set(&self, property: &str, value: impl Into<Value>) -> Result<Value, ConfigError> {
        self.0.set(property, value.into())
    }

    pub fn properties(&self) -> Vec<String> {
        self.0.properties()
    }

    /// Calls the function stored at `property` with this host as its
    /// `this` context.
    ///
    /// Throws a `TypeError` fault if the property is missing or is not
    /// a function.
    pub fn call(&self, property: &str, args: &[Value]) -> Result<Value, Fault> {
        match self.get(property) {
            Some(Value::Func(func)) => func.call(&Value::Host(self.clone()), args),
            Some(other) => Err(Fault::type_error(format!(
                "`{}` is not a function (found {})",
                property,
                other.type_name()
            ))),
            None => Err(Fault::type_error(format!(
                "`{}` is not a function (found undefined)",
                property
            ))),
        }
    }

    pub fn ptr_eq(&self, other: &Host) -> bool {
        // compare the data pointers only, vtables may be duplicated
        // across codegen units
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const u8,
            Arc::as_ptr(&other.0) as *const u8,
        )
    }
}

impl<P: Patchable + 'static> From<Arc<P>> for Host {
    fn from(host: Arc<P>) -> Self {
        Host(host)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("properties", &self.properties())
            .finish()
    }
}

/// Replaces `property` on `host` with `replacement`.
///
/// The property must already exist. The returned [`Patch`] restores
/// the original value; patches on the same property nest as long as
/// they are restored in reverse order.
///
/// ```
/// use decoy::{patch, Host, Object, Value};
///
/// let host = Host::new(Object::new().with("answer", 41));
/// let patch = patch::patch(&host, "answer", 42).unwrap();
/// assert_eq!(host.get("answer"), Some(Value::from(42)));
///
/// patch.restore();
/// assert_eq!(host.get("answer"), Some(Value::from(41)));
/// ```
pub fn patch(
    host: &Host,
    property: &str,
    replacement: impl Into<Value>,
) -> Result<Patch, ConfigError> {
    if host.get(property).is_none() {
        return Err(ConfigError::NonExistentProperty {
            property: property.to_string(),
        });
    }

    let original = host.set(property, replacement)?;
    debug!(property, "patched property");

    Ok(Patch {
        inner: Arc::new(PatchInner {
            host: Arc::downgrade(&host.0),
            property: property.to_string(),
            original,
            restored: AtomicBool::new(false),
        }),
    })
}

/// Handle to a patched property.
///
/// Clones share the same restore state, so restoring any of them
/// restores all of them. A patch does not keep its host alive: the
/// host usually holds the replacement, and the replacement may hold
/// the patch.
#[derive(Clone)]
pub struct Patch {
    inner: Arc<PatchInner>,
}

struct PatchInner {
    host: Weak<dyn Patchable>,
    property: String,
    original: Value,
    restored: AtomicBool,
}

impl Patch {
    /// Writes the original value back onto the property.
    ///
    /// Restoring twice is a no-op. If the host was dropped or no
    /// longer accepts the property the restore is skipped.
    pub fn restore(&self) {
        let PatchInner {
            host,
            property,
            original,
            restored,
        } = self.inner.as_ref();

        if restored.swap(true, Ordering::SeqCst) {
            debug!(property = property.as_str(), "property already restored");
            return;
        }

        let Some(host) = host.upgrade() else {
            debug!(property = property.as_str(), "host dropped, nothing to restore");
            return;
        };

        match host.set(property, original.clone()) {
            Ok(_) => debug!(property = property.as_str(), "restored property"),
            Err(error) => debug!(
                property = property.as_str(),
                %error,
                "restore mismatch, leaving host as is"
            ),
        }
    }

    pub fn is_restored(&self) -> bool {
        self.inner.restored.load(Ordering::SeqCst)
    }

    /// The patched host, unless it was dropped since.
    pub fn host(&self) -> Option<Host> {
        self.inner.host.upgrade().map(Host)
    }

    pub fn property(&self) -> &str {
        &self.inner.property
    }

    /// The value the property held before it was patched.
    pub fn original(&self) -> &Value {
        &self.inner.original
    }
}

impl fmt::Debug for Patch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("property", &self.inner.property)
            .field("original", &self.inner.original)
            .field("restored", &self.is_restored())
            .finish()
    }
}
