use parking_lot::Mutex;
use tracing::debug;

use crate::{
    patch::{self, Host, Patch},
    ConfigError, Double, Func, Value,
};

/// Owns the doubles and patches of a test so they can be reset and
/// restored together.
///
/// Patches are restored in reverse order of creation, so nested
/// patches of the same property unwind back to the very first value.
/// Dropping the sandbox restores every patch it still holds.
///
/// ```
/// use decoy::{args, Behaves, Host, Object, Sandbox, Value};
///
/// # fn main() -> Result<(), decoy::Error> {
/// let host = Host::new(Object::new().with("answer", 41));
/// {
///     let sandbox = Sandbox::new();
///     let stub = sandbox.stub_on(&host, "answer")?;
///     stub.returns(42);
///
///     assert_eq!(host.call("answer", &args![]), Ok(Value::from(42)));
/// }
/// assert_eq!(host.get("answer"), Some(Value::from(41)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Sandbox {
    doubles: Mutex<Vec<Double>>,
    patches: Mutex<Vec<Patch>>,
}

impl Sandbox {
    pub fn new() -> Self {
        Sandbox::default()
    }

    pub fn stub(&self) -> Double {
        self.track(Double::stub())
    }

    pub fn spy(&self) -> Double {
        self.track(Double::spy())
    }

    pub fn wrap(&self, original: Func) -> Double {
        self.track(Double::wrap(original))
    }

    /// See [`Double::spy_on`]. The patch is restored with the sandbox.
    pub fn spy_on(&self, host: &Host, property: &str) -> Result<Double, ConfigError> {
        let spy = Double::spy_on(host, property)?;
        self.track_binding(&spy);
        Ok(self.track(spy))
    }

    /// See [`Double::stub_on`]. The patch is restored with the sandbox.
    pub fn stub_on(&self, host: &Host, property: &str) -> Result<Double, ConfigError> {
        let stub = Double::stub_on(host, property)?;
        self.track_binding(&stub);
        Ok(self.track(stub))
    }

    /// Replaces any property, data or function, with `value` until the
    /// sandbox is restored.
    pub fn replace(
        &self,
        host: &Host,
        property: &str,
        value: impl Into<Value>,
    ) -> Result<Patch, ConfigError> {
        let patch = patch::patch(host, property, value)?;
        self.patches.lock().push(patch.clone());
        Ok(patch)
    }

    /// Restores every patch, newest first.
    ///
    /// Patches that were already restored individually are skipped.
    pub fn restore(&self) {
        // restoring writes to hosts, which may run user code
        let patches = std::mem::take(&mut *self.patches.lock());
        debug!(patches = patches.len(), "restoring sandbox");

        for patch in patches.iter().rev() {
            patch.restore();
        }
    }

    pub fn reset_history(&self) {
        for double in self.doubles() {
            double.reset_history();
        }
    }

    pub fn reset_behavior(&self) {
        for double in self.doubles() {
            double.reset_behavior();
        }
    }

    pub fn reset(&self) {
        for double in self.doubles() {
            double.reset();
        }
    }

    fn doubles(&self) -> Vec<Double> {
        self.doubles.lock().clone()
    }

    fn track(&self, double: Double) -> Double {
        self.doubles.lock().push(double.clone());
        double
    }

    fn track_binding(&self, double: &Double) {
        if let Some(patch) = double.binding() {
            self.patches.lock().push(patch);
        }
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        self.restore();
    }
}
