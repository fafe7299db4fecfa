use super::Value;

/// An error thrown by a double, a fake, or a wrapped original.
///
/// Any value can be thrown. Values that are not already errors are
/// kept as the fault's payload so they can be inspected after the
/// fact.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct Fault {
    name: String,
    message: String,
    payload: Option<Box<Value>>,
}

impl Fault {
    /// Creates a plain `Error` fault.
    pub fn new(message: impl Into<String>) -> Self {
        Fault::with_name("Error", message)
    }

    pub fn with_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Fault {
            name: name.into(),
            message: message.into(),
            payload: None,
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Fault::with_name("TypeError", message)
    }

    /// Turns an arbitrary value into a fault.
    ///
    /// Error values are unwrapped as-is, anything else becomes the
    /// payload of a fault whose message is the value's display form.
    pub fn thrown(value: Value) -> Self {
        match value {
            Value::Error(fault) => fault,
            other => Fault {
                name: "Thrown".to_string(),
                message: other.to_string(),
                payload: Some(Box::new(other)),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The non-error value that was thrown, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_deref()
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::new(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::new(message)
    }
}
