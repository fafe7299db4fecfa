/// Errors raised while configuring a double or patching a host.
///
/// These are returned immediately from the configuring call, never
/// deferred until the double is invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed matcher: {reason}")]
    MalformedMatcher { reason: String },
    #[error("cannot patch non-existent property `{property}`")]
    NonExistentProperty { property: String },
    #[error("attempted to wrap `{property}` which is not a function")]
    NotAFunction { property: String },
    #[error("host does not accept property `{property}`")]
    UnknownProperty { property: String },
}

/// Querying a call that was never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("call {index} is out of range: {len} call(s) recorded")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Any error `decoy` can return outside of a double's own faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}
