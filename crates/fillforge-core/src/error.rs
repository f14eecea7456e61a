//! Error types for fillforge

use thiserror::Error;

/// Main error type for fill operations.
///
/// Every failure aborts the whole `create`/`fill` call; no partial value is
/// returned and nothing is retried internally.
#[derive(Debug, Error)]
pub enum FillError {
    /// The type has no classification and no registered value source.
    #[error("type `{0}` is not registered and cannot be classified for filling")]
    UnregisteredType(&'static str),

    /// A composite or sequence-element type was already under construction
    /// on the current path.
    #[error("circular reference detected while constructing `{0}`")]
    CircularReference(&'static str),

    /// The type has no default factory and no parameterized constructor
    /// whose parameters can all be filled.
    #[error("no usable constructor for type `{0}`")]
    NoUsableConstructor(&'static str),

    /// Map key generation produced a key that is already present.
    #[error("map key generation produced a duplicate key of type `{0}`")]
    DuplicateKey(&'static str),

    /// An interface-like type with no generator, implementation binding,
    /// or mocker.
    #[error("polymorphic type `{0}` has no registered implementation or mocker")]
    UnresolvedPolymorphicType(&'static str),

    /// A finite value source ran out of values.
    #[error("value source for type `{0}` is exhausted")]
    ExhaustedValueSource(&'static str),

    /// Construction descended deeper than the configured limit.
    #[error("construction depth limit of {limit} exceeded at type `{type_name}`")]
    DepthLimitExceeded {
        /// Type that would have been constructed past the limit.
        type_name: &'static str,
        /// The configured limit.
        limit: usize,
    },

    /// Internal error (should not occur unless a descriptor violates its
    /// invariants).
    #[error("internal error: {0}")]
    Internal(String),
}

impl FillError {
    /// Creates an internal error from any message.
    pub fn internal(message: impl Into<String>) -> Self {
        FillError::Internal(message.into())
    }
}

/// Result type alias for fill operations
pub type Result<T> = std::result::Result<T, FillError>;
