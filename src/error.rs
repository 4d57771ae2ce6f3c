use thiserror::Error;

macro_rules! invalid_type_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidType($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidType(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure is synchronous and leaves the item untouched: an operation that returns an
/// error has had no visible effect on the property it addressed.
///
/// # Error Categories
///
/// ## Caller Errors
/// - [`Error::NullArgument`] - A required argument was empty or absent
/// - [`Error::InvalidIdentity`] - An item was created with an unrecognized type name
/// - [`Error::CountUnderflow`] - The reference count was decremented more often than incremented
/// - [`Error::CountOverflow`] - The reference count was incremented past its maximum
///
/// ## Storage Policy Errors
/// - [`Error::InvalidType`] - A value or an existing property shape violates the storage policy
/// - [`Error::UnknownType`] - A type name could not be resolved to a model kind
///
/// ## Synchronization Errors
/// - [`Error::LockError`] - The reference count lock was poisoned
///
/// # Examples
///
/// ```rust
/// use spdxstore::{Error, TypeCatalog, TypedItem};
///
/// let catalog = TypeCatalog::spdx();
/// let item = TypedItem::new(&catalog, "urn:doc", "SPDXRef-1", "Package")?;
///
/// item.set_value("name", "foo")?;
/// match item.add_value_to_list("name", "bar") {
///     Err(Error::InvalidType(message)) => println!("rejected: {message}"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// # Ok::<(), spdxstore::Error>(())
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent.
    ///
    /// Raised for empty property names, empty document scopes and [`crate::RawValue::Null`].
    /// This is always a caller bug and never worth retrying.
    #[error("{0} can not be null")]
    NullArgument(&'static str),

    /// A value, or the shape of an existing property, violates the storage policy.
    ///
    /// Covers rich model objects that were not converted to a [`crate::Reference`], raw
    /// sequences passed where a scalar is expected, unsupported scalar kinds, and
    /// scalar-vs-collection mismatches on an existing property.
    #[error("Invalid type - {0}")]
    InvalidType(String),

    /// The reference count was decremented while already at zero.
    #[error("Usage count underflow - usage count decremented more than incremented")]
    CountUnderflow,

    /// The reference count was incremented while already at `u32::MAX`.
    #[error("Usage count overflow - usage count incremented past its maximum")]
    CountOverflow,

    /// A type name could not be resolved to a model kind.
    #[error("Unknown type - {0}")]
    UnknownType(String),

    /// A typed item was created with a type name outside the configured catalog.
    #[error("Invalid identity - {0} is not a recognized model type")]
    InvalidIdentity(String),

    /// Failed to lock target.
    ///
    /// Another thread panicked while holding the reference count lock.
    #[error("Failed to lock target")]
    LockError,
}
