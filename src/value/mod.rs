//! Stored values and the closed set of storable scalar kinds.
//!
//! A typed item stores only [`Value`]s: strings, booleans, integers, [`Reference`]s to other
//! typed items, and [`IndividualUri`]s. Callers offer values as [`RawValue`], which may carry
//! shapes the store refuses (model objects, raw sequences, floats, ...). The conversion
//! [`RawValue::into_value`] is the only way in, so nothing un-checked ever reaches the store.
//!
//! # Key Components
//!
//! - [`Value`] - A storable scalar
//! - [`ScalarKind`] - The five scalar kinds, used for diagnostics and assignability
//! - [`Reference`] - Identity-only pointer to another typed item
//! - [`IndividualUri`] - Enumeration constant or sentinel URI
//! - [`RawValue`] - A caller-provided value before the storage policy is applied
//! - [`ModelObject`] - Rich domain objects, which must be converted before storing

mod individual;
mod raw;
mod reference;

use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

pub use individual::{IndividualUri, URI_VALUE_NOASSERTION, URI_VALUE_NONE};
pub use raw::RawValue;
pub use reference::{ModelObject, Reference};

/// The kinds of scalar the store accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    /// UTF-8 string
    String,
    /// Boolean flag
    Bool,
    /// Signed integer
    Int,
    /// Reference to another typed item
    Reference,
    /// Enumeration constant or sentinel URI
    Individual,
}

/// A scalar that satisfied the storage policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// UTF-8 string
    String(String),
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Reference to another typed item
    Reference(Reference),
    /// Enumeration constant or sentinel URI
    Individual(IndividualUri),
}

impl Value {
    /// The scalar kind of this value
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::String(_) => ScalarKind::String,
            Value::Bool(_) => ScalarKind::Bool,
            Value::Int(_) => ScalarKind::Int,
            Value::Reference(_) => ScalarKind::Reference,
            Value::Individual(_) => ScalarKind::Individual,
        }
    }

    /// The string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The reference payload, if this is a reference
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(value) => Some(value),
            _ => None,
        }
    }

    /// The individual payload, if this is an individual value
    pub fn as_individual(&self) -> Option<&IndividualUri> {
        match self {
            Value::Individual(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => write!(f, "\"{value}\""),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Reference(value) => write!(f, "{value}"),
            Value::Individual(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}

impl From<IndividualUri> for Value {
    fn from(value: IndividualUri) -> Self {
        Value::Individual(value)
    }
}
