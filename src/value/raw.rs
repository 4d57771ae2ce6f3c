//! Unchecked candidate values and the storage type policy.
//!
//! Callers hand a [`RawValue`] to the store; [`RawValue::into_value`] is the single gate that
//! turns it into a storable [`Value`] or rejects it. Everything outside the five scalar kinds is
//! rejected with [`Error::InvalidType`], and [`RawValue::Null`] with [`Error::NullArgument`].

use std::sync::Arc;

use crate::{
    value::{IndividualUri, ModelObject, Reference, Value},
    Error, Result,
};

/// A value as offered by a caller, before the storage policy has been applied.
#[derive(Clone, Debug)]
pub enum RawValue {
    /// No value at all
    Null,
    /// A string scalar
    String(String),
    /// A boolean scalar
    Bool(bool),
    /// An integer scalar
    Int(i64),
    /// A floating point number; never storable
    Float(f64),
    /// Raw binary data; never storable
    Bytes(Vec<u8>),
    /// A reference to another typed item
    Reference(Reference),
    /// An enumeration constant or sentinel URI
    Individual(IndividualUri),
    /// A raw sequence; collections must be built with the list operations instead
    List(Vec<RawValue>),
    /// A rich model object; must be converted to a [`Reference`] first
    Object(Arc<dyn ModelObject>),
}

impl RawValue {
    /// Short description of the value shape, used in diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::String(_) => "string",
            RawValue::Bool(_) => "boolean",
            RawValue::Int(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Bytes(_) => "bytes",
            RawValue::Reference(_) => "reference",
            RawValue::Individual(_) => "individual",
            RawValue::List(_) => "list",
            RawValue::Object(_) => "model object",
        }
    }

    /// Apply the storage policy and convert into a storable scalar
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for [`RawValue::Null`] and [`Error::InvalidType`] for
    /// model objects, raw sequences and every unsupported scalar kind.
    pub fn into_value(self) -> Result<Value> {
        match self {
            RawValue::String(value) => Ok(Value::String(value)),
            RawValue::Bool(value) => Ok(Value::Bool(value)),
            RawValue::Int(value) => Ok(Value::Int(value)),
            RawValue::Reference(value) => Ok(Value::Reference(value)),
            RawValue::Individual(value) => Ok(Value::Individual(value)),
            RawValue::Null => Err(Error::NullArgument("Value")),
            RawValue::Object(object) => Err(invalid_type_error!(
                "Can not store model object {} in store. Convert to Reference first",
                object.to_reference()
            )),
            RawValue::List(_) => Err(invalid_type_error!(
                "Can not store list values directly. Use add_value_to_list"
            )),
            other => Err(invalid_type_error!(
                "{} is not a supported kind to be stored",
                other.shape()
            )),
        }
    }
}

impl TryFrom<RawValue> for Value {
    type Error = Error;

    fn try_from(raw: RawValue) -> Result<Self> {
        raw.into_value()
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(value) => RawValue::String(value),
            Value::Bool(value) => RawValue::Bool(value),
            Value::Int(value) => RawValue::Int(value),
            Value::Reference(value) => RawValue::Reference(value),
            Value::Individual(value) => RawValue::Individual(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<Reference> for RawValue {
    fn from(value: Reference) -> Self {
        RawValue::Reference(value)
    }
}

impl From<&Reference> for RawValue {
    fn from(value: &Reference) -> Self {
        RawValue::Reference(value.clone())
    }
}

impl From<IndividualUri> for RawValue {
    fn from(value: IndividualUri) -> Self {
        RawValue::Individual(value)
    }
}

impl From<Arc<dyn ModelObject>> for RawValue {
    fn from(value: Arc<dyn ModelObject>) -> Self {
        RawValue::Object(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestObject;

    #[test]
    fn test_scalars_pass_policy() {
        assert_eq!(
            RawValue::from("foo").into_value().unwrap(),
            Value::String("foo".to_string())
        );
        assert_eq!(RawValue::from(true).into_value().unwrap(), Value::Bool(true));
        assert_eq!(RawValue::from(42i64).into_value().unwrap(), Value::Int(42));
        assert_eq!(
            RawValue::from(IndividualUri::none()).into_value().unwrap(),
            Value::Individual(IndividualUri::none())
        );
    }

    #[test]
    fn test_model_object_rejected() {
        let object: Arc<dyn ModelObject> = Arc::new(TestObject::new("SPDXRef-1", "Package"));
        match RawValue::from(object).into_value() {
            Err(Error::InvalidType(message)) => assert!(message.contains("Package:SPDXRef-1")),
            other => panic!("Expected InvalidType, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_shapes_rejected() {
        for raw in [
            RawValue::Float(1.5),
            RawValue::Bytes(vec![1, 2, 3]),
            RawValue::from(vec!["a", "b"]),
        ] {
            assert!(matches!(raw.into_value(), Err(Error::InvalidType(_))));
        }
    }

    #[test]
    fn test_null_rejected() {
        assert_eq!(
            RawValue::from(None::<bool>).into_value(),
            Err(Error::NullArgument("Value"))
        );
    }
}
