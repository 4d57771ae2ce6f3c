//! Model kinds and the collaborators that resolve stored values to them.
//!
//! Assignability questions ("may the value stored under this property be viewed as a `Package`?")
//! need knowledge the storage cell does not own: which model kind a type name denotes, and which
//! enumeration an individual URI belongs to. Both are injected through the [`TypeResolver`] and
//! [`EnumRegistry`] traits.
//!
//! # Key Components
//!
//! - [`Kind`] - Target of an assignability check
//! - [`EnumConstant`] - An enumeration member resolved from an individual URI
//! - [`TypeResolver`] - Type name to [`Kind`] resolution, including the kind hierarchy
//! - [`EnumRegistry`] - Individual URI to [`EnumConstant`] resolution
//! - [`TypeCatalog`] - Immutable set of recognized model types, also usable as resolver
//! - [`EnumTable`] - Immutable URI to constant table, usable as registry

mod catalog;
mod enums;

pub use catalog::TypeCatalog;
pub use enums::EnumTable;

use tracing::error;

use crate::{
    value::{ScalarKind, Value},
    Result,
};

/// The target of an assignability check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Accepts every stored value
    Any,
    /// One of the built-in scalar kinds
    Scalar(ScalarKind),
    /// A model class, by type name
    Model(String),
    /// An enumeration family, by name
    Enum(String),
}

impl Kind {
    /// Convenience constructor for [`Kind::Model`]
    pub fn model(type_name: impl Into<String>) -> Self {
        Kind::Model(type_name.into())
    }

    /// Convenience constructor for [`Kind::Enum`]
    pub fn enumeration(family: impl Into<String>) -> Self {
        Kind::Enum(family.into())
    }

    /// Returns true if `value` can be viewed as this kind
    ///
    /// A value matching the target scalar kind is always assignable. References are resolved
    /// through `resolver`; a type name the resolver does not know makes the value unassignable
    /// and is logged. Sentinel individuals are assignable to everything, other individuals only
    /// through the enumeration they belong to.
    ///
    /// ## Arguments
    /// * `value`       - The stored value to check
    /// * `resolver`    - Resolves reference type names to kinds
    /// * `registry`    - Resolves individual URIs to enumeration constants
    pub fn accepts(
        &self,
        value: &Value,
        resolver: &dyn TypeResolver,
        registry: &dyn EnumRegistry,
    ) -> bool {
        match self {
            Kind::Any => return true,
            Kind::Scalar(kind) if *kind == value.kind() => return true,
            _ => {}
        }

        match value {
            Value::Reference(reference) => match resolver.type_to_kind(reference.type_name()) {
                Ok(kind) => resolver.is_assignable(self, &kind),
                Err(e) => {
                    error!(
                        type_name = reference.type_name(),
                        id = reference.id(),
                        error = %e,
                        "Error converting typed value to kind"
                    );
                    false
                }
            },
            Value::Individual(individual) => {
                if individual.is_sentinel() {
                    return true;
                }
                match registry.uri_to_enum(individual.uri()) {
                    Some(constant) => resolver.is_assignable(self, &constant.kind()),
                    None => false,
                }
            }
            _ => false,
        }
    }
}

/// An enumeration member resolved from an individual URI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    /// Name of the enumeration the constant belongs to
    pub family: String,
    /// Name of the constant within its enumeration
    pub name: String,
}

impl EnumConstant {
    /// Create a new enumeration constant
    pub fn new(family: impl Into<String>, name: impl Into<String>) -> Self {
        EnumConstant {
            family: family.into(),
            name: name.into(),
        }
    }

    /// The kind of the enumeration this constant belongs to
    pub fn kind(&self) -> Kind {
        Kind::Enum(self.family.clone())
    }
}

/// Resolves model type names to kinds.
pub trait TypeResolver: Send + Sync {
    /// Resolve a model type name
    ///
    /// ## Arguments
    /// * `type_name` - The type name carried by a [`crate::Reference`]
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownType`] if the name does not denote a model kind.
    fn type_to_kind(&self, type_name: &str) -> Result<Kind>;

    /// Returns true if a value of kind `actual` can be viewed as `target`
    ///
    /// The default treats [`Kind::Any`] as universal and otherwise requires equality.
    /// Resolvers with a class hierarchy override this.
    fn is_assignable(&self, target: &Kind, actual: &Kind) -> bool {
        *target == Kind::Any || target == actual
    }
}

/// Resolves individual URIs to enumeration constants.
///
/// The two sentinel URIs are recognized by the store itself and never reach the registry.
pub trait EnumRegistry: Send + Sync {
    /// Look up the enumeration constant for `uri`, if any
    fn uri_to_enum(&self, uri: &str) -> Option<EnumConstant>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{spdx_enums, UnknownResolver},
        IndividualUri, Reference,
    };

    #[test]
    fn test_any_accepts_everything() {
        let catalog = TypeCatalog::spdx();
        let enums = spdx_enums();
        for value in [
            Value::from("x"),
            Value::Int(1),
            Value::from(Reference::new("SPDXRef-1", "NotAType")),
            Value::from(IndividualUri::new("urn:unknown")),
        ] {
            assert!(Kind::Any.accepts(&value, &catalog, &enums));
        }
    }

    #[test]
    fn test_scalar_kinds() {
        let catalog = TypeCatalog::spdx();
        let enums = spdx_enums();
        let string = Kind::Scalar(ScalarKind::String);
        assert!(string.accepts(&Value::from("x"), &catalog, &enums));
        assert!(!string.accepts(&Value::from(true), &catalog, &enums));
        assert!(Kind::Scalar(ScalarKind::Reference).accepts(
            &Value::from(Reference::new("SPDXRef-1", "NotAType")),
            &catalog,
            &enums
        ));
    }

    #[test]
    fn test_reference_resolution() {
        let catalog = TypeCatalog::spdx();
        let enums = spdx_enums();
        let package = Value::from(Reference::new("SPDXRef-1", "Package"));
        assert!(Kind::model("Package").accepts(&package, &catalog, &enums));
        assert!(Kind::model("SpdxElement").accepts(&package, &catalog, &enums));
        assert!(!Kind::model("File").accepts(&package, &catalog, &enums));
    }

    #[test]
    fn test_unresolvable_reference_is_not_assignable() {
        let enums = spdx_enums();
        let value = Value::from(Reference::new("SPDXRef-1", "Package"));
        assert!(!Kind::model("Package").accepts(&value, &UnknownResolver, &enums));
    }

    #[test]
    fn test_individuals() {
        let catalog = TypeCatalog::spdx();
        let enums = spdx_enums();
        let target = Kind::enumeration("ChecksumAlgorithm");
        assert!(target.accepts(&Value::from(IndividualUri::none()), &catalog, &enums));
        assert!(Kind::model("Package").accepts(
            &Value::from(IndividualUri::no_assertion()),
            &catalog,
            &enums
        ));
        assert!(target.accepts(
            &Value::from(IndividualUri::new(
                "http://spdx.org/rdf/terms#checksumAlgorithm_sha1"
            )),
            &catalog,
            &enums
        ));
        assert!(!target.accepts(
            &Value::from(IndividualUri::new(
                "http://spdx.org/rdf/terms#relationshipType_describes"
            )),
            &catalog,
            &enums
        ));
        assert!(!target.accepts(
            &Value::from(IndividualUri::new("urn:unknown")),
            &catalog,
            &enums
        ));
    }
}
