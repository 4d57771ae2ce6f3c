//! The catalog of recognized model type names.
//!
//! A [`TypeCatalog`] is process-wide configuration: it is built once at startup, never mutated
//! afterwards, and handed by reference to [`crate::TypedItem::new`] (share it across threads with
//! an `Arc`). Besides validating item identities it doubles as a [`TypeResolver`] that maps every
//! recognized type name to [`Kind::Model`] and answers assignability along the configured parent
//! chain.

use std::collections::{HashMap, HashSet};

use crate::{
    schema::{Kind, TypeResolver},
    Error, Result,
};

/// Model classes of the SPDX 2.x object model.
const SPDX_CLASSES: &[&str] = &[
    "SpdxDocument",
    "Package",
    "CreationInfo",
    "Checksum",
    "AnyLicenseInfo",
    "SimpleLicensingInfo",
    "ConjunctiveLicenseSet",
    "DisjunctiveLicenseSet",
    "ExtractedLicensingInfo",
    "License",
    "ListedLicense",
    "LicenseException",
    "ListedLicenseException",
    "OrLaterOperator",
    "WithExceptionOperator",
    "File",
    "Review",
    "PackageVerificationCode",
    "Annotation",
    "Relationship",
    "SpdxItem",
    "SpdxElement",
    "SpdxNoneElement",
    "SpdxNoAssertionElement",
    "ExternalDocumentRef",
    "ExternalRef",
    "ReferenceType",
    "Snippet",
    "NoAssertionLicense",
    "NoneLicense",
    "ExternalSpdxElement",
    "ExternalExtractedLicenseInfo",
    "SinglePointer",
    "StartEndPointer",
    "ByteOffsetPointer",
    "LineCharPointer",
    "CompoundPointer",
    "CrossRef",
];

/// Direct superclass of each SPDX model class that has one.
const SPDX_PARENTS: &[(&str, &str)] = &[
    ("SpdxDocument", "SpdxElement"),
    ("SpdxItem", "SpdxElement"),
    ("Package", "SpdxItem"),
    ("File", "SpdxItem"),
    ("Snippet", "SpdxItem"),
    ("SpdxNoneElement", "SpdxElement"),
    ("SpdxNoAssertionElement", "SpdxElement"),
    ("ExternalSpdxElement", "SpdxElement"),
    ("SimpleLicensingInfo", "AnyLicenseInfo"),
    ("License", "SimpleLicensingInfo"),
    ("ListedLicense", "License"),
    ("ExtractedLicensingInfo", "SimpleLicensingInfo"),
    ("ExternalExtractedLicenseInfo", "ExtractedLicensingInfo"),
    ("ConjunctiveLicenseSet", "AnyLicenseInfo"),
    ("DisjunctiveLicenseSet", "AnyLicenseInfo"),
    ("OrLaterOperator", "AnyLicenseInfo"),
    ("WithExceptionOperator", "AnyLicenseInfo"),
    ("NoAssertionLicense", "AnyLicenseInfo"),
    ("NoneLicense", "AnyLicenseInfo"),
    ("ListedLicenseException", "LicenseException"),
    ("StartEndPointer", "CompoundPointer"),
    ("ByteOffsetPointer", "SinglePointer"),
    ("LineCharPointer", "SinglePointer"),
];

/// Immutable set of recognized model type names, with their class hierarchy.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashSet<String>,
    parents: HashMap<String, String>,
}

impl TypeCatalog {
    /// Create a catalog recognizing exactly `types`, with no hierarchy
    ///
    /// ## Arguments
    /// * `types` - The recognized model type names
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeCatalog {
            types: types.into_iter().map(Into::into).collect(),
            parents: HashMap::new(),
        }
    }

    /// The catalog of the SPDX 2.x model classes
    #[must_use]
    pub fn spdx() -> Self {
        SPDX_PARENTS.iter().fold(
            TypeCatalog::new(SPDX_CLASSES.iter().copied()),
            |catalog, (child, parent)| catalog.with_parent(*child, *parent),
        )
    }

    /// Declare `parent` as the direct superclass of `child`
    ///
    /// Both names become recognized types.
    #[must_use]
    pub fn with_parent(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        let child = child.into();
        let parent = parent.into();
        self.types.insert(child.clone());
        self.types.insert(parent.clone());
        self.parents.insert(child, parent);
        self
    }

    /// Returns true if `type_name` is a recognized model type
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains(type_name)
    }

    /// Number of recognized model types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type is recognized
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns true if `type_name` is `ancestor` or inherits from it
    ///
    /// ## Arguments
    /// * `type_name`   - The type to start from
    /// * `ancestor`    - The type to look for along the parent chain
    pub fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        let mut current = Some(type_name);
        // bounded walk, guards against a cyclic parent table
        for _ in 0..=self.parents.len() {
            match current {
                Some(name) if name == ancestor => return true,
                Some(name) => current = self.parents.get(name).map(String::as_str),
                None => return false,
            }
        }
        false
    }

    /// Check that `type_name` is a recognized model type
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentity`] if it is not.
    pub fn validate(&self, type_name: &str) -> Result<()> {
        if self.contains(type_name) {
            Ok(())
        } else {
            Err(Error::InvalidIdentity(type_name.to_string()))
        }
    }
}

impl TypeResolver for TypeCatalog {
    fn type_to_kind(&self, type_name: &str) -> Result<Kind> {
        if self.contains(type_name) {
            Ok(Kind::Model(type_name.to_string()))
        } else {
            Err(Error::UnknownType(type_name.to_string()))
        }
    }

    fn is_assignable(&self, target: &Kind, actual: &Kind) -> bool {
        match (target, actual) {
            (Kind::Any, _) => true,
            (Kind::Model(target), Kind::Model(actual)) => self.is_subtype_of(actual, target),
            _ => target == actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spdx_catalog() {
        let catalog = TypeCatalog::spdx();
        assert!(catalog.contains("Package"));
        assert!(catalog.contains("ExternalDocumentRef"));
        assert!(!catalog.contains("package"));
        assert_eq!(catalog.len(), SPDX_CLASSES.len());
    }

    #[test]
    fn test_validate() {
        let catalog = TypeCatalog::spdx();
        assert!(catalog.validate("File").is_ok());
        assert_eq!(
            catalog.validate("Widget"),
            Err(Error::InvalidIdentity("Widget".to_string()))
        );
    }

    #[test]
    fn test_hierarchy() {
        let catalog = TypeCatalog::spdx();
        assert!(catalog.is_subtype_of("Package", "Package"));
        assert!(catalog.is_subtype_of("Package", "SpdxElement"));
        assert!(catalog.is_subtype_of("ListedLicense", "AnyLicenseInfo"));
        assert!(!catalog.is_subtype_of("SpdxElement", "Package"));
        assert!(!catalog.is_subtype_of("Checksum", "SpdxElement"));
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let catalog = TypeCatalog::new(["A", "B"])
            .with_parent("A", "B")
            .with_parent("B", "A");
        assert!(catalog.is_subtype_of("A", "B"));
        assert!(!catalog.is_subtype_of("A", "C"));
    }

    #[test]
    fn test_resolver() {
        let catalog = TypeCatalog::spdx();
        assert_eq!(catalog.type_to_kind("File"), Ok(Kind::model("File")));
        assert_eq!(
            catalog.type_to_kind("Widget"),
            Err(Error::UnknownType("Widget".to_string()))
        );
        assert!(catalog.is_assignable(&Kind::model("SpdxItem"), &Kind::model("Snippet")));
        assert!(!catalog.is_assignable(&Kind::model("Snippet"), &Kind::model("SpdxItem")));
        assert!(catalog.is_assignable(&Kind::enumeration("A"), &Kind::enumeration("A")));
    }
}
