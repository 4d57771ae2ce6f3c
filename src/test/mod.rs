use std::collections::BTreeMap;

use crate::{
    schema::{EnumConstant, EnumTable, Kind, TypeCatalog, TypeResolver},
    source::CopySource,
    value::{ModelObject, RawValue},
    Error, Result, TypedItem,
};

// Helper function to create an item in the default test document
pub fn create_item(id: &str, type_name: &str) -> TypedItem {
    TypedItem::new(&TypeCatalog::spdx(), "urn:test:doc", id, type_name).unwrap()
}

// Helper function to create a registry with a few SPDX enumeration constants
pub fn spdx_enums() -> EnumTable {
    EnumTable::new([
        (
            "http://spdx.org/rdf/terms#checksumAlgorithm_sha1",
            EnumConstant::new("ChecksumAlgorithm", "SHA1"),
        ),
        (
            "http://spdx.org/rdf/terms#checksumAlgorithm_sha256",
            EnumConstant::new("ChecksumAlgorithm", "SHA256"),
        ),
        (
            "http://spdx.org/rdf/terms#relationshipType_describes",
            EnumConstant::new("RelationshipType", "DESCRIBES"),
        ),
    ])
}

/// A model object that only carries its identity
#[derive(Debug)]
pub struct TestObject {
    id: String,
    type_name: String,
}

impl TestObject {
    pub fn new(id: &str, type_name: &str) -> Self {
        TestObject {
            id: id.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl ModelObject for TestObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A resolver that knows no type at all
pub struct UnknownResolver;

impl TypeResolver for UnknownResolver {
    fn type_to_kind(&self, type_name: &str) -> Result<Kind> {
        Err(Error::UnknownType(type_name.to_string()))
    }
}

enum SourceEntry {
    Value(RawValue),
    Missing,
    UnknownType(String),
}

/// A copy source backed by a plain map of (scope, id) to named entries
#[derive(Default)]
pub struct MapSource {
    items: BTreeMap<(String, String), Vec<(String, SourceEntry)>>,
}

impl MapSource {
    pub fn new() -> Self {
        MapSource::default()
    }

    fn with_entry(mut self, scope: &str, id: &str, name: &str, entry: SourceEntry) -> Self {
        self.items
            .entry((scope.to_string(), id.to_string()))
            .or_default()
            .push((name.to_string(), entry));
        self
    }

    pub fn with_value(self, scope: &str, id: &str, name: &str, value: impl Into<RawValue>) -> Self {
        self.with_entry(scope, id, name, SourceEntry::Value(value.into()))
    }

    pub fn with_name_only(self, scope: &str, id: &str, name: &str) -> Self {
        self.with_entry(scope, id, name, SourceEntry::Missing)
    }

    pub fn with_unknown_type(self, scope: &str, id: &str, name: &str, type_name: &str) -> Self {
        self.with_entry(
            scope,
            id,
            name,
            SourceEntry::UnknownType(type_name.to_string()),
        )
    }

    fn entries(&self, scope: &str, id: &str) -> &[(String, SourceEntry)] {
        self.items
            .get(&(scope.to_string(), id.to_string()))
            .map_or(&[][..], Vec::as_slice)
    }
}

impl CopySource for MapSource {
    fn property_value_names(&self, scope: &str, id: &str) -> Result<Vec<String>> {
        Ok(self
            .entries(scope, id)
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn value(&self, scope: &str, id: &str, name: &str) -> Result<Option<RawValue>> {
        match self.entries(scope, id).iter().find(|(n, _)| n == name) {
            Some((_, SourceEntry::Value(value))) => Ok(Some(value.clone())),
            Some((_, SourceEntry::UnknownType(type_name))) => {
                Err(Error::UnknownType(type_name.clone()))
            }
            Some((_, SourceEntry::Missing)) | None => Ok(None),
        }
    }
}
