use std::collections::HashMap;

use crate::schema::{EnumConstant, EnumRegistry};

/// Immutable lookup table from individual URI to enumeration constant.
///
/// Built once from the enumerations a model defines, then shared read-only.
///
/// ```rust
/// use spdxstore::{EnumConstant, EnumRegistry, EnumTable};
///
/// let table = EnumTable::new([(
///     "http://spdx.org/rdf/terms#checksumAlgorithm_sha1",
///     EnumConstant::new("ChecksumAlgorithm", "SHA1"),
/// )]);
/// assert!(table
///     .uri_to_enum("http://spdx.org/rdf/terms#checksumAlgorithm_sha1")
///     .is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumTable {
    constants: HashMap<String, EnumConstant>,
}

impl EnumTable {
    /// Create a table from `(uri, constant)` pairs
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, EnumConstant)>,
        S: Into<String>,
    {
        EnumTable {
            constants: entries
                .into_iter()
                .map(|(uri, constant)| (uri.into(), constant))
                .collect(),
        }
    }

    /// Number of known constants
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Returns true if the table holds no constants
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

impl EnumRegistry for EnumTable {
    fn uri_to_enum(&self, uri: &str) -> Option<EnumConstant> {
        self.constants.get(uri).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let table = EnumTable::new([(
            "urn:enum:a",
            EnumConstant::new("Letters", "A"),
        )]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.uri_to_enum("urn:enum:a"),
            Some(EnumConstant::new("Letters", "A"))
        );
        assert_eq!(table.uri_to_enum("urn:enum:b"), None);
        assert!(EnumTable::default().is_empty());
    }
}
