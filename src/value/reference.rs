//! Identity-only references between typed items.

use std::fmt;

/// A pointer-by-identity to another typed item.
///
/// A reference names the target by id and type only; it owns nothing and does not keep the
/// target alive. Two references are equal when both id and type name match exactly. Id matching
/// for reachability queries is case-insensitive, see [`Reference::matches_id`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    id: String,
    type_name: String,
}

impl Reference {
    /// Create a new reference
    ///
    /// ## Arguments
    /// * `id`          - Id of the referenced item
    /// * `type_name`   - Model type name of the referenced item
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Reference {
            id: id.into(),
            type_name: type_name.into(),
        }
    }

    /// Id of the referenced item
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model type name of the referenced item
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns true if `candidate` names the referenced item, ignoring case
    ///
    /// ## Arguments
    /// * `candidate` - The id to compare against
    pub fn matches_id(&self, candidate: &str) -> bool {
        self.id == candidate || self.id.to_lowercase() == candidate.to_lowercase()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.id)
    }
}

/// A rich domain object from the higher-level object model.
///
/// Model objects can never be stored directly; the storage layer only holds the identity of the
/// object. Convert with [`ModelObject::to_reference`] before storing.
pub trait ModelObject: fmt::Debug + Send + Sync {
    /// Id of the object within its document
    fn id(&self) -> &str;

    /// Model type name of the object
    fn type_name(&self) -> &str;

    /// The identity-only reference to store in place of this object
    fn to_reference(&self) -> Reference {
        Reference::new(self.id(), self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_uses_id_and_type() {
        let a = Reference::new("SPDXRef-1", "Package");
        assert_eq!(a, Reference::new("SPDXRef-1", "Package"));
        assert_ne!(a, Reference::new("SPDXRef-1", "File"));
        assert_ne!(a, Reference::new("spdxref-1", "Package"));
    }

    #[test]
    fn test_matches_id_ignores_case() {
        let reference = Reference::new("SPDXRef-Package", "Package");
        assert!(reference.matches_id("spdxref-package"));
        assert!(reference.matches_id("SPDXREF-PACKAGE"));
        assert!(!reference.matches_id("SPDXRef-Pack"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Reference::new("SPDXRef-1", "Package").to_string(),
            "Package:SPDXRef-1"
        );
    }
}
