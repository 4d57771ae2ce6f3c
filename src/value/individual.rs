//! Individual URI values.
//!
//! An individual value is a URI naming a constant rather than a typed item: either a member of
//! one of the model's enumerations, or one of the two universal sentinels
//! ([`URI_VALUE_NOASSERTION`] and [`URI_VALUE_NONE`]). Sentinels are assignable to every target
//! kind, enumeration members only to their own enumeration family.

use std::fmt;

/// URI of the "no assertion" sentinel.
pub const URI_VALUE_NOASSERTION: &str = "http://spdx.org/rdf/terms#noassertion";

/// URI of the "none" sentinel.
pub const URI_VALUE_NONE: &str = "http://spdx.org/rdf/terms#none";

/// A URI denoting an enumeration constant or one of the universal sentinels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualUri(String);

impl IndividualUri {
    /// Create a new individual value from its URI
    ///
    /// ## Arguments
    /// * `uri` - The full URI of the individual
    pub fn new(uri: impl Into<String>) -> Self {
        IndividualUri(uri.into())
    }

    /// The "no assertion" sentinel
    #[must_use]
    pub fn no_assertion() -> Self {
        IndividualUri(URI_VALUE_NOASSERTION.to_string())
    }

    /// The "none" sentinel
    #[must_use]
    pub fn none() -> Self {
        IndividualUri(URI_VALUE_NONE.to_string())
    }

    /// The URI of this individual
    pub fn uri(&self) -> &str {
        &self.0
    }

    /// Returns true if this is one of the two universal sentinels
    pub fn is_sentinel(&self) -> bool {
        self.0 == URI_VALUE_NOASSERTION || self.0 == URI_VALUE_NONE
    }
}

impl fmt::Display for IndividualUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(IndividualUri::no_assertion().is_sentinel());
        assert!(IndividualUri::none().is_sentinel());
        assert!(!IndividualUri::new("http://spdx.org/rdf/terms#checksumAlgorithm_sha1").is_sentinel());
    }

    #[test]
    fn test_sentinel_match_is_exact() {
        let upper = IndividualUri::new(URI_VALUE_NONE.to_uppercase());
        assert!(!upper.is_sentinel());
        assert_eq!(IndividualUri::none().uri(), URI_VALUE_NONE);
    }
}
