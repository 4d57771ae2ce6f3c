//! The copy-source collaborator.
//!
//! [`crate::TypedItem::copy_values_from`] populates an item from the same id in another document
//! scope. The store holding that other document is reached only through [`CopySource`], so the
//! item never depends on how the surrounding store is organized.

use crate::{value::RawValue, Result};

/// Read access to the property values of items in another document scope.
pub trait CopySource: Send + Sync {
    /// Names of all properties holding a value for item `id` in `scope`
    ///
    /// ## Arguments
    /// * `scope`   - Document scope to read from
    /// * `id`      - Id of the item within that scope
    ///
    /// # Errors
    /// Returns an error if the source can not enumerate the item.
    fn property_value_names(&self, scope: &str, id: &str) -> Result<Vec<String>>;

    /// The single value stored under `name` for item `id` in `scope`
    ///
    /// Returns `Ok(None)` if no single value is stored.
    ///
    /// # Errors
    /// Returns an error if the source can not read the item.
    fn value(&self, scope: &str, id: &str, name: &str) -> Result<Option<RawValue>>;
}
