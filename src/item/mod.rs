//! The typed item: a concurrent, schema-checked property cell.
//!
//! A [`TypedItem`] is identified by document scope, id and model type name, and holds an
//! open-ended mapping from property name to either a single [`Value`] or a
//! [`PropertyCollection`]. Higher layers build their object views on top of it; the item itself
//! guarantees that only policy-conforming scalars are stored, that a property is never scalar
//! and collection at the same time, and that the reference count never underflows.
//!
//! # Key Components
//!
//! - [`TypedItem`] - The storage cell
//! - [`PropertyCollection`] - Owner-partitioned multi-valued property
//! - [`ValueList`] - Restartable view over the members of a collection property
//! - [`ReferenceCount`] - Count of external holders of an item
//!
//! # Thread Safety
//!
//! Properties live in a `DashMap`, so readers never block each other and writers to different
//! property names do not contend. Collection handles are cloned out of the map before they are
//! used. The reference count has its own lock and never blocks property operations.
//!
//! Operations that materialize an absent collection ([`TypedItem::add_value_to_list`],
//! [`TypedItem::collection_size`], [`TypedItem::collection_contains`]) create it atomically, but
//! a concurrent [`TypedItem::remove_property`] may detach it right after. The operation then
//! completes against the detached collection and reports its result as if it had run first.

mod collection;
mod refcount;

pub use collection::{OwnerKey, PropertyCollection, ValueIter, ValueList};
pub use refcount::ReferenceCount;

use std::{fmt, sync::Arc};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::{
    schema::{EnumRegistry, Kind, TypeCatalog, TypeResolver},
    source::CopySource,
    value::{RawValue, Reference, Value},
    Error, Result,
};

/// What a single property name currently holds.
#[derive(Clone, Debug)]
enum PropertyValue {
    Scalar(Value),
    Collection(Arc<PropertyCollection>),
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::NullArgument("Property name"));
    }
    Ok(())
}

/// A single addressable item holding typed properties.
///
/// # Examples
///
/// ```rust
/// use spdxstore::{Reference, TypeCatalog, TypedItem, Value};
///
/// let catalog = TypeCatalog::spdx();
/// let item = TypedItem::new(&catalog, "urn:doc", "SPDXRef-Package", "Package")?;
///
/// item.set_value("name", "foo")?;
/// item.add_value_to_list("files", Reference::new("SPDXRef-File", "File"))?;
///
/// assert_eq!(item.get_value("name"), Some(Value::from("foo")));
/// assert_eq!(item.collection_size("files")?, 1);
/// assert!(item.uses_id("spdxref-file"));
/// # Ok::<(), spdxstore::Error>(())
/// ```
pub struct TypedItem {
    document_scope: String,
    id: String,
    type_name: String,
    properties: DashMap<String, PropertyValue>,
    reference_count: ReferenceCount,
}

impl TypedItem {
    /// Create a new item with no properties
    ///
    /// ## Arguments
    /// * `catalog`         - The recognized model types
    /// * `document_scope`  - URI of the document the item belongs to
    /// * `id`              - Id of the item within the document
    /// * `type_name`       - Model type of the item
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty id and [`Error::InvalidIdentity`] if
    /// `type_name` is not in `catalog`.
    pub fn new(
        catalog: &TypeCatalog,
        document_scope: impl Into<String>,
        id: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::NullArgument("Id"));
        }

        let type_name = type_name.into();
        catalog.validate(&type_name)?;

        Ok(TypedItem {
            document_scope: document_scope.into(),
            id,
            type_name,
            properties: DashMap::new(),
            reference_count: ReferenceCount::new(),
        })
    }

    /// URI of the document this item belongs to
    pub fn document_scope(&self) -> &str {
        &self.document_scope
    }

    /// Id of this item within its document
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model type name of this item
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The reference other items store to point at this one
    pub fn to_reference(&self) -> Reference {
        Reference::new(self.id.as_str(), self.type_name.as_str())
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).map(|entry| entry.value().clone())
    }

    /// The collection stored under `name`, if any
    ///
    /// `operation` names the caller's intent in the error raised for scalar properties.
    fn collection(&self, name: &str, operation: &str) -> Result<Option<Arc<PropertyCollection>>> {
        match self.property(name) {
            Some(PropertyValue::Collection(collection)) => Ok(Some(collection)),
            Some(PropertyValue::Scalar(_)) => Err(invalid_type_error!(
                "Trying to {} for non list type for property {}",
                operation,
                name
            )),
            None => Ok(None),
        }
    }

    /// The collection stored under `name`, creating an empty one if the property is absent
    fn collection_or_insert(&self, name: &str, operation: &str) -> Result<Arc<PropertyCollection>> {
        if let Some(collection) = self.collection(name, operation)? {
            return Ok(collection);
        }

        let entry = self
            .properties
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!(id = %self.id, property = name, "materializing empty collection");
                PropertyValue::Collection(Arc::new(PropertyCollection::new()))
            });

        // a concurrent set_value may have won the race for the empty slot
        match entry.value() {
            PropertyValue::Collection(collection) => Ok(Arc::clone(collection)),
            PropertyValue::Scalar(_) => Err(invalid_type_error!(
                "Trying to {} for non list type for property {}",
                operation,
                name
            )),
        }
    }

    /// Names of all properties currently holding a value, scalar or collection
    ///
    /// The list is a snapshot; its order is unspecified.
    pub fn property_value_names(&self) -> Vec<String> {
        self.properties
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Store `value` as the single value of `name`
    ///
    /// Replaces any previous value, including a collection.
    ///
    /// ## Arguments
    /// * `name`    - The property name
    /// * `value`   - The value to store
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name or a null value, and
    /// [`Error::InvalidType`] if the value is a model object, a raw sequence or any other
    /// unsupported kind. A rejected value leaves the property unchanged.
    pub fn set_value(&self, name: &str, value: impl Into<RawValue>) -> Result<()> {
        check_name(name)?;
        let value = value.into().into_value()?;
        self.properties
            .insert(name.to_string(), PropertyValue::Scalar(value));
        Ok(())
    }

    /// The single value stored under `name`
    ///
    /// Returns `None` if the property is absent or holds a collection.
    pub fn get_value(&self, name: &str) -> Option<Value> {
        match self.property(name)? {
            PropertyValue::Scalar(value) => Some(value),
            PropertyValue::Collection(_) => None,
        }
    }

    /// Remove whatever is stored under `name`; no-op if absent
    pub fn remove_property(&self, name: &str) {
        self.properties.remove(name);
    }

    /// Returns true if the single value of `name` can be viewed as `target`
    ///
    /// False if the property is absent or holds a collection. See [`Kind::accepts`] for the
    /// resolution rules.
    ///
    /// ## Arguments
    /// * `name`        - The property name
    /// * `target`      - The kind to check against
    /// * `resolver`    - Resolves reference type names
    /// * `registry`    - Resolves individual URIs
    pub fn is_property_value_assignable_to(
        &self,
        name: &str,
        target: &Kind,
        resolver: &dyn TypeResolver,
        registry: &dyn EnumRegistry,
    ) -> bool {
        match self.property(name) {
            Some(PropertyValue::Scalar(value)) => target.accepts(&value, resolver, registry),
            _ => false,
        }
    }

    /// Add `value` to the collection `name`, creating the collection if absent
    ///
    /// Always returns true on success; failures are reported as errors.
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name or a null value, and
    /// [`Error::InvalidType`] if the value violates the storage policy or `name` holds a single
    /// value.
    pub fn add_value_to_list(&self, name: &str, value: impl Into<RawValue>) -> Result<bool> {
        check_name(name)?;
        let value = value.into().into_value()?;
        let collection = self.collection_or_insert(name, "add a list value")?;
        collection.push(value);
        Ok(true)
    }

    /// Remove the first occurrence of `value` from the collection `name`
    ///
    /// Returns false if the property, the owner bucket or the value is absent. Removing from an
    /// absent property is always a silent no-op.
    ///
    /// # Errors
    /// Returns [`Error::InvalidType`] if `name` holds a single value, and
    /// [`Error::NullArgument`] for a null value on an existing collection.
    pub fn remove_value_from_list(&self, name: &str, value: impl Into<RawValue>) -> Result<bool> {
        let Some(collection) = self.collection(name, "remove from a list")? else {
            return Ok(false);
        };

        match value.into().into_value() {
            Ok(value) => Ok(collection.remove(&value)),
            Err(Error::NullArgument(argument)) => Err(Error::NullArgument(argument)),
            // an unstorable value can not be a member
            Err(_) => Ok(false),
        }
    }

    /// Remove the first occurrence of `reference` from the collection `name`
    ///
    /// Only the bucket of the referenced id is searched.
    ///
    /// # Errors
    /// Returns [`Error::InvalidType`] if `name` holds a single value.
    pub fn remove_typed_value_from_list(&self, name: &str, reference: &Reference) -> Result<bool> {
        match self.collection(name, "remove from a list")? {
            Some(collection) => Ok(collection.remove(&Value::Reference(reference.clone()))),
            None => Ok(false),
        }
    }

    /// Empty the collection `name`; no-op if absent
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name and [`Error::InvalidType`] if `name`
    /// holds a single value.
    pub fn clear_property_value_list(&self, name: &str) -> Result<()> {
        check_name(name)?;
        if let Some(collection) = self.collection(name, "clear a list")? {
            collection.clear();
        }
        Ok(())
    }

    /// The members of the collection `name`
    ///
    /// An absent property yields an empty list.
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name and [`Error::InvalidType`] if `name`
    /// holds a single value.
    pub fn value_list(&self, name: &str) -> Result<ValueList> {
        check_name(name)?;
        Ok(self
            .collection(name, "get a list")?
            .map_or_else(ValueList::empty, ValueList::new))
    }

    /// Number of members in the collection `name`
    ///
    /// An absent property is materialized as an empty collection and reports zero.
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name and [`Error::InvalidType`] if `name`
    /// holds a single value.
    pub fn collection_size(&self, name: &str) -> Result<usize> {
        check_name(name)?;
        Ok(self.collection_or_insert(name, "get size")?.len())
    }

    /// Returns true if `value` is in its owner bucket of the collection `name`
    ///
    /// Only the bucket `value` would be stored in is searched, so a reference is found only
    /// among references to the same id. An absent property is materialized as an empty
    /// collection.
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty name or a null value and
    /// [`Error::InvalidType`] if `name` holds a single value.
    pub fn collection_contains(&self, name: &str, value: impl Into<RawValue>) -> Result<bool> {
        check_name(name)?;
        let value = match value.into() {
            RawValue::Null => return Err(Error::NullArgument("Value")),
            value => value.into_value().ok(),
        };

        let collection = self.collection_or_insert(name, "find contains")?;
        Ok(value.is_some_and(|value| collection.contains(&value)))
    }

    /// Returns true if `name` currently holds a collection
    pub fn is_collection_property(&self, name: &str) -> bool {
        matches!(self.property(name), Some(PropertyValue::Collection(_)))
    }

    /// Returns true if every member of the collection `name` can be viewed as `target`
    ///
    /// An absent property is vacuously assignable; a single value never is.
    pub fn is_collection_members_assignable_to(
        &self,
        name: &str,
        target: &Kind,
        resolver: &dyn TypeResolver,
        registry: &dyn EnumRegistry,
    ) -> bool {
        match self.property(name) {
            None => true,
            Some(PropertyValue::Scalar(_)) => false,
            Some(PropertyValue::Collection(collection)) => collection
                .iter()
                .all(|value| target.accepts(&value, resolver, registry)),
        }
    }

    /// Increment the reference count and return the new count
    ///
    /// # Errors
    /// Returns [`Error::CountOverflow`] if the count is already `u32::MAX`, or
    /// [`Error::LockError`] if the count lock was poisoned.
    pub fn increment_reference_count(&self) -> Result<u32> {
        self.reference_count.increment()
    }

    /// Decrement the reference count and return the new count
    ///
    /// # Errors
    /// Returns [`Error::CountUnderflow`] if the count is already zero.
    pub fn decrement_reference_count(&self) -> Result<u32> {
        self.reference_count.decrement()
    }

    /// The current reference count
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the count lock was poisoned.
    pub fn reference_count(&self) -> Result<u32> {
        self.reference_count.get()
    }

    /// Copy the single-valued properties of the item with this id in another document scope
    ///
    /// Each property the source reports is read with [`CopySource::value`] and stored with
    /// [`TypedItem::set_value`]. Collection properties are not copied by this operation.
    ///
    /// ## Arguments
    /// * `from_scope`  - Document scope to copy from
    /// * `source`      - Store holding that document
    ///
    /// # Errors
    /// Returns [`Error::NullArgument`] for an empty scope, propagates errors from the source,
    /// and returns [`Error::InvalidType`] for source values this item can not store, including
    /// values whose type the source could not resolve. Properties copied before the failure
    /// remain set.
    pub fn copy_values_from(&self, from_scope: &str, source: &dyn CopySource) -> Result<()> {
        if from_scope.is_empty() {
            return Err(Error::NullArgument("From document scope"));
        }

        let names = source.property_value_names(from_scope, &self.id)?;
        debug!(
            id = %self.id,
            from = from_scope,
            to = %self.document_scope,
            count = names.len(),
            "copying property values"
        );

        for name in names {
            let value = source
                .value(from_scope, &self.id, &name)
                .map_err(|e| match e {
                    Error::UnknownType(type_name) => invalid_type_error!(
                        "Unknown type {} for property {}",
                        type_name,
                        name
                    ),
                    e => e,
                })?;

            if let Some(value) = value {
                self.set_value(&name, value)?;
            }
        }
        Ok(())
    }

    /// Returns true if any stored value references `candidate`
    ///
    /// Scans single values and every collection member; the id comparison ignores case.
    pub fn uses_id(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }

        let uses = |value: &Value| {
            value
                .as_reference()
                .is_some_and(|reference| reference.matches_id(candidate))
        };

        let collections: Vec<Arc<PropertyCollection>> = {
            let mut collections = Vec::new();
            for entry in self.properties.iter() {
                match entry.value() {
                    PropertyValue::Scalar(value) if uses(value) => return true,
                    PropertyValue::Scalar(_) => {}
                    PropertyValue::Collection(collection) => {
                        collections.push(Arc::clone(collection));
                    }
                }
            }
            collections
        };

        collections
            .iter()
            .any(|collection| collection.iter().any(|value| uses(&value)))
    }
}

impl fmt::Debug for TypedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedItem")
            .field("document_scope", &self.document_scope)
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("property_count", &self.properties.len())
            .finish()
    }
}
