//! Owner-partitioned multi-valued properties.
//!
//! A [`PropertyCollection`] splits its members into buckets keyed by [`OwnerKey`]: references
//! land in the bucket of the id they point to, every other scalar in the single
//! [`OwnerKey::NoId`] bucket. Inserts, removals and membership checks for a given referenced id
//! only touch that id's bucket, and writers working on different ids never contend on the same
//! sequence.
//!
//! # Thread Safety
//!
//! - Buckets live in a `DashMap`; a bucket is created atomically on first use
//! - Each bucket is an `Arc<RwLock<Vec<Value>>>`, cloned out of the map before it is locked, so
//!   the map shard is never held while a bucket is being modified
//! - First-seen bucket order is recorded in an append-only `boxcar::Vec`
//! - Buckets are never removed; clearing empties them in place
//! - Bucket locks recover from poisoning, since no bucket operation can leave the `Vec` in a
//!   partial state
//!
//! # Iteration Order
//!
//! Members are yielded bucket by bucket in the order the buckets were first created, and in
//! insertion order within a bucket. See [`ValueList`].

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    vec,
};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::value::{Reference, Value};

/// Partition key of a collection bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    /// Bucket of all references to the given id
    Id(String),
    /// The reserved bucket for all non-reference members
    NoId,
}

impl OwnerKey {
    /// The bucket `value` belongs to
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Reference(reference) => OwnerKey::of_reference(reference),
            _ => OwnerKey::NoId,
        }
    }

    /// The bucket `reference` belongs to
    pub fn of_reference(reference: &Reference) -> Self {
        OwnerKey::Id(reference.id().to_string())
    }
}

type Bucket = Arc<RwLock<Vec<Value>>>;

// Bucket operations never panic while holding the lock, a poisoned bucket still holds valid data.
fn read(bucket: &Bucket) -> RwLockReadGuard<'_, Vec<Value>> {
    bucket.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(bucket: &Bucket) -> RwLockWriteGuard<'_, Vec<Value>> {
    bucket.write().unwrap_or_else(PoisonError::into_inner)
}

/// A multi-valued property, partitioned by owner key.
pub struct PropertyCollection {
    buckets: DashMap<OwnerKey, Bucket>,
    order: boxcar::Vec<OwnerKey>,
}

impl PropertyCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        PropertyCollection {
            buckets: DashMap::new(),
            order: boxcar::Vec::new(),
        }
    }

    fn bucket(&self, key: &OwnerKey) -> Option<Bucket> {
        self.buckets.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn bucket_or_insert(&self, key: OwnerKey) -> Bucket {
        if let Some(bucket) = self.bucket(&key) {
            return bucket;
        }

        match self.buckets.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                // recorded under the shard lock, so every key enters the order exactly once
                self.order.push(entry.key().clone());
                Arc::clone(entry.insert(Bucket::default()).value())
            }
        }
    }

    /// Append `value` to the end of its owner bucket
    ///
    /// ## Arguments
    /// * `value` - The member to add
    pub fn push(&self, value: Value) {
        let bucket = self.bucket_or_insert(OwnerKey::of(&value));
        write(&bucket).push(value);
    }

    /// Remove the first member equal to `value` from its owner bucket
    ///
    /// Returns true if a member was removed.
    pub fn remove(&self, value: &Value) -> bool {
        let Some(bucket) = self.bucket(&OwnerKey::of(value)) else {
            return false;
        };

        let mut members = write(&bucket);
        match members.iter().position(|member| member == value) {
            Some(index) => {
                members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if `value` is present in its owner bucket
    ///
    /// Membership is scoped to the owner bucket; other buckets are never searched.
    pub fn contains(&self, value: &Value) -> bool {
        self.bucket(&OwnerKey::of(value))
            .is_some_and(|bucket| read(&bucket).contains(value))
    }

    /// Empty every bucket, keeping the buckets themselves
    pub fn clear(&self) {
        for (_, key) in self.order.iter() {
            if let Some(bucket) = self.bucket(key) {
                write(&bucket).clear();
            }
        }
    }

    /// Total number of members across all buckets
    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .map(|entry| read(entry.value()).len())
            .sum()
    }

    /// Returns true if no bucket holds a member
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets created so far, empty ones included
    pub fn bucket_count(&self) -> usize {
        self.order.count()
    }

    /// Number of members in the bucket of `key`
    pub fn bucket_len(&self, key: &OwnerKey) -> usize {
        self.bucket(key).map_or(0, |bucket| read(&bucket).len())
    }

    /// Iterate over all members, see [`ValueList`] for the order
    pub fn iter(&self) -> ValueIter<'_> {
        ValueIter {
            collection: Some(self),
            next_bucket: 0,
            bucket_limit: self.order.count(),
            current: Vec::new().into_iter(),
        }
    }
}

impl Default for PropertyCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertyCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Lazy iterator over the members of a [`PropertyCollection`].
///
/// The set of buckets is fixed when the iterator is created and each bucket is copied when the
/// iterator reaches it, so iteration always terminates even under concurrent appends.
pub struct ValueIter<'a> {
    collection: Option<&'a PropertyCollection>,
    next_bucket: usize,
    bucket_limit: usize,
    current: vec::IntoIter<Value>,
}

impl ValueIter<'_> {
    fn empty() -> Self {
        ValueIter {
            collection: None,
            next_bucket: 0,
            bucket_limit: 0,
            current: Vec::new().into_iter(),
        }
    }
}

impl Iterator for ValueIter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }

            let collection = self.collection?;
            if self.next_bucket >= self.bucket_limit {
                return None;
            }

            let index = self.next_bucket;
            self.next_bucket += 1;
            // the key may be ordered before its bucket is visible; that bucket is still empty
            if let Some(bucket) = collection
                .order
                .get(index)
                .and_then(|key| collection.bucket(key))
            {
                self.current = read(&bucket).clone().into_iter();
            }
        }
    }
}

/// The members of a collection property, as returned by [`crate::TypedItem::value_list`].
///
/// A `ValueList` keeps the collection alive independently of the item and can be iterated any
/// number of times; every [`ValueList::iter`] starts over and observes the collection as it is
/// at that moment. Order is bucket creation order, then insertion order within a bucket.
///
/// A pass only visits the buckets that existed when it started. A bucket created concurrently
/// with the start of a pass may be missed by that pass and is seen by the next one.
#[derive(Clone, Default)]
pub struct ValueList {
    collection: Option<Arc<PropertyCollection>>,
}

impl ValueList {
    pub(crate) fn new(collection: Arc<PropertyCollection>) -> Self {
        ValueList {
            collection: Some(collection),
        }
    }

    /// An empty list, used for absent properties
    #[must_use]
    pub fn empty() -> Self {
        ValueList { collection: None }
    }

    /// Start a fresh pass over the members
    pub fn iter(&self) -> ValueIter<'_> {
        self.collection
            .as_deref()
            .map_or_else(ValueIter::empty, PropertyCollection::iter)
    }

    /// Current number of members
    pub fn len(&self) -> usize {
        self.collection.as_deref().map_or(0, PropertyCollection::len)
    }

    /// Returns true if there are currently no members
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect the current members into a vector
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = Value;
    type IntoIter = ValueIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
