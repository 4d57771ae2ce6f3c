// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # spdxstore
//!
//! A thread-safe, schema-checked, typed-property store for in-memory SPDX document graphs.
//!
//! The central type is [`TypedItem`]: a single addressable item, identified by document scope,
//! id and model type name, holding an open-ended mapping from property name to either a scalar
//! [`Value`] or an owner-partitioned collection of scalars. Object-oriented model views are
//! layered on top by callers; the item guarantees memory safety under concurrent readers and
//! writers, enforces a closed value-type policy, and tracks how many external holders still
//! reference it.
//!
//! ## Features
//!
//! - **Closed value policy** - Only strings, booleans, integers, [`Reference`]s and
//!   [`IndividualUri`]s are ever stored; everything else is rejected with [`Error::InvalidType`]
//! - **Fine-grained concurrency** - Properties live in a `DashMap`, collection buckets carry
//!   their own locks, and the reference count has a lock of its own
//! - **Owner-partitioned collections** - Collection members are bucketed by the id they
//!   reference, so per-id inserts, removals and membership checks stay local
//! - **Injected schema knowledge** - Assignability checks resolve through the [`TypeResolver`]
//!   and [`EnumRegistry`] traits
//!
//! ## Quick Start
//!
//! ```rust
//! use spdxstore::prelude::*;
//!
//! let catalog = TypeCatalog::spdx();
//! let package = TypedItem::new(&catalog, "urn:doc", "SPDXRef-Package", "Package")?;
//!
//! package.set_value("name", "foo")?;
//! package.set_value("filesAnalyzed", true)?;
//! package.add_value_to_list("hasFile", Reference::new("SPDXRef-File1", "File"))?;
//! package.add_value_to_list("hasFile", Reference::new("SPDXRef-File2", "File"))?;
//!
//! assert_eq!(package.get_value("name"), Some(Value::from("foo")));
//! assert_eq!(package.collection_size("hasFile")?, 2);
//! assert!(package.is_collection_members_assignable_to(
//!     "hasFile",
//!     &Kind::model("SpdxItem"),
//!     &catalog,
//!     &EnumTable::default(),
//! ));
//!
//! package.increment_reference_count()?;
//! assert_eq!(package.reference_count()?, 1);
//! # Ok::<(), spdxstore::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]; errors are typed, synchronous and carry no
//! partial side effects. See [`Error`] for the taxonomy.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (unresolvable reference types during assignability checks,
//! copy progress, collection materialization) and never installs a subscriber.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use spdxstore::prelude::*;
///
/// let item = TypedItem::new(&TypeCatalog::spdx(), "urn:doc", "SPDXRef-1", "File")?;
/// item.set_value("fileName", "./src/lib.rs")?;
/// # Ok::<(), spdxstore::Error>(())
/// ```
pub mod prelude;

/// Stored values and the storage type policy
///
/// - [`value::Value`] - A storable scalar
/// - [`value::RawValue`] - A caller-provided value before the policy is applied
/// - [`value::Reference`] - Identity-only pointer to another typed item
/// - [`value::IndividualUri`] - Enumeration constant or sentinel URI
pub mod value;

/// Model kinds and the collaborators that resolve values to them
///
/// - [`schema::Kind`] - Target of an assignability check
/// - [`schema::TypeResolver`] / [`schema::EnumRegistry`] - Injected resolution collaborators
/// - [`schema::TypeCatalog`] - Immutable configuration of the recognized model types
pub mod schema;

/// The typed item and its collection and reference-count parts
///
/// - [`item::TypedItem`] - The storage cell
/// - [`item::PropertyCollection`] - Owner-partitioned multi-valued property
/// - [`item::ValueList`] - Restartable view over collection members
pub mod item;

/// The copy-source collaborator used by [`TypedItem::copy_values_from`]
pub mod source;

/// `spdxstore` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `spdxstore` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use item::{OwnerKey, PropertyCollection, ReferenceCount, TypedItem, ValueList};
pub use schema::{EnumConstant, EnumRegistry, EnumTable, Kind, TypeCatalog, TypeResolver};
pub use source::CopySource;
pub use value::{
    IndividualUri, ModelObject, RawValue, Reference, ScalarKind, Value, URI_VALUE_NOASSERTION,
    URI_VALUE_NONE,
};
