//! # spdxstore Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the crate. Import it to get quick access to everything needed to create items, store
//! values and run assignability checks.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all spdxstore operations
pub use crate::Error;

/// The result type used throughout spdxstore
pub use crate::Result;

// ================================================================================================
// Items and Collections
// ================================================================================================

/// The typed property cell
pub use crate::TypedItem;

/// Collection members, partition keys and reference counting
pub use crate::{OwnerKey, PropertyCollection, ReferenceCount, ValueList};

// ================================================================================================
// Values
// ================================================================================================

/// Stored scalars and the values callers offer
pub use crate::{IndividualUri, ModelObject, RawValue, Reference, ScalarKind, Value};

/// Sentinel individual URIs
pub use crate::{URI_VALUE_NOASSERTION, URI_VALUE_NONE};

// ================================================================================================
// Schema and Collaborators
// ================================================================================================

/// Assignability targets and their resolvers
pub use crate::{EnumConstant, EnumRegistry, EnumTable, Kind, TypeCatalog, TypeResolver};

/// Source of values for cross-document copies
pub use crate::CopySource;
