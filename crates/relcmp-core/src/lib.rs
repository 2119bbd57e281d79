//! # relcmp-core
//!
//! The order-insensitive comparison engine for relcmp - THE LOGIC.
//!
//! Item pages of a repository front-end receive lists of related records
//! (relationships, related items) over and over. This crate decides whether
//! two such lists are equivalent: same records, in any order, where "same"
//! is whatever the key extractor says it is.
//!
//! ```
//! use relcmp_core::{Value, compare_arrays_using, compare_arrays_using_ids};
//!
//! let record = |id: i64, name: &str| {
//!     Value::object([("id", Value::from(id)), ("name", Value::from(name))])
//! };
//! let shown = vec![record(1, "test"), record(2, "another test")];
//! let fresh = vec![record(2, "renamed"), record(1, "test")];
//!
//! assert!(compare_arrays_using_ids::<Value>()(&shown, &fresh));
//! assert!(!compare_arrays_using(|v: &Value| v.clone())(&shown, &fresh));
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: comparing never mutates its inputs and has no side effects
//! - Synchronous: no async, no I/O, no logging
//! - Deterministic: same inputs, same answer, regardless of call order

// =============================================================================
// MODULES
// =============================================================================

pub mod compare;
pub mod distinct;
pub mod key_path;
pub mod primitives;
pub mod types;
pub mod value;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Identifiable, ItemId, RelcmpError, Relationship, RelationshipId};

// =============================================================================
// RE-EXPORTS: Comparison Engine
// =============================================================================

pub use compare::{
    ArrayComparator, KeyDiff, compare_arrays_using, compare_arrays_using_ids,
    compare_arrays_using_ordered, try_compare_arrays_using,
};
pub use distinct::{ChangeFilter, DistinctUntilChanged, DistinctUntilChangedExt};
pub use key_path::KeyPath;
pub use value::{Number, Value, canonical_cmp, structurally_equal};
