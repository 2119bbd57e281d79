//! # Core Type Definitions
//!
//! This module contains the record types and the error type shared by the
//! comparison engine:
//! - Identifiers (`ItemId`, `RelationshipId`)
//! - Relationship records (`Relationship`)
//! - The `Identifiable` trait used by the identity-key comparator
//! - Error types (`RelcmpError`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an item in the repository (a UUID string in practice).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identifier of a relationship record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub u64);

// =============================================================================
// IDENTIFIABLE
// =============================================================================

/// A record that carries an identity field.
///
/// Two records with equal ids are considered the same record by
/// [`compare_arrays_using_ids`](crate::compare_arrays_using_ids), whatever
/// their other fields hold.
pub trait Identifiable {
    /// The identity type.
    type Id: PartialEq;

    /// Extract the identity of this record.
    fn id(&self) -> Self::Id;
}

// =============================================================================
// RELATIONSHIP
// =============================================================================

/// A directed, typed link between two items.
///
/// The places record the position of the relationship within each item's
/// ordered list of relations. They change when a list is re-sorted without
/// the set of relationships changing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// The relationship identifier.
    pub id: RelationshipId,
    /// Item on the left side of the relationship.
    pub left_id: ItemId,
    /// Item on the right side of the relationship.
    pub right_id: ItemId,
    /// Name of the relationship type (e.g. `isAuthorOfPublication`).
    pub relationship_type: String,
    /// Position in the left item's list.
    #[serde(default)]
    pub left_place: u32,
    /// Position in the right item's list.
    #[serde(default)]
    pub right_place: u32,
}

impl Relationship {
    /// Create a relationship with both places set to zero.
    #[must_use]
    pub fn new(
        id: RelationshipId,
        left_id: ItemId,
        right_id: ItemId,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            left_id,
            right_id,
            relationship_type: relationship_type.into(),
            left_place: 0,
            right_place: 0,
        }
    }

    /// Set the left and right places.
    #[must_use]
    pub fn with_places(mut self, left_place: u32, right_place: u32) -> Self {
        self.left_place = left_place;
        self.right_place = right_place;
        self
    }
}

impl Identifiable for Relationship {
    type Id = RelationshipId;

    fn id(&self) -> RelationshipId {
        self.id
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the comparison engine.
///
/// Comparing never fails; these cover key path parsing, input loading and
/// configuration.
#[derive(Debug, Error)]
pub enum RelcmpError {
    /// The key path is empty, malformed, or too deep.
    #[error("Invalid key path '{path}': {reason}")]
    InvalidKeyPath {
        /// The offending path as given.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An input exceeds a configured limit.
    #[error("Input too large: {actual} exceeds maximum allowed {limit} {unit}")]
    InputTooLarge {
        /// Observed size.
        actual: u64,
        /// Configured limit.
        limit: u64,
        /// Unit of both numbers (`bytes`, `records`).
        unit: &'static str,
    },

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RelcmpError {
    /// Shorthand for an [`RelcmpError::InvalidKeyPath`].
    pub fn invalid_key_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn authorship() -> Relationship {
        Relationship::new(
            RelationshipId(7),
            ItemId::new("publication-1"),
            ItemId::new("person-1"),
            "isAuthorOfPublication",
        )
    }

    #[test]
    fn relationship_identity_is_its_id() {
        let rel = authorship().with_places(3, 1);
        assert_eq!(Identifiable::id(&rel), RelationshipId(7));
    }

    #[test]
    fn relationship_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "leftId": "publication-1",
            "rightId": "person-1",
            "relationshipType": "isAuthorOfPublication",
            "leftPlace": 2
        }"#;
        let rel: Relationship = serde_json::from_str(json).expect("parse");

        assert_eq!(rel.id, RelationshipId(7));
        assert_eq!(rel.left_place, 2);
        assert_eq!(rel.right_place, 0);
    }

    #[test]
    fn error_messages_name_the_limit() {
        let err = RelcmpError::InputTooLarge {
            actual: 12,
            limit: 10,
            unit: "records",
        };
        assert_eq!(
            err.to_string(),
            "Input too large: 12 exceeds maximum allowed 10 records"
        );

        let err = RelcmpError::invalid_key_path("a..b", "empty segment");
        assert_eq!(err.to_string(), "Invalid key path 'a..b': empty segment");
    }
}
