//! # Key Paths
//!
//! Dotted paths selecting the comparison key of a structural record,
//! such as `id`, `name` or `metadata.dc.title.0`.

use crate::primitives::{KEY_PATH_SEPARATOR, MAX_KEY_PATH_DEPTH, MAX_KEY_PATH_LENGTH};
use crate::{RelcmpError, Value};
use std::fmt;
use std::str::FromStr;

/// A parsed, validated key path.
///
/// A segment addresses an object property, or an array element when the
/// value reached so far is an array and the segment is a decimal index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted path.
    ///
    /// Rejects empty paths, empty segments, and paths that exceed the
    /// length or depth limits.
    pub fn parse(path: &str) -> Result<Self, RelcmpError> {
        if path.is_empty() {
            return Err(RelcmpError::invalid_key_path(path, "path is empty"));
        }
        if path.len() > MAX_KEY_PATH_LENGTH {
            return Err(RelcmpError::invalid_key_path(
                path,
                format!("longer than {} bytes", MAX_KEY_PATH_LENGTH),
            ));
        }

        let segments: Vec<String> = path
            .split(KEY_PATH_SEPARATOR)
            .map(str::to_string)
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(RelcmpError::invalid_key_path(path, "empty segment"));
        }
        if segments.len() > MAX_KEY_PATH_DEPTH {
            return Err(RelcmpError::invalid_key_path(
                path,
                format!("deeper than {} segments", MAX_KEY_PATH_DEPTH),
            ));
        }

        Ok(Self { segments })
    }

    /// The path segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the path is a single property name equal to `name`.
    #[must_use]
    pub fn is_field(&self, name: &str) -> bool {
        matches!(self.segments.as_slice(), [only] if only == name)
    }

    /// Follow the path through `value`.
    ///
    /// Returns `None` as soon as a segment is absent.
    #[must_use]
    pub fn select<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match current {
                Value::Array(_) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| current.index(index)),
                _ => current.get(segment),
            })
    }

    /// A key extractor selecting this path from each record.
    ///
    /// Records missing the path all map to `None`, so they compare equal to
    /// each other and unequal to every present key.
    pub fn key_of(&self) -> impl Fn(&Value) -> Option<Value> + '_ {
        move |record: &Value| self.select(record).cloned()
    }
}

impl FromStr for KeyPath {
    type Err = RelcmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", KEY_PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship() -> Value {
        serde_json::from_str(
            r#"{
                "id": 9,
                "left": {"id": "a1", "name": "Publication"},
                "places": [4, 2]
            }"#,
        )
        .expect("parse")
    }

    #[test]
    fn parse_simple_and_nested() {
        let path = KeyPath::parse("left.id").expect("parse");
        assert_eq!(path.segments(), ["left".to_string(), "id".to_string()]);
        assert_eq!(path.to_string(), "left.id");
        assert!(!path.is_field("left"));
        assert!(KeyPath::parse("id").expect("parse").is_field("id"));
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for bad in ["", ".", "a.", ".a", "a..b"] {
            let result = KeyPath::parse(bad);
            assert!(
                matches!(result, Err(RelcmpError::InvalidKeyPath { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_too_deep() {
        let deep = vec!["a"; MAX_KEY_PATH_DEPTH + 1].join(".");
        assert!(KeyPath::parse(&deep).is_err());

        let ok = vec!["a"; MAX_KEY_PATH_DEPTH].join(".");
        assert!(KeyPath::parse(&ok).is_ok());
    }

    #[test]
    fn parse_rejects_too_long() {
        let long = "a".repeat(MAX_KEY_PATH_LENGTH + 1);
        let limit = MAX_KEY_PATH_LENGTH.to_string();
        let result = KeyPath::parse(&long);
        assert!(
            matches!(&result, Err(RelcmpError::InvalidKeyPath { reason, .. }) if reason.contains(&limit)),
            "{result:?}"
        );

        let longest = "a".repeat(MAX_KEY_PATH_LENGTH);
        let path = KeyPath::parse(&longest).expect("parse");
        assert_eq!(path.segments(), [longest]);
    }

    #[test]
    fn select_walks_objects_and_arrays() {
        let record = relationship();

        let left_id: KeyPath = "left.id".parse().expect("parse");
        assert_eq!(left_id.select(&record), Some(&Value::from("a1")));

        let second_place: KeyPath = "places.1".parse().expect("parse");
        assert_eq!(second_place.select(&record), Some(&Value::from(2)));
    }

    #[test]
    fn select_missing_is_none() {
        let record = relationship();

        for path in ["right.id", "places.5", "places.x", "id.nested"] {
            let path = KeyPath::parse(path).expect("parse");
            assert_eq!(path.select(&record), None, "{path}");
        }
    }

    #[test]
    fn key_of_clones_selected_value() {
        let path = KeyPath::parse("left").expect("parse");
        let key_of = path.key_of();
        let key = key_of(&relationship()).expect("present");
        assert_eq!(key.get("name"), Some(&Value::from("Publication")));
        assert_eq!(key_of(&Value::Null), None);
    }
}
