//! # Structural Values
//!
//! A closed set of JSON-like shapes used as comparison keys and as the
//! in-memory form of loaded records.
//!
//! Equality is structural and explicit:
//! - Primitives compare strictly (`1 == 1.0`, `NaN != NaN`, no coercion
//!   between kinds)
//! - Arrays compare positionally
//! - Objects compare by identical key sets and pairwise equal values; an
//!   object with an extra property never equals the smaller object
//!
//! [`canonical_cmp`] orders values totally. Two NaN-free values are
//! `Equal` under it exactly when they are structurally equal, which lets
//! large key lists be sorted and merged instead of matched pairwise.

use crate::primitives::ID_FIELD;
use crate::types::Identifiable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `i64::MIN` as a float, exactly `-2^63`.
const I64_MIN_AS_FLOAT: f64 = i64::MIN as f64;

/// `2^63`, the first float above the `i64` range.
const I64_END_AS_FLOAT: f64 = 9_223_372_036_854_775_808.0;

// =============================================================================
// NUMBER
// =============================================================================

/// A numeric primitive.
///
/// Integers that fit in `i64` stay exact; every other number is a float.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
}

impl Number {
    /// Strict numeric equality across both representations.
    #[must_use]
    pub fn strictly_equal(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                int_equals_float(i, f)
            }
        }
    }

    /// Numeric order across both representations.
    ///
    /// `-0.0` and `0.0` are `Equal`, as are `1` and `1.0`. NaN sorts after
    /// every other number and is `Equal` to NaN.
    #[must_use]
    pub fn canonical_cmp(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(&b),
            (Self::Float(a), Self::Float(b)) => float_cmp(a, b),
            (Self::Int(i), Self::Float(f)) => int_float_cmp(i, f),
            (Self::Float(f), Self::Int(i)) => int_float_cmp(i, f).reverse(),
        }
    }

    fn is_nan(self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Exact comparison of an integer with a float, without rounding `i`.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_END_AS_FLOAT {
        return Ordering::Less;
    }
    if f < I64_MIN_AS_FLOAT {
        return Ordering::Greater;
    }

    // In range, so the truncated part converts exactly.
    match i.cmp(&(f.trunc() as i64)) {
        Ordering::Equal => {
            let fraction = f.fract();
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        unequal => unequal,
    }
}

/// True when `f` is integral, inside the `i64` range and equal to `i`.
fn int_equals_float(i: i64, f: f64) -> bool {
    f.fract() == 0.0 && f >= I64_MIN_AS_FLOAT && f < I64_END_AS_FLOAT && f as i64 == i
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.strictly_equal(*other)
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A structural value: a primitive, a sequence or a map.
///
/// Objects use `BTreeMap` so that iteration and serialization order are
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value (`null`).
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A map from property names to values.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Build an object from `(name, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same name.
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(
            properties
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Look up a property of an object.
    ///
    /// Returns `None` for non-objects and absent properties.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(properties) => properties.get(name),
            _ => None,
        }
    }

    /// Look up an element of an array.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Borrow the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Consume the value, returning its elements if it is an array.
    #[must_use]
    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// True when a NaN appears anywhere inside the value.
    ///
    /// Such a value is not structurally equal to anything, itself included.
    #[must_use]
    pub fn contains_nan(&self) -> bool {
        match self {
            Self::Number(n) => n.is_nan(),
            Self::Array(elements) => elements.iter().any(Value::contains_nan),
            Self::Object(properties) => properties.values().any(Value::contains_nan),
            Self::Null | Self::Bool(_) | Self::String(_) => false,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::String(_) => 3,
            Self::Array(_) => 4,
            Self::Object(_) => 5,
        }
    }

    /// Short name of the shape, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Recursive structural equality over the closed set of value shapes.
#[must_use]
pub fn structurally_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a.strictly_equal(*b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            // Equal lengths plus every left key present on the right means
            // the key sets are identical.
            a.len() == b.len()
                && a.iter().all(|(name, x)| {
                    b.get(name)
                        .is_some_and(|y| structurally_equal(x, y))
                })
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(self, other)
    }
}

/// Total order over values, consistent with [`structurally_equal`].
///
/// Shapes order as null < boolean < number < string < array < object.
/// Numbers follow [`Number::canonical_cmp`], arrays compare element by
/// element and objects entry by entry in property-name order; a shorter
/// prefix sorts first. For values without NaN, `Equal` holds exactly when
/// the values are structurally equal.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.canonical_cmp(*b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b)
            .map(|(x, y)| canonical_cmp(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Object(a), Value::Object(b)) => a
            .iter()
            .zip(b)
            .map(|((name_a, x), (name_b, y))| {
                name_a.cmp(name_b).then_with(|| canonical_cmp(x, y))
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => left.rank().cmp(&right.rank()),
    }
}

impl Identifiable for Value {
    type Id = Option<Value>;

    /// The `"id"` property, or `None` when absent.
    fn id(&self) -> Option<Value> {
        self.get(ID_FIELD).cloned()
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(Number::Int(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Self::Array(elements)
    }
}

// =============================================================================
// TESTS
// =============================================================================
