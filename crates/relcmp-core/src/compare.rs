//! # Order-Insensitive Comparison
//!
//! Decides whether two lists hold the same records, where "same" is
//! defined by a key extractor:
//!
//! - Lists of different lengths are never equivalent, and no key is
//!   extracted for them
//! - Otherwise every key of the left list must be matched by one equal key
//!   of the right list, respecting multiplicity
//! - Order is irrelevant, and so is every field the extractor ignores
//!
//! Keys only need `PartialEq`. Matching is pairwise, O(n²) in the list
//! length. For totally ordered keys, [`compare_arrays_using_ordered`]
//! counts keys in a `BTreeMap` instead, and
//! [`ArrayComparator::compare_sorted_by`] sorts and merges keys under a
//! caller-supplied order.

use crate::types::Identifiable;
use std::cmp::Ordering;
use std::collections::BTreeMap;

// =============================================================================
// MULTISET MATCHING
// =============================================================================

/// Multiset equality of two key lists under `PartialEq`.
///
/// Greedy matching is exact here: as long as key equality is an
/// equivalence, any unmatched right-hand partner of a left key is as good as
/// any other.
fn keys_equivalent<K: PartialEq>(left: &[K], right: &[K]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut matched = vec![false; right.len()];
    left.iter().all(|key| claim_partner(key, right, &mut matched))
}

/// Mark the first unmatched key of `right` equal to `key` as matched.
fn claim_partner<K: PartialEq>(key: &K, right: &[K], matched: &mut [bool]) -> bool {
    for (slot, candidate) in matched.iter_mut().zip(right) {
        if !*slot && key == candidate {
            *slot = true;
            return true;
        }
    }
    false
}

/// Multiset equality of two key lists by counting.
fn ordered_keys_equivalent<K: Ord>(left: Vec<K>, right: Vec<K>) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in left {
        *counts.entry(key).or_insert(0) += 1;
    }
    for key in right {
        match counts.get_mut(&key) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    counts.values().all(|&count| count == 0)
}

// =============================================================================
// KEY DIFF
// =============================================================================

/// Why two lists are not equivalent.
///
/// Both sides respect multiplicity: a key present twice on the left and
/// once on the right appears once in `missing`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDiff<K> {
    /// Left keys without an equal partner on the right.
    pub missing: Vec<K>,
    /// Right keys without an equal partner on the left.
    pub unexpected: Vec<K>,
}

impl<K> KeyDiff<K> {
    /// True when the lists were equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl<K> Default for KeyDiff<K> {
    fn default() -> Self {
        Self {
            missing: Vec::new(),
            unexpected: Vec::new(),
        }
    }
}

fn diff_keys<K: PartialEq>(left: Vec<K>, right: Vec<K>) -> KeyDiff<K> {
    let mut matched = vec![false; right.len()];
    let mut diff = KeyDiff::default();

    for key in left {
        if !claim_partner(&key, &right, &mut matched) {
            diff.missing.push(key);
        }
    }
    diff.unexpected = right
        .into_iter()
        .zip(matched)
        .filter_map(|(key, was_matched)| (!was_matched).then_some(key))
        .collect();

    diff
}

/// Sort both key lists and walk them side by side.
///
/// Keys that are `Equal` under `order` but not `==` (NaN-bearing values)
/// never match and are reported.
fn sorted_diff<K, C>(mut left: Vec<K>, mut right: Vec<K>, order: C) -> KeyDiff<K>
where
    K: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    left.sort_by(|a, b| order(a, b));
    right.sort_by(|a, b| order(a, b));

    let mut diff = KeyDiff::default();
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let step = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => match order(l, r) {
                Ordering::Equal if l != r => Ordering::Less,
                ordering => ordering,
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match step {
            Ordering::Less => diff.missing.extend(left.next()),
            Ordering::Greater => diff.unexpected.extend(right.next()),
            Ordering::Equal => {
                left.next();
                right.next();
            }
        }
    }
    diff
}

// =============================================================================
// ARRAY COMPARATOR
// =============================================================================

/// A reusable comparator built around a key extractor.
///
/// ```
/// use relcmp_core::ArrayComparator;
///
/// let by_id = ArrayComparator::new(|pair: &(u32, &str)| pair.0);
/// assert!(by_id.compare(&[(1, "a"), (2, "b")], &[(2, "x"), (1, "y")]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArrayComparator<F> {
    key_of: F,
}

impl<F> ArrayComparator<F> {
    /// Create a comparator from a key extractor.
    pub const fn new(key_of: F) -> Self {
        Self { key_of }
    }

    /// Extract the key of every item, in order.
    pub fn keys<T, K>(&self, items: &[T]) -> Vec<K>
    where
        F: Fn(&T) -> K,
    {
        items.iter().map(&self.key_of).collect()
    }

    /// True iff both lists hold the same multiset of keys.
    pub fn compare<T, K>(&self, left: &[T], right: &[T]) -> bool
    where
        F: Fn(&T) -> K,
        K: PartialEq,
    {
        if left.len() != right.len() {
            return false;
        }
        keys_equivalent(&self.keys(left), &self.keys(right))
    }

    /// Keys that keep the lists from being equivalent.
    ///
    /// Unlike [`compare`](Self::compare), keys are extracted even when the
    /// lengths differ, so the report names the surplus records.
    pub fn diff<T, K>(&self, left: &[T], right: &[T]) -> KeyDiff<K>
    where
        F: Fn(&T) -> K,
        K: PartialEq,
    {
        diff_keys(self.keys(left), self.keys(right))
    }

    /// [`compare`](Self::compare) in O(n log n), for keys with a total order.
    ///
    /// `order` must be a total order under which equal keys compare
    /// `Equal`. Keys that compare `Equal` without being `==` must not be
    /// `==` to any key at all, as with NaN-bearing values.
    pub fn compare_sorted_by<T, K, C>(&self, left: &[T], right: &[T], order: C) -> bool
    where
        F: Fn(&T) -> K,
        K: PartialEq,
        C: Fn(&K, &K) -> Ordering,
    {
        left.len() == right.len() && self.diff_sorted_by(left, right, order).is_empty()
    }

    /// [`diff`](Self::diff) in O(n log n), under the same contract as
    /// [`compare_sorted_by`](Self::compare_sorted_by).
    ///
    /// Both sides of the report come out sorted by `order`.
    pub fn diff_sorted_by<T, K, C>(&self, left: &[T], right: &[T], order: C) -> KeyDiff<K>
    where
        F: Fn(&T) -> K,
        K: PartialEq,
        C: Fn(&K, &K) -> Ordering,
    {
        sorted_diff(self.keys(left), self.keys(right), order)
    }
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

/// Build a comparator that treats two lists as equal when they hold the same
/// keys, in any order.
///
/// ```
/// use relcmp_core::compare_arrays_using;
///
/// let compare = compare_arrays_using(|n: &i64| *n);
/// assert!(compare(&[1, 2, 3, 4], &[1, 3, 2, 4]));
/// assert!(!compare(&[1, 2, 3, 4], &[1, 2, 3, 4, 5]));
/// ```
pub fn compare_arrays_using<T, K, F>(key_of: F) -> impl Fn(&[T], &[T]) -> bool
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    let comparator = ArrayComparator::new(key_of);
    move |left: &[T], right: &[T]| comparator.compare(left, right)
}

/// Build a comparator keyed on the records' identity.
///
/// Same as `compare_arrays_using(|item| item.id())`.
pub fn compare_arrays_using_ids<T: Identifiable>() -> impl Fn(&[T], &[T]) -> bool {
    compare_arrays_using(|item: &T| item.id())
}

/// Like [`compare_arrays_using`], for totally ordered keys.
///
/// Counts keys instead of matching them pairwise. Agrees with
/// [`compare_arrays_using`] on every input.
pub fn compare_arrays_using_ordered<T, K, F>(key_of: F) -> impl Fn(&[T], &[T]) -> bool
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let comparator = ArrayComparator::new(key_of);
    move |left: &[T], right: &[T]| {
        left.len() == right.len()
            && ordered_keys_equivalent(comparator.keys(left), comparator.keys(right))
    }
}

/// Like [`compare_arrays_using`], with a fallible key extractor.
///
/// The length check runs first. The first extraction error is returned
/// unchanged; no recovery is attempted.
pub fn try_compare_arrays_using<T, K, E, F>(
    key_of: F,
) -> impl Fn(&[T], &[T]) -> Result<bool, E>
where
    F: Fn(&T) -> Result<K, E>,
    K: PartialEq,
{
    move |left: &[T], right: &[T]| {
        if left.len() != right.len() {
            return Ok(false);
        }
        let left_keys = left.iter().map(&key_of).collect::<Result<Vec<_>, E>>()?;
        let right_keys = right.iter().map(&key_of).collect::<Result<Vec<_>, E>>()?;
        Ok(keys_equivalent(&left_keys, &right_keys))
    }
}

// =============================================================================
// TESTS
// =============================================================================
