//! # Change Filter
//!
//! Suppresses record lists that are equivalent to the last one let through.
//!
//! Item pages receive the same relationship list many times over (every
//! refresh re-sends it, often re-sorted). Only a list that actually differs
//! under the comparator should cause downstream work.

use std::iter::FusedIterator;

/// Remembers the last distinct list and tests new ones against it.
///
/// `compare` decides equivalence; any of the `compare_arrays_using*`
/// constructors fits.
#[derive(Debug, Clone)]
pub struct ChangeFilter<T, C> {
    compare: C,
    last: Option<Vec<T>>,
}

impl<T, C> ChangeFilter<T, C>
where
    C: Fn(&[T], &[T]) -> bool,
{
    /// Create a filter that has seen nothing yet.
    pub const fn new(compare: C) -> Self {
        Self {
            compare,
            last: None,
        }
    }

    /// True when `next` would be let through.
    pub fn is_change(&self, next: &[T]) -> bool {
        self.last
            .as_deref()
            .is_none_or(|last| !(self.compare)(last, next))
    }

    /// Offer a list to the filter.
    ///
    /// Returns true and remembers `next` when it is the first list or is
    /// not equivalent to the remembered one. An equivalent list is dropped
    /// and the remembered list stays as it was.
    pub fn observe(&mut self, next: Vec<T>) -> bool {
        if self.is_change(&next) {
            self.last = Some(next);
            true
        } else {
            false
        }
    }

    /// The last list let through.
    pub fn last(&self) -> Option<&[T]> {
        self.last.as_deref()
    }

    /// Forget the remembered list; the next one is always let through.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// =============================================================================
// ITERATOR ADAPTER
// =============================================================================

/// Iterator yielding only lists that differ from the previously yielded one.
///
/// Created by [`DistinctUntilChangedExt::distinct_until_changed_by`].
#[derive(Debug, Clone)]
pub struct DistinctUntilChanged<I, T, C> {
    inner: I,
    filter: ChangeFilter<T, C>,
}

impl<I, T, C> Iterator for DistinctUntilChanged<I, T, C>
where
    I: Iterator<Item = Vec<T>>,
    T: Clone,
    C: Fn(&[T], &[T]) -> bool,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        loop {
            let next = self.inner.next()?;
            if self.filter.is_change(&next) {
                self.filter.last = Some(next.clone());
                return Some(next);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

impl<I, T, C> FusedIterator for DistinctUntilChanged<I, T, C>
where
    I: FusedIterator<Item = Vec<T>>,
    T: Clone,
    C: Fn(&[T], &[T]) -> bool,
{
}

/// Adds [`distinct_until_changed_by`](Self::distinct_until_changed_by) to
/// iterators over record lists.
pub trait DistinctUntilChangedExt<T>: Iterator<Item = Vec<T>> + Sized {
    /// Skip every list equivalent to the previously yielded one.
    ///
    /// ```
    /// use relcmp_core::{DistinctUntilChangedExt, compare_arrays_using};
    ///
    /// let snapshots = vec![vec![1, 2], vec![2, 1], vec![2, 3], vec![3, 2]];
    /// let distinct: Vec<_> = snapshots
    ///     .into_iter()
    ///     .distinct_until_changed_by(compare_arrays_using(|n: &i32| *n))
    ///     .collect();
    /// assert_eq!(distinct, vec![vec![1, 2], vec![2, 3]]);
    /// ```
    fn distinct_until_changed_by<C>(self, compare: C) -> DistinctUntilChanged<Self, T, C>
    where
        C: Fn(&[T], &[T]) -> bool,
    {
        DistinctUntilChanged {
            inner: self,
            filter: ChangeFilter::new(compare),
        }
    }
}

impl<I, T> DistinctUntilChangedExt<T> for I where I: Iterator<Item = Vec<T>> {}

// =============================================================================
// TESTS
// =============================================================================
