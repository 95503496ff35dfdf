//! Set algebra over hash sets of arguments (or of anything else).
//!
//! All the functions of this module leave their inputs untouched and return new containers.

use std::collections::HashSet;
use std::hash::Hash;

/// Returns `true` iff the two sets have no element in common.
///
/// The smallest set is the one that is iterated over.
///
/// # Example
///
/// ```
/// # use qbaf_relations::utils::set_algebra;
/// # use std::collections::HashSet;
/// let a = HashSet::from(["a", "b"]);
/// let b = HashSet::from(["c"]);
/// assert!(set_algebra::is_disjoint(&a, &b));
/// ```
pub fn is_disjoint<T>(a: &HashSet<T>, b: &HashSet<T>) -> bool
where
    T: Eq + Hash,
{
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    !smaller.iter().any(|x| larger.contains(x))
}

/// Returns `true` iff every element of `a` belongs to `b`.
pub fn is_subset<T>(a: &HashSet<T>, b: &HashSet<T>) -> bool
where
    T: Eq + Hash,
{
    a.iter().all(|x| b.contains(x))
}

/// Returns a new set containing the elements of both sets.
///
/// The largest set is copied, then the elements of the smallest one are added.
pub fn union<T>(a: &HashSet<T>, b: &HashSet<T>) -> HashSet<T>
where
    T: Clone + Eq + Hash,
{
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut result = larger.clone();
    result.extend(smaller.iter().cloned());
    result
}

/// Returns a new set containing the elements shared by both sets.
pub fn intersection<T>(a: &HashSet<T>, b: &HashSet<T>) -> HashSet<T>
where
    T: Clone + Eq + Hash,
{
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    smaller
        .iter()
        .filter(|x| larger.contains(*x))
        .cloned()
        .collect()
}

/// Returns a new set containing the elements of `a` that do not belong to `b`.
pub fn difference<T>(a: &HashSet<T>, b: &HashSet<T>) -> HashSet<T>
where
    T: Clone + Eq + Hash,
{
    a.iter().filter(|x| !b.contains(*x)).cloned().collect()
}

/// Returns all the subsets of `s` with exactly `k` elements.
///
/// Each subset appears exactly once.
/// Asking for subsets of size 0 gives a single empty set (even if `s` is empty),
/// while asking for more elements than `s` holds gives no subset at all.
///
/// The subsets are produced by [`iter_k_subsets`] on a view of `s` taken in its iteration order.
///
/// # Example
///
/// ```
/// # use qbaf_relations::utils::set_algebra;
/// # use std::collections::HashSet;
/// let s = HashSet::from(["a", "b", "c", "d"]);
/// let subsets = set_algebra::k_subsets(&s, 2);
/// assert_eq!(6, subsets.len());
/// assert!(subsets.iter().all(|sub| sub.len() == 2 && set_algebra::is_subset(sub, &s)));
/// ```
pub fn k_subsets<T>(s: &HashSet<T>, k: usize) -> Vec<HashSet<T>>
where
    T: Clone + Eq + Hash,
{
    let view = s.iter().collect::<Vec<&T>>();
    iter_k_subsets(&view, k)
        .map(|subset| subset.into_iter().map(|x| (*x).clone()).collect())
        .collect()
}

/// Iterates over the combinations of `k` elements taken from `elements`.
///
/// Combinations are given as vectors of references, ordered as in `elements`;
/// the combinations themselves come in the lexicographic order of the positions they select.
/// Duplicated values in `elements` are considered as different elements.
///
/// # Example
///
/// ```
/// # use qbaf_relations::utils::set_algebra;
/// let combinations = set_algebra::iter_k_subsets(&[1, 2, 3], 2).collect::<Vec<_>>();
/// assert_eq!(vec![vec![&1, &2], vec![&1, &3], vec![&2, &3]], combinations);
/// ```
pub fn iter_k_subsets<T>(elements: &[T], k: usize) -> KSubsets<'_, T> {
    let positions = if k <= elements.len() {
        Some((0..k).collect())
    } else {
        None
    };
    KSubsets {
        elements,
        positions,
    }
}

/// An iterator over the `k`-combinations of a slice.
///
/// Built by [`iter_k_subsets`].
pub struct KSubsets<'a, T> {
    elements: &'a [T],
    positions: Option<Vec<usize>>,
}

impl<'a, T> KSubsets<'a, T> {
    // Moves the positions to the next combination, or exhausts the iterator.
    fn advance(&mut self) {
        let n = self.elements.len();
        let positions = match self.positions.as_mut() {
            Some(p) => p,
            None => return,
        };
        let k = positions.len();
        match (0..k).rev().find(|&i| positions[i] < n - k + i) {
            Some(i) => {
                positions[i] += 1;
                for j in i + 1..k {
                    positions[j] = positions[j - 1] + 1;
                }
            }
            None => self.positions = None,
        }
    }
}

impl<'a, T> Iterator for KSubsets<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let elements = self.elements;
        let current = self
            .positions
            .as_ref()?
            .iter()
            .map(|i| &elements[*i])
            .collect();
        self.advance();
        Some(current)
    }
}

/// Returns `true` iff at least one of the sets is a subset of `superset`.
///
/// The search stops at the first set that matches.
pub fn contains_subset_of<T>(sets: &[HashSet<T>], superset: &HashSet<T>) -> bool
where
    T: Eq + Hash,
{
    sets.iter().any(|s| is_subset(s, superset))
}

/// Returns a new vector made of the elements of `a` followed by the elements of `b`.
pub fn list_concat<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Clone,
{
    let mut result = Vec::with_capacity(a.len() + b.len());
    result.extend_from_slice(a);
    result.extend_from_slice(b);
    result
}
