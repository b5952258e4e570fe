//! Bounded ranked set: keeps the best `capacity` distinct values of a stream.
//!
//! Values are ordered by a [`Ranking`]; the last value in that order is the
//! worst one and is evicted whenever an insert pushes the set over capacity.
//! Two values that compare `Equal` are the same member, so re-inserting a
//! tracked value changes nothing.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

/// Total order used to rank values, best first
///
/// Members are compared through their borrowed `Key` form, so lookups can
/// use a `&str` for a set of `String`s. `compare` must be a total order that
/// returns `Equal` only for keys of the same member.
pub trait Ranking {
    type Key: ?Sized;

    fn compare(a: &Self::Key, b: &Self::Key) -> Ordering;
}

struct Ranked<T, R> {
    value: T,
    _ranking: PhantomData<fn() -> R>,
}

impl<T, R> Ranked<T, R> {
    fn new(value: T) -> Self {
        Self {
            value,
            _ranking: PhantomData,
        }
    }
}

impl<T: Borrow<R::Key>, R: Ranking> PartialEq for Ranked<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Borrow<R::Key>, R: Ranking> Eq for Ranked<T, R> {}

impl<T: Borrow<R::Key>, R: Ranking> PartialOrd for Ranked<T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Borrow<R::Key>, R: Ranking> Ord for Ranked<T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        R::compare(self.value.borrow(), other.value.borrow())
    }
}

/// Common view of stored members and borrowed lookup keys
///
/// `BTreeSet` lookups need the stored type to `Borrow` the query type; both
/// `Ranked` and `KeyRef` borrow as this trait object, which orders by `R`.
trait RankKey<R: Ranking> {
    fn key(&self) -> &R::Key;
}

impl<T: Borrow<R::Key>, R: Ranking> RankKey<R> for Ranked<T, R> {
    fn key(&self) -> &R::Key {
        self.value.borrow()
    }
}

struct KeyRef<'a, R: Ranking> {
    key: &'a R::Key,
    _ranking: PhantomData<fn() -> R>,
}

impl<R: Ranking> RankKey<R> for KeyRef<'_, R> {
    fn key(&self) -> &R::Key {
        self.key
    }
}

impl<'a, T, R> Borrow<dyn RankKey<R> + 'a> for Ranked<T, R>
where
    T: Borrow<R::Key> + 'a,
    R: Ranking + 'a,
{
    fn borrow(&self) -> &(dyn RankKey<R> + 'a) {
        self
    }
}

impl<R: Ranking> PartialEq for dyn RankKey<R> + '_ {
    fn eq(&self, other: &Self) -> bool {
        R::compare(self.key(), other.key()) == Ordering::Equal
    }
}

impl<R: Ranking> Eq for dyn RankKey<R> + '_ {}

impl<R: Ranking> PartialOrd for dyn RankKey<R> + '_ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Ranking> Ord for dyn RankKey<R> + '_ {
    fn cmp(&self, other: &Self) -> Ordering {
        R::compare(self.key(), other.key())
    }
}

/// Set of at most `capacity` distinct values, ranked by `R`
pub struct BoundedRankedSet<T, R> {
    members: BTreeSet<Ranked<T, R>>,
    capacity: usize,
}

impl<T: Borrow<R::Key>, R: Ranking> BoundedRankedSet<T, R> {
    /// Create an empty set that retains up to `capacity` values
    pub fn new(capacity: usize) -> Self {
        Self {
            members: BTreeSet::new(),
            capacity,
        }
    }

    /// Insert a value, then evict the worst member if over capacity
    ///
    /// Returns the evicted value, which is `value` itself when it ranks
    /// below every member of a full set. Inserting a value that is already
    /// a member is a no-op and returns `None`.
    pub fn insert(&mut self, value: T) -> Option<T> {
        if !self.members.insert(Ranked::new(value)) {
            return None;
        }
        if self.members.len() > self.capacity {
            return self.members.pop_last().map(|ranked| ranked.value);
        }
        None
    }

    /// Whether `key` is a member, in O(log capacity)
    pub fn contains(&self, key: &R::Key) -> bool {
        let lookup = KeyRef::<R> {
            key,
            _ranking: PhantomData,
        };
        self.members.contains(&lookup as &dyn RankKey<R>)
    }

    /// Whether inserting `key` would change the set
    ///
    /// False for current members and for keys that rank at or below the
    /// worst member of a full set. Lets callers skip building an owned value
    /// that `insert` would discard.
    pub fn admits(&self, key: &R::Key) -> bool {
        if self.contains(key) {
            return false;
        }
        if self.members.len() < self.capacity {
            return true;
        }
        self.members
            .last()
            .is_some_and(|worst| R::compare(key, worst.value.borrow()) == Ordering::Less)
    }

    /// Members in rank order, best first
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.members.iter().map(|ranked| &ranked.value)
    }

    /// The member that would be evicted next
    pub fn worst(&self) -> Option<&T> {
        self.members.last().map(|ranked| &ranked.value)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug + Borrow<R::Key>, R: Ranking> fmt::Debug for BoundedRankedSet<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedRankedSet")
            .field("capacity", &self.capacity)
            .field("members", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ascending;

    impl Ranking for Ascending {
        type Key = u32;

        fn compare(a: &u32, b: &u32) -> Ordering {
            a.cmp(b)
        }
    }

    #[test]
    fn test_keeps_best_values() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(3);
        for v in [9, 4, 7, 1, 8, 2] {
            set.insert(v);
        }
        assert_eq!(set.to_vec(), vec![1, 2, 4]);
        assert_eq!(set.worst(), Some(&4));
    }

    #[test]
    fn test_insert_reports_eviction() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(2);
        assert_eq!(set.insert(5), None);
        assert_eq!(set.insert(3), None);
        assert_eq!(set.insert(1), Some(5));
        // Worse than every member of a full set: rejected by the same path
        assert_eq!(set.insert(10), Some(10));
        assert_eq!(set.to_vec(), vec![1, 3]);
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(3);
        set.insert(2);
        set.insert(6);
        let before = set.to_vec();
        for _ in 0..10 {
            assert_eq!(set.insert(6), None);
            assert_eq!(set.insert(2), None);
        }
        assert_eq!(set.to_vec(), before);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&6));
        assert!(!set.contains(&7));
    }

    #[test]
    fn test_admits_only_values_that_change_the_set() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(3);
        assert!(set.admits(&5));
        set.insert(5);
        assert!(!set.admits(&5));
        set.insert(2);
        set.insert(8);

        // Full: members and values at or below the worst are turned away
        assert!(!set.admits(&2));
        assert!(!set.admits(&8));
        assert!(!set.admits(&9));
        assert!(set.admits(&7));
        assert!(set.admits(&1));

        for v in [0, 3, 4, 6, 7, 9, 10] {
            let before = set.to_vec();
            let admitted = set.admits(&v);
            set.insert(v);
            assert_eq!(admitted, set.to_vec() != before, "value {}", v);
        }
    }

    #[test]
    fn test_zero_capacity_admits_nothing() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(0);
        assert!(!set.admits(&1));
        assert_eq!(set.insert(1), Some(1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_contains_matches_membership_after_evictions() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(50);
        for v in (0..500).rev() {
            set.insert(v);
        }
        for v in 0..500 {
            assert_eq!(set.contains(&v), v < 50, "value {}", v);
        }
    }

    #[test]
    fn test_large_capacity() {
        let mut set: BoundedRankedSet<u32, Ascending> = BoundedRankedSet::new(100);
        for v in (0..1000).rev() {
            set.insert(v);
        }
        assert_eq!(set.len(), 100);
        assert_eq!(set.to_vec(), (0..100).collect::<Vec<_>>());
    }
}
