//! Mutable and frozen multisets.


use std::hash::{Hash, Hasher};
use std::iter;
use std::ops::{Add, Sub};

use rustc_hash::{FxHashMap, FxHasher};

/// A mutable multiset: counts per distinct element.
#[derive(Clone, Debug, Default)]
pub struct Bag<T: Eq + Hash> {
    counts: FxHashMap<T, u64>,
}

impl<T: Eq + Hash> Bag<T> {
    pub fn new() -> Self {
        Bag {
            counts: FxHashMap::default(),
        }
    }

    /// Record one observation of `item`.
    pub fn push(&mut self, item: T) {
        self.add(item, 1);
    }

    /// Record `count` observations of `item`.
    pub fn add(&mut self, item: T, count: u64) {
        if count > 0 {
            *self.counts.entry(item).or_insert(0) += count;
        }
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of observations (cardinality).
    pub fn card(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn count(&self, item: &T) -> u64 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
        self.counts.iter().map(|(item, &count)| (item, count))
    }

    /// Freeze into an immutable bag with a precomputed hash.
    pub fn freeze(self) -> FrozenBag<T> {
        FrozenBag::from_counts_map(self.counts)
    }
}

impl<T: Eq + Hash> Extend<T> for Bag<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for Bag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = Bag::new();
        bag.extend(iter);
        bag
    }
}

impl<T: Eq + Hash> PartialEq for Bag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<T: Eq + Hash> Eq for Bag<T> {}

/// An immutable multiset with a stable, order-independent hash.
///
/// The hash is fixed at freeze time so bags (and the patterns embedding
/// them) can key hash maps; two bags with equal element counts hash
/// identically no matter what order they were built in.
#[derive(Clone, Debug)]
pub struct FrozenBag<T> {
    counts: FxHashMap<T, u64>,
    card: u64,
    hash: u64,
}

impl<T: Eq + Hash> FrozenBag<T> {
    pub fn from_counts(counts: impl IntoIterator<Item = (T, u64)>) -> Self {
        let mut bag = Bag::new();
        for (item, count) in counts {
            bag.add(item, count);
        }
        bag.freeze()
    }

    fn from_counts_map(counts: FxHashMap<T, u64>) -> Self {
        let card = counts.values().sum();
        // Commutative mix so insertion order cannot leak into the hash.
        let hash = counts
            .iter()
            .map(|(item, count)| {
                let mut hasher = FxHasher::default();
                item.hash(&mut hasher);
                count.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, u64::wrapping_add);
        FrozenBag { counts, card, hash }
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of observations (cardinality).
    #[inline]
    pub fn card(&self) -> u64 {
        self.card
    }

    pub fn count(&self, item: &T) -> u64 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.counts.contains_key(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
        self.counts.iter().map(|(item, &count)| (item, count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.counts.keys()
    }

    /// Iterate elements with repetition.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.counts
            .iter()
            .flat_map(|(item, &count)| iter::repeat(item).take(count as usize))
    }

    /// Elements by descending count; ascending element order breaks ties
    /// so the result is deterministic.
    pub fn most_common(&self, n: Option<usize>) -> Vec<(&T, u64)>
    where
        T: Ord,
    {
        let mut entries: Vec<(&T, u64)> = self.iter().collect();
        entries.sort_by(|(a_item, a_count), (b_item, b_count)| {
            b_count.cmp(a_count).then_with(|| a_item.cmp(b_item))
        });
        if let Some(n) = n {
            entries.truncate(n);
        }
        entries
    }

    /// Count of the most common element, 0 when empty.
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Transform elements, merging counts of collapsing keys.
    pub fn map<U: Eq + Hash>(&self, mut f: impl FnMut(&T) -> U) -> FrozenBag<U> {
        FrozenBag::from_counts(self.iter().map(|(item, count)| (f(item), count)))
    }

    /// Like [`FrozenBag::map`], dropping elements mapped to `None`.
    pub fn filter_map<U: Eq + Hash>(&self, mut f: impl FnMut(&T) -> Option<U>) -> FrozenBag<U> {
        FrozenBag::from_counts(
            self.iter()
                .filter_map(|(item, count)| f(item).map(|mapped| (mapped, count))),
        )
    }
}

impl<T: Eq + Hash> FromIterator<T> for FrozenBag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Bag<T>>().freeze()
    }
}

impl<T: Eq + Hash> PartialEq for FrozenBag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.counts == other.counts
    }
}

impl<T: Eq + Hash> Eq for FrozenBag<T> {}

impl<T: Eq + Hash> PartialEq<Bag<T>> for FrozenBag<T> {
    fn eq(&self, other: &Bag<T>) -> bool {
        self.counts == other.counts
    }
}

impl<T: Eq + Hash> PartialEq<FrozenBag<T>> for Bag<T> {
    fn eq(&self, other: &FrozenBag<T>) -> bool {
        other == self
    }
}

impl<T> Hash for FrozenBag<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
        state.write_u64(self.card);
        state.write_usize(self.counts.len());
    }
}

/// Pointwise count sum.
impl<T: Eq + Hash + Clone> Add for &FrozenBag<T> {
    type Output = FrozenBag<T>;

    fn add(self, rhs: &FrozenBag<T>) -> FrozenBag<T> {
        let mut bag = Bag::new();
        for (item, count) in self.iter().chain(rhs.iter()) {
            bag.add(item.clone(), count);
        }
        bag.freeze()
    }
}

/// Saturating pointwise count difference; zeroed elements drop out.
impl<T: Eq + Hash + Clone> Sub for &FrozenBag<T> {
    type Output = FrozenBag<T>;

    fn sub(self, rhs: &FrozenBag<T>) -> FrozenBag<T> {
        let mut bag = Bag::new();
        for (item, count) in self.iter() {
            let remaining = count.saturating_sub(rhs.count(item));
            bag.add(item.clone(), remaining);
        }
        bag.freeze()
    }
}
