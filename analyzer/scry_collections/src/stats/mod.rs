//! Five-point order-statistic summaries.

#[cfg(test)]
mod tests;

use std::hash::Hash;

use thiserror::Error;

use crate::{FrozenBag, Length};

/// A converter or summary was handed an empty sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cannot summarize an empty sample")]
pub struct EmptySampleError;

/// Cardinality, quartiles, and extrema of a sample, plus the sample
/// itself.
///
/// Quartile keys are sample members, picked by cumulative position over
/// the keys in ascending order: `q_k` is the first key whose cumulative
/// count reaches `k * card / 4`. `unique` is true iff the most common
/// element occurs exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stats<T: Eq + Hash> {
    sample: FrozenBag<T>,
    card: u64,
    min: T,
    q1: T,
    median: T,
    q3: T,
    max: T,
    unique: bool,
}

impl<T: Clone + Eq + Hash + Ord> Stats<T> {
    pub fn from_sample(sample: FrozenBag<T>) -> Result<Self, EmptySampleError> {
        let mut keys: Vec<&T> = sample.keys().collect();
        if keys.is_empty() {
            return Err(EmptySampleError);
        }
        keys.sort_unstable();
        let last = keys[keys.len() - 1];

        let card = sample.card();
        let targets = [0, card / 4, card / 2, 3 * card / 4];
        let mut summary: Vec<T> = Vec::with_capacity(5);
        let mut index = 0u64;
        for key in &keys {
            while summary.len() < targets.len() && index >= targets[summary.len()] {
                summary.push((*key).clone());
            }
            if summary.len() == targets.len() {
                break;
            }
            index += sample.count(key);
        }
        // Whatever the walk did not reach sits at the maximum.
        while summary.len() < 5 {
            summary.push((*last).clone());
        }

        let unique = sample.max_count() == 1;
        let mut summary = summary.into_iter();
        // Length checked above; the unreachable arm satisfies the drain.
        match (
            summary.next(),
            summary.next(),
            summary.next(),
            summary.next(),
            summary.next(),
        ) {
            (Some(min), Some(q1), Some(median), Some(q3), Some(max)) => Ok(Stats {
                sample,
                card,
                min,
                q1,
                median,
                q3,
                max,
                unique,
            }),
            _ => Err(EmptySampleError),
        }
    }

    /// Merge by sample addition and re-derivation.
    pub fn merge(&self, other: &Self) -> Self {
        let sample = &self.sample + &other.sample;
        // The sum of two non-empty samples is non-empty.
        Stats::from_sample(sample).unwrap_or_else(|EmptySampleError| self.clone())
    }

    #[inline]
    pub fn sample(&self) -> &FrozenBag<T> {
        &self.sample
    }

    #[inline]
    pub fn card(&self) -> u64 {
        self.card
    }

    #[inline]
    pub fn min(&self) -> &T {
        &self.min
    }

    #[inline]
    pub fn q1(&self) -> &T {
        &self.q1
    }

    #[inline]
    pub fn median(&self) -> &T {
        &self.median
    }

    #[inline]
    pub fn q3(&self) -> &T {
        &self.q3
    }

    #[inline]
    pub fn max(&self) -> &T {
        &self.max
    }

    #[inline]
    pub fn unique(&self) -> bool {
        self.unique
    }
}

impl Stats<u64> {
    /// Summarize the lengths of a bag's elements.
    pub fn from_lengths<T: Length + Eq + Hash>(
        sample: &FrozenBag<T>,
    ) -> Result<Self, EmptySampleError> {
        Stats::from_sample(sample.map(Length::length))
    }

    /// Summarize lengths supplied directly (for containers, which cannot
    /// key a bag themselves).
    pub fn from_lengths_iter(
        lengths: impl IntoIterator<Item = u64>,
    ) -> Result<Self, EmptySampleError> {
        Stats::from_sample(lengths.into_iter().collect())
    }
}
