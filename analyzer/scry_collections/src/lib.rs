//! Multisets and order statistics.
//!
//! Inference classifies *bags* of co-located values, so the two core
//! types here are a mutable counter ([`Bag`]) and its immutable, hashable
//! snapshot ([`FrozenBag`]). Patterns embed frozen bags (their observed
//! samples), and pattern deduplication during merging relies on the
//! frozen hash being stable and order-independent.
//!
//! [`Stats`] condenses a bag of ordered values (or of container lengths)
//! into the five-point summary the pattern algebra carries around.

mod bag;
mod length;
mod stats;

pub use bag::{Bag, FrozenBag};
pub use length::Length;
pub use stats::{EmptySampleError, Stats};
