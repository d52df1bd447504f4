//! Input data model for the scry analyzer.
//!
//! Everything the analyzer consumes is a [`Datum`]: a tree of mappings,
//! sequences, records, and leaf scalars, fully materialized in memory
//! before analysis begins. The analyzer never mutates a `Datum`; it only
//! walks it, so the model optimizes for cheap traversal and for use as a
//! multiset key (total order, stable hash).
//!
//! # Hashability
//!
//! Multisets of observed values underpin the whole inference procedure,
//! which means values must be usable as hash-map keys. `List` and `Map`
//! are excluded from that role ([`Datum::is_hashable`]); a bag containing
//! one degrades to the opaque `value` pattern, exactly like the dynamic
//! original this model replaces.

mod datum;
mod map;
mod real;
mod record;

pub use datum::Datum;
pub use map::{Map, MapIter};
pub use real::Real;
pub use record::Record;

pub use chrono::NaiveDateTime;
