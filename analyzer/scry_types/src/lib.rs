//! The scry pattern algebra and its converters.
//!
//! A *pattern* is the analyzer's output: a compact description of the
//! repetitive shape of a bag of values. This crate defines the pattern
//! tree ([`Pattern`] and its variants), the three operations that drive
//! inference (`validate`, `compare`, `merge`), the string/number
//! converters the matcher probes candidate encodings with, and a terse
//! [`std::fmt::Display`] rendering of pattern trees.
//!
//! The analyzer itself lives in `scry_analysis`; nothing here performs
//! I/O or mutates its inputs.

pub mod convert;
mod display;
mod pattern;

pub use display::format_int;
pub use pattern::{
    Bool, DateTime, Dict, DictField, Field, Fields, Float, Int, List, NumRepr, NumberKind,
    Pattern, Str, StrRepr, Tuple, TupleField, Url,
};
