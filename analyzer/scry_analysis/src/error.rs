//! Fatal analysis errors.
//!
//! Inference misses are not errors (the matcher falls through to the
//! next candidate) and validation anomalies are warnings delivered to
//! the observer; only configuration mistakes and structurally impossible
//! requests abort an analysis.

use chrono::NaiveDateTime;
use scry_collections::EmptySampleError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("bad_threshold must lie in [0, 1], got {0}")]
    BadThreshold(f64),

    #[error("empty_threshold must lie in [0, 1], got {0}")]
    EmptyThreshold(f64),

    #[error("timestamp window is inverted: {min} > {max}")]
    TimestampWindow {
        min: NaiveDateTime,
        max: NaiveDateTime,
    },

    #[error("timestamp window out of range")]
    TimestampRange,

    #[error(transparent)]
    EmptySample(#[from] EmptySampleError),
}
