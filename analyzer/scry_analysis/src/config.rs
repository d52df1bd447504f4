//! Analyzer configuration.

use chrono::NaiveDateTime;

use crate::Error;
use scry_types::convert::RelativeDelta;

/// Tunable knobs for an analysis run.
///
/// The defaults suit exploratory use on real-world dumps: a couple of
/// percent of dirty values is tolerated, almost-entirely-empty string
/// columns stay plain strings, and numbers within twenty years back or
/// ten years forward of now read as timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Max count-weighted share of string values permitted to fail a
    /// candidate conversion. In `[0, 1]`.
    pub bad_threshold: f64,
    /// Empty-string share above which string inference short-circuits
    /// to a plain string pattern. In `[0, 1]`.
    pub empty_threshold: f64,
    /// Maximum number of distinct keys/columns classified as a literal
    /// choice set rather than a general key pattern.
    pub field_threshold: usize,
    /// String length above which numeric/date-string inference is
    /// skipped.
    pub max_numeric_len: u64,
    /// Strip leading/trailing whitespace before matching strings.
    pub strip_whitespace: bool,
    /// Lower bound of the POSIX timestamp window; defaults to twenty
    /// years before now.
    pub min_timestamp: Option<NaiveDateTime>,
    /// Upper bound of the POSIX timestamp window; defaults to ten years
    /// from now.
    pub max_timestamp: Option<NaiveDateTime>,
    /// Enable the cross-thread progress counter.
    pub track_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bad_threshold: 0.02,
            empty_threshold: 0.98,
            field_threshold: 20,
            max_numeric_len: 30,
            strip_whitespace: true,
            min_timestamp: None,
            max_timestamp: None,
            track_progress: false,
        }
    }
}

impl Config {
    /// Resolve the timestamp window against the current clock and check
    /// every knob, failing with the first offending option.
    pub(crate) fn resolve_window(&self) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
        if !(0.0..=1.0).contains(&self.bad_threshold) {
            return Err(Error::BadThreshold(self.bad_threshold));
        }
        if !(0.0..=1.0).contains(&self.empty_threshold) {
            return Err(Error::EmptyThreshold(self.empty_threshold));
        }
        let now = chrono::Utc::now().naive_utc();
        let min = match self.min_timestamp {
            Some(min) => min,
            None => RelativeDelta::years(-20)
                .apply_to(now)
                .ok_or(Error::TimestampRange)?,
        };
        let max = match self.max_timestamp {
            Some(max) => max,
            None => RelativeDelta::years(10)
                .apply_to(now)
                .ok_or(Error::TimestampRange)?,
        };
        if min > max {
            return Err(Error::TimestampWindow { min, max });
        }
        Ok((min, max))
    }
}
