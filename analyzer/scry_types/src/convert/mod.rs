//! String and number conversions.
//!
//! Everything here is a *candidate* conversion: failure is an ordinary
//! outcome that sends the matcher on to the next candidate, so the error
//! types carry little more than the fact of failure. The one exception is
//! an empty input sample, which no converter can do anything sensible
//! with and which surfaces as a fatal error.


mod duration;

pub use duration::{parse_duration, RelativeDelta};

use std::hash::Hash;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use scry_collections::{EmptySampleError, FrozenBag};
use thiserror::Error;

/// A single value failed to convert.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("conversion failed: {0}")]
pub struct ParseFailure(pub String);

/// A whole-sample conversion failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// More count-weighted failures than the budget allows.
    #[error("{0}")]
    Failed(#[from] ParseFailure),
    /// The input sample was empty; fatal rather than a cascade miss.
    #[error(transparent)]
    EmptySample(#[from] EmptySampleError),
}

fn failure(message: impl Into<String>) -> ParseFailure {
    ParseFailure(message.into())
}

/// Parse a boolean against a false/true token pair, case-insensitively,
/// ignoring surrounding whitespace. Either token may be empty.
pub fn parse_bool(s: &str, false_token: &str, true_token: &str) -> Result<bool, ParseFailure> {
    let token = s.trim().to_lowercase();
    if token == false_token {
        Ok(false)
    } else if token == true_token {
        Ok(true)
    } else {
        Err(failure(format!("not a valid bool: {s:?}")))
    }
}

/// Parse an integer in the given base (8, 10, or 16), accepting an
/// optional sign and, for non-decimal bases, the matching radix prefix
/// (`0o`, `0x`).
pub fn parse_int(s: &str, base: u32) -> Result<i64, ParseFailure> {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits = match base {
        8 => strip_radix_prefix(unsigned, "0o", "0O"),
        16 => strip_radix_prefix(unsigned, "0x", "0X"),
        _ => unsigned,
    };
    if digits.is_empty() {
        return Err(failure(format!("not a base-{base} int: {s:?}")));
    }
    let magnitude = i64::from_str_radix(digits, base)
        .map_err(|_| failure(format!("not a base-{base} int: {s:?}")))?;
    if negative {
        magnitude
            .checked_neg()
            .ok_or_else(|| failure(format!("out of range: {s:?}")))
    } else {
        Ok(magnitude)
    }
}

fn strip_radix_prefix<'a>(s: &'a str, lower: &str, upper: &str) -> &'a str {
    s.strip_prefix(lower)
        .or_else(|| s.strip_prefix(upper))
        .unwrap_or(s)
}

/// Parse a float, ignoring surrounding whitespace.
pub fn parse_float(s: &str) -> Result<f64, ParseFailure> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| failure(format!("not a float: {s:?}")))
}

/// Parse a date-time under a strftime-style format.
///
/// Formats carrying a zone offset (`%z`) parse offset-aware and normalize
/// to naive UTC; date-only formats read as midnight.
pub fn parse_datetime(s: &str, format: &str) -> Result<NaiveDateTime, ParseFailure> {
    let trimmed = s.trim();
    let fail = || failure(format!("{s:?} does not match {format:?}"));
    if format.contains("%z") || format.contains("%:z") {
        chrono::DateTime::parse_from_str(trimmed, format)
            .map(|dt| dt.naive_utc())
            .map_err(|_| fail())
    } else {
        NaiveDateTime::parse_from_str(trimmed, format).or_else(|_| {
            NaiveDate::parse_from_str(trimmed, format)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| fail())
        })
    }
}

/// A POSIX seconds value as a naive UTC date-time, with sub-second
/// precision preserved.
pub fn datetime_from_unix_seconds(seconds: f64) -> Option<NaiveDateTime> {
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let nanos = ((seconds - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    #[allow(clippy::cast_possible_truncation)]
    chrono::DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
}

/// The POSIX seconds value of a naive UTC date-time.
pub fn unix_seconds(dt: NaiveDateTime) -> f64 {
    let utc = dt.and_utc();
    #[allow(clippy::cast_precision_loss)]
    let whole = utc.timestamp() as f64;
    whole + f64::from(utc.timestamp_subsec_nanos()) / 1e9
}

/// Apply `f` across a multiset, tolerating up to `budget` count-weighted
/// failures.
///
/// Exactly `budget` failing observations is acceptable; one more
/// propagates the underlying failure. A positive budget that excuses
/// *every* observation is also a failure: converting nothing successfully
/// is not success.
pub fn try_convert<T, U, F>(
    sample: &FrozenBag<T>,
    budget: u64,
    mut f: F,
) -> Result<FrozenBag<U>, ConversionError>
where
    T: Eq + Hash,
    U: Eq + Hash,
    F: FnMut(&T) -> Result<U, ParseFailure>,
{
    if sample.is_empty() {
        return Err(ConversionError::EmptySample(EmptySampleError));
    }
    let mut result = scry_collections::Bag::new();
    let mut remaining = budget;
    for (item, count) in sample.iter() {
        match f(item) {
            Ok(converted) => result.add(converted, count),
            Err(err) if budget == 0 => return Err(err.into()),
            Err(err) => {
                if count > remaining {
                    return Err(err.into());
                }
                remaining -= count;
            }
        }
    }
    if result.is_empty() {
        return Err(failure("zero successful conversions").into());
    }
    Ok(result.freeze())
}
