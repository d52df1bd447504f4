//! Human-readable relative durations.
//!
//! Timestamp windows are most naturally given relative to now ("20
//! years", "90 days"); this parses that little language into a
//! calendar-aware delta. Spans may repeat and mix freely ("1y 6m",
//! "1 week, 2 days") and each may carry a sign.

use chrono::{Duration, Months, NaiveDateTime};

use super::ParseFailure;

/// A calendar-aware relative offset.
///
/// Years and months shift the calendar (clamping the day of month where
/// needed); the remaining spans are exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelativeDelta {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub microseconds: i64,
}

impl RelativeDelta {
    pub fn years(years: i64) -> Self {
        RelativeDelta {
            years,
            ..RelativeDelta::default()
        }
    }

    /// Shift `dt` by this delta; `None` on overflow.
    pub fn apply_to(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let total_months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let shifted = if total_months >= 0 {
            dt.checked_add_months(Months::new(u32::try_from(total_months).ok()?))?
        } else {
            dt.checked_sub_months(Months::new(u32::try_from(-total_months).ok()?))?
        };
        let exact = Duration::weeks(self.weeks)
            .checked_add(&Duration::days(self.days))?
            .checked_add(&Duration::hours(self.hours))?
            .checked_add(&Duration::minutes(self.minutes))?
            .checked_add(&Duration::seconds(self.seconds))?
            .checked_add(&Duration::microseconds(self.microseconds))?;
        shifted.checked_add_signed(exact)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Unit {
    Microseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

fn unit_for(word: &str) -> Option<Unit> {
    // Accepted suffix spellings, most specific kinds first; `ms` is
    // microseconds while `m` alone is months.
    Some(match word {
        "ms" | "msec" | "msecs" | "msecond" | "mseconds" | "micros" | "microsec" | "microsecs"
        | "microsecond" | "microseconds" => Unit::Microseconds,
        "s" | "sec" | "secs" | "second" | "seconds" => Unit::Seconds,
        "mi" | "min" | "mins" | "minute" | "minutes" => Unit::Minutes,
        "h" | "hr" | "hrs" | "hour" | "hours" => Unit::Hours,
        "d" | "day" | "days" => Unit::Days,
        "w" | "week" | "weeks" => Unit::Weeks,
        "m" | "mon" | "mons" | "month" | "months" => Unit::Months,
        "y" | "yr" | "yrs" | "year" | "years" => Unit::Years,
        _ => return None,
    })
}

/// Parse a relative duration like `"1y 6m"`, `"-90 days"`, or
/// `"1 week, 2 days"`. The empty string is the zero delta.
pub fn parse_duration(s: &str) -> Result<RelativeDelta, ParseFailure> {
    let mut delta = RelativeDelta::default();
    let mut rest = s;
    loop {
        rest = rest.trim_start_matches([' ', '\t', '\n', ',']);
        if rest.is_empty() {
            return Ok(delta);
        }
        let (num, after_num) = take_signed_number(rest)
            .ok_or_else(|| ParseFailure(format!("invalid duration {s:?}")))?;
        let after_num = after_num.trim_start_matches([' ', '\t']);
        let word_len = after_num
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(after_num.len());
        let word = &after_num[..word_len];
        let unit = unit_for(&word.to_lowercase())
            .ok_or_else(|| ParseFailure(format!("invalid duration {s:?}")))?;
        let slot = match unit {
            Unit::Microseconds => &mut delta.microseconds,
            Unit::Seconds => &mut delta.seconds,
            Unit::Minutes => &mut delta.minutes,
            Unit::Hours => &mut delta.hours,
            Unit::Days => &mut delta.days,
            Unit::Weeks => &mut delta.weeks,
            Unit::Months => &mut delta.months,
            Unit::Years => &mut delta.years,
        };
        *slot += num;
        rest = &after_num[word_len..];
    }
}

fn take_signed_number(s: &str) -> Option<(i64, &str)> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = s.len() - (unsigned.len() - digits);
    let value: i64 = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}
