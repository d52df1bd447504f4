//! Bag classification: the prioritized matching cascade.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use scry_chars::{dec_digit, hex_digit, oct_digit, CharClass};
use scry_collections::{Bag, FrozenBag, Stats};
use scry_ir::{Datum, Real};
use scry_types::convert::ConversionError;
use scry_types::{
    Bool, DateTime, Dict, Field, Fields, Float, Int, List, NumRepr, Pattern, Str, StrRepr, Tuple,
    Url,
};

use crate::Error;

use super::Analyzer;

/// Boolean token pairs, probed in order.
const BOOL_FORMATS: [&str; 8] = ["0|1", "f|t", "n|y", "false|true", "no|yes", "off|on", "|x", "|y"];

/// Int bases, probed in order; octal first, so an all-octal sample reads
/// as octal even though it would also parse as decimal.
const INT_FORMATS: [&str; 3] = ["o", "d", "x"];

/// Variable-length, zone-bearing date-time formats. Longer forms come
/// first so a full timestamp is not half-consumed by a shorter one.
const VAR_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Fixed-width date-time formats tried before character templating.
/// Fraction-bearing variants come after their plain counterparts so an
/// unfractioned sample records the plain format.
const FIXED_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%a, %d %b %Y %H:%M:%S",
];

impl Analyzer {
    /// Classify a bag of co-located values into a single pattern node.
    pub(crate) fn match_bag(
        &self,
        items: &[&Datum],
        threshold: usize,
        parent_card: Option<u64>,
    ) -> Result<Pattern, Error> {
        if items.is_empty() {
            return Ok(Pattern::Empty);
        }
        if items.iter().all(|item| matches!(item, Datum::Record(_))) {
            let lengths = length_stats(items)?;
            return Ok(Pattern::Tuple(Tuple::new(lengths)));
        }
        if items.iter().all(|item| matches!(item, Datum::List(_))) {
            let lengths = length_stats(items)?;
            // A long list of short, equal-length sub-lists is a table
            // from a language without tuples.
            let inner = items[0].length().unwrap_or(0);
            let table = (items.len() as u64) > inner
                && inner > 0
                && (inner as usize) < threshold
                && items.iter().all(|item| item.length() == Some(inner));
            return Ok(if table {
                Pattern::Tuple(Tuple::new(lengths))
            } else {
                Pattern::List(List::new(lengths))
            });
        }
        if items.iter().all(|item| matches!(item, Datum::Map(_))) {
            let lengths = length_stats(items)?;
            return Ok(Pattern::Dict(Dict::new(lengths)));
        }

        if items.iter().any(|item| !item.is_hashable()) {
            return Ok(Pattern::Value);
        }
        let sample: FrozenBag<&Datum> = items.iter().copied().collect();
        if sample.len() < threshold {
            let fields = sample.iter().map(|(item, count)| Field {
                value: (*item).clone(),
                optional: parent_card.is_some_and(|card| count < card),
            });
            return Ok(Pattern::Fields(Fields::new(fields)));
        }

        // Leaf dispatch; bool before int because bool's domain is a
        // subset of int's, int before float for the same reason.
        if let Some(bools) = bool_bag(&sample) {
            return Ok(Pattern::Bool(Bool::new(bools)?));
        }
        if let Some(ints) = int_bag(&sample) {
            return Ok(self.maybe_datetime(Pattern::Int(Int::new(ints)?)));
        }
        if let Some(reals) = numeric_bag(&sample) {
            return Ok(self.maybe_datetime(Pattern::Float(Float::new(reals)?)));
        }
        if let Some(datetimes) = datetime_bag(&sample) {
            return Ok(Pattern::DateTime(DateTime::new(datetimes)?));
        }
        if let Some(strings) = str_bag(&sample, self.config().strip_whitespace) {
            return self.match_str(&strings);
        }
        Ok(Pattern::Value)
    }

    /// String inference: trim the working sample by popularity, then try
    /// numeric encodings, fixed-width templates, and URLs in that order.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn match_str(&self, sample: &FrozenBag<&str>) -> Result<Pattern, Error> {
        let unique = sample.max_count() == 1;
        let total = sample.card();

        let empty_count = sample.count(&"");
        let empty_share = empty_count as f64 / total as f64;
        if empty_count > 0 && empty_share > self.config().empty_threshold {
            return Ok(Pattern::Str(owned_str(sample)?));
        }
        let items = if empty_count > 0 {
            sample.filter_map(|s| if s.is_empty() { None } else { Some(*s) })
        } else {
            sample.clone()
        };

        let budget = (total as f64 * self.config().bad_threshold).ceil() as u64;
        let (working, budget) = if unique || budget == 0 {
            (items, budget)
        } else {
            trim_by_popularity(&items, total, budget)
        };

        let lengths = Stats::from_lengths(&working)?;
        if *lengths.max() <= self.config().max_numeric_len {
            if let Some(pattern) = self.match_numeric_str(&working, budget)? {
                return Ok(self.maybe_datetime(pattern));
            }
        }
        if lengths.min() == lengths.max() {
            return self.match_fixed_len_str(&working, budget, *lengths.max());
        }
        if working
            .keys()
            .all(|s| s.starts_with("http://") || s.starts_with("https://"))
        {
            return Ok(Pattern::Url(Url::new(owned_str(&working)?)));
        }
        Ok(Pattern::Str(owned_str(&working)?))
    }

    /// Probe string-encoded bools, ints, floats, and zone-bearing
    /// date-times, in that order; first hit wins.
    fn match_numeric_str(
        &self,
        sample: &FrozenBag<&str>,
        budget: u64,
    ) -> Result<Option<Pattern>, Error> {
        for format in BOOL_FORMATS {
            match Bool::from_strings(sample, format, budget) {
                Ok(repr) => return Ok(Some(Pattern::StrRepr(repr))),
                Err(err) => miss_or_fatal(err)?,
            }
        }
        for format in INT_FORMATS {
            match Int::from_strings(sample, format, budget) {
                Ok(repr) => return Ok(Some(Pattern::StrRepr(repr))),
                Err(err) => miss_or_fatal(err)?,
            }
        }
        match Float::from_strings(sample, budget) {
            Ok(repr) => return Ok(Some(Pattern::StrRepr(repr))),
            Err(err) => miss_or_fatal(err)?,
        }
        for format in VAR_DATETIME_FORMATS {
            match DateTime::from_strings(sample, format, budget) {
                Ok(repr) => return Ok(Some(Pattern::StrRepr(repr))),
                Err(err) => miss_or_fatal(err)?,
            }
        }
        Ok(None)
    }

    /// Fixed-width inference: date-time formats first, then a
    /// per-column character-class template.
    fn match_fixed_len_str(
        &self,
        sample: &FrozenBag<&str>,
        budget: u64,
        width: u64,
    ) -> Result<Pattern, Error> {
        for format in FIXED_DATETIME_FORMATS {
            match DateTime::from_strings(sample, format, budget) {
                Ok(repr) => return Ok(Pattern::StrRepr(repr)),
                Err(err) => miss_or_fatal(err)?,
            }
        }

        let width = width as usize;
        let mut columns: Vec<BTreeSet<char>> = vec![BTreeSet::new(); width];
        for key in sample.keys() {
            for (index, ch) in key.chars().enumerate() {
                if let Some(column) = columns.get_mut(index) {
                    column.insert(ch);
                }
            }
        }

        enum Shape {
            Literal(char),
            Digit,
            Any,
        }
        let oct = oct_digit();
        let dec = dec_digit();
        let hex = hex_digit();
        // The digit class widens monotonically across columns: one hex
        // column turns every digit column hex.
        let mut base = 0u32;
        let mut shapes = Vec::with_capacity(width);
        for chars in &columns {
            if chars.len() == 1 {
                match chars.iter().next() {
                    Some(&ch) => shapes.push(Shape::Literal(ch)),
                    None => shapes.push(Shape::Any),
                }
            } else {
                let class: CharClass = chars.iter().copied().collect();
                if class.is_subset(&hex) {
                    base = base.max(if class.is_subset(&oct) {
                        8
                    } else if class.is_subset(&dec) {
                        10
                    } else {
                        16
                    });
                    shapes.push(Shape::Digit);
                } else {
                    shapes.push(Shape::Any);
                }
            }
        }
        let digit_class = match base {
            16 => hex,
            10 => dec,
            _ => oct,
        };
        let template: Vec<CharClass> = shapes
            .into_iter()
            .map(|shape| match shape {
                Shape::Literal(ch) => CharClass::singleton(ch),
                Shape::Digit => digit_class.clone(),
                Shape::Any => CharClass::Any,
            })
            .collect();
        Ok(Pattern::Str(owned_str(sample)?.with_template(template)))
    }

    /// Rewrap a numeric pattern whose whole range sits inside the
    /// configured POSIX window as a timestamp.
    #[allow(clippy::cast_precision_loss)]
    fn maybe_datetime(&self, pattern: Pattern) -> Pattern {
        let (min_seconds, max_seconds) = self.timestamp_window();
        let in_window =
            |low: f64, high: f64| min_seconds <= low && low <= high && high <= max_seconds;
        match &pattern {
            Pattern::Int(int) => {
                if in_window(*int.values.min() as f64, *int.values.max() as f64) {
                    if let Some(promoted) = NumRepr::from_int(int) {
                        return Pattern::NumRepr(promoted);
                    }
                }
            }
            Pattern::Float(float) => {
                if in_window(float.values.min().get(), float.values.max().get()) {
                    if let Some(promoted) = NumRepr::from_float(float) {
                        return Pattern::NumRepr(promoted);
                    }
                }
            }
            Pattern::StrRepr(repr) => match &*repr.inner {
                Pattern::Int(int) if repr.format == "d" => {
                    if in_window(*int.values.min() as f64, *int.values.max() as f64) {
                        if let Some(promoted) = NumRepr::from_int(int) {
                            return Pattern::StrRepr(StrRepr {
                                inner: Box::new(Pattern::NumRepr(promoted)),
                                format: repr.format.clone(),
                            });
                        }
                    }
                }
                Pattern::Float(float) => {
                    if in_window(float.values.min().get(), float.values.max().get()) {
                        if let Some(promoted) = NumRepr::from_float(float) {
                            return Pattern::StrRepr(StrRepr {
                                inner: Box::new(Pattern::NumRepr(promoted)),
                                format: repr.format.clone(),
                            });
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
        pattern
    }
}

/// Popularity trim: keep most-common items until only the failure
/// budget remains uncovered, zeroing the budget for the conversion
/// itself. Falls back to the whole sample once singleton counts show
/// popularity cannot separate good values from bad.
fn trim_by_popularity<'a>(
    items: &FrozenBag<&'a str>,
    total: u64,
    budget: u64,
) -> (FrozenBag<&'a str>, u64) {
    let min_coverage = total.saturating_sub(budget);
    let mut coverage = 0u64;
    let mut trimmed = Bag::new();
    for (item, count) in items.most_common(None) {
        trimmed.add(*item, count);
        coverage += count;
        if coverage >= min_coverage {
            return (trimmed.freeze(), 0);
        }
        if count == 1 {
            break;
        }
    }
    (items.clone(), budget)
}

fn length_stats(items: &[&Datum]) -> Result<Stats<u64>, Error> {
    Ok(Stats::from_lengths_iter(
        items.iter().map(|item| item.length().unwrap_or(0)),
    )?)
}

fn owned_str(sample: &FrozenBag<&str>) -> Result<Str, Error> {
    Ok(Str::new(sample.map(|s| Box::from(*s)))?)
}

fn miss_or_fatal(err: ConversionError) -> Result<(), Error> {
    match err {
        ConversionError::Failed(_) => Ok(()),
        ConversionError::EmptySample(inner) => Err(Error::EmptySample(inner)),
    }
}

fn bool_bag(sample: &FrozenBag<&Datum>) -> Option<FrozenBag<bool>> {
    let mut bag = Bag::new();
    for (item, count) in sample.iter() {
        match item {
            Datum::Bool(value) => bag.add(*value, count),
            _ => return None,
        }
    }
    Some(bag.freeze())
}

/// Bools widen to 0/1 here: a bag mixing booleans with integers is an
/// integer bag, per the `bool ⊏ int ⊏ float` tower.
fn int_bag(sample: &FrozenBag<&Datum>) -> Option<FrozenBag<i64>> {
    let mut bag = Bag::new();
    for (item, count) in sample.iter() {
        match item {
            Datum::Int(value) => bag.add(*value, count),
            Datum::Bool(value) => bag.add(i64::from(*value), count),
            _ => return None,
        }
    }
    Some(bag.freeze())
}

fn numeric_bag(sample: &FrozenBag<&Datum>) -> Option<FrozenBag<Real>> {
    let mut bag = Bag::new();
    for (item, count) in sample.iter() {
        #[allow(clippy::cast_precision_loss)]
        match item {
            Datum::Float(value) => bag.add(*value, count),
            Datum::Int(value) => bag.add(Real::new(*value as f64), count),
            Datum::Bool(value) => bag.add(Real::new(f64::from(u8::from(*value))), count),
            _ => return None,
        }
    }
    Some(bag.freeze())
}

fn datetime_bag(sample: &FrozenBag<&Datum>) -> Option<FrozenBag<NaiveDateTime>> {
    let mut bag = Bag::new();
    for (item, count) in sample.iter() {
        match item {
            Datum::DateTime(value) => bag.add(*value, count),
            _ => return None,
        }
    }
    Some(bag.freeze())
}

fn str_bag<'a>(sample: &FrozenBag<&'a Datum>, strip: bool) -> Option<FrozenBag<&'a str>> {
    let mut bag = Bag::new();
    for (item, count) in sample.iter() {
        match item {
            Datum::Str(value) => {
                let s = if strip { value.trim() } else { value.as_str() };
                bag.add(s, count);
            }
            _ => return None,
        }
    }
    Some(bag.freeze())
}
