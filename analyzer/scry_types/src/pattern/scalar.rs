//! Leaf scalar patterns.

use std::hash::Hash;

use chrono::NaiveDateTime;
use scry_chars::CharClass;
use scry_collections::{EmptySampleError, FrozenBag, Stats};
use scry_ir::{Datum, Real};

use crate::convert::{
    parse_bool, parse_datetime, parse_float, parse_int, try_convert, ConversionError,
};
use crate::pattern::repr::StrRepr;
use crate::Pattern;

/// A bag of booleans (or of strings encoding them).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bool {
    pub values: Stats<bool>,
}

impl Bool {
    pub fn new(sample: FrozenBag<bool>) -> Result<Self, EmptySampleError> {
        Ok(Bool {
            values: Stats::from_sample(sample)?,
        })
    }

    /// Build from string observations against a `false|true` token pair.
    pub fn from_strings<S: AsRef<str> + Eq + Hash>(
        sample: &FrozenBag<S>,
        format: &str,
        budget: u64,
    ) -> Result<StrRepr, ConversionError> {
        let (false_token, true_token) = format.split_once('|').unwrap_or((format, ""));
        let converted = try_convert(sample, budget, |s| {
            parse_bool(s.as_ref(), false_token, true_token)
        })?;
        Ok(StrRepr {
            inner: Box::new(Pattern::Bool(Bool::new(converted)?)),
            format: format.to_owned(),
        })
    }

    /// Promote to an integer pattern (false → 0, true → 1).
    pub fn widen(&self) -> Option<Int> {
        let sample = self.values.sample().map(|&b| i64::from(b));
        Int::new(sample).ok()
    }

    pub fn merge(&self, other: &Bool) -> Bool {
        Bool {
            values: self.values.merge(&other.values),
        }
    }

    /// Booleans validate as themselves or as the integers 0 and 1.
    pub fn validate(&self, value: &Datum) -> bool {
        matches!(value, Datum::Bool(_) | Datum::Int(0 | 1))
    }
}

/// A bag of integers within an observed range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Int {
    pub values: Stats<i64>,
}

impl Int {
    pub fn new(sample: FrozenBag<i64>) -> Result<Self, EmptySampleError> {
        Ok(Int {
            values: Stats::from_sample(sample)?,
        })
    }

    /// Build from string observations in base `o`ctal, `d`ecimal, or
    /// he`x`.
    pub fn from_strings<S: AsRef<str> + Eq + Hash>(
        sample: &FrozenBag<S>,
        format: &str,
        budget: u64,
    ) -> Result<StrRepr, ConversionError> {
        let base = int_base(format).unwrap_or(10);
        let converted = try_convert(sample, budget, |s| parse_int(s.as_ref(), base))?;
        Ok(StrRepr {
            inner: Box::new(Pattern::Int(Int::new(converted)?)),
            format: format.to_owned(),
        })
    }

    /// Promote to a float pattern.
    pub fn widen(&self) -> Option<Float> {
        #[allow(clippy::cast_precision_loss)]
        let sample = self.values.sample().map(|&i| Real::new(i as f64));
        Float::new(sample).ok()
    }

    pub fn merge(&self, other: &Int) -> Int {
        Int {
            values: self.values.merge(&other.values),
        }
    }

    pub fn validate(&self, value: &Datum) -> bool {
        let candidate = match value {
            Datum::Int(i) => *i,
            Datum::Bool(b) => i64::from(*b),
            _ => return false,
        };
        *self.values.min() <= candidate && candidate <= *self.values.max()
    }
}

/// Numeric base for an int string format tag.
pub(crate) fn int_base(format: &str) -> Option<u32> {
    match format {
        "o" => Some(8),
        "d" => Some(10),
        "x" => Some(16),
        _ => None,
    }
}

/// A bag of floats (possibly mixed with integers) within a range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Float {
    pub values: Stats<Real>,
}

impl Float {
    pub fn new(sample: FrozenBag<Real>) -> Result<Self, EmptySampleError> {
        Ok(Float {
            values: Stats::from_sample(sample)?,
        })
    }

    pub fn from_strings<S: AsRef<str> + Eq + Hash>(
        sample: &FrozenBag<S>,
        budget: u64,
    ) -> Result<StrRepr, ConversionError> {
        let converted = try_convert(sample, budget, |s| parse_float(s.as_ref()).map(Real::new))?;
        Ok(StrRepr {
            inner: Box::new(Pattern::Float(Float::new(converted)?)),
            format: "f".to_owned(),
        })
    }

    pub fn merge(&self, other: &Float) -> Float {
        Float {
            values: self.values.merge(&other.values),
        }
    }

    /// Floats validate any numeric kind inside the range.
    pub fn validate(&self, value: &Datum) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let candidate = match value {
            Datum::Float(r) => r.get(),
            Datum::Int(i) => *i as f64,
            Datum::Bool(b) => f64::from(u8::from(*b)),
            _ => return false,
        };
        self.values.min().get() <= candidate && candidate <= self.values.max().get()
    }
}

/// A bag of date-times within a range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub values: Stats<NaiveDateTime>,
}

impl DateTime {
    pub fn new(sample: FrozenBag<NaiveDateTime>) -> Result<Self, EmptySampleError> {
        Ok(DateTime {
            values: Stats::from_sample(sample)?,
        })
    }

    /// Build from string observations under a strftime-style format.
    pub fn from_strings<S: AsRef<str> + Eq + Hash>(
        sample: &FrozenBag<S>,
        format: &str,
        budget: u64,
    ) -> Result<StrRepr, ConversionError> {
        let converted = try_convert(sample, budget, |s| parse_datetime(s.as_ref(), format))?;
        Ok(StrRepr {
            inner: Box::new(Pattern::DateTime(DateTime::new(converted)?)),
            format: format.to_owned(),
        })
    }

    pub fn merge(&self, other: &DateTime) -> DateTime {
        DateTime {
            values: self.values.merge(&other.values),
        }
    }

    pub fn validate(&self, value: &Datum) -> bool {
        match value {
            Datum::DateTime(dt) => *self.values.min() <= *dt && *dt <= *self.values.max(),
            _ => false,
        }
    }
}

/// A bag of strings: value and length statistics, and for fixed-width
/// samples a per-position character-class template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Str {
    pub values: Stats<Box<str>>,
    pub lengths: Stats<u64>,
    pub template: Option<Vec<CharClass>>,
}

impl Str {
    pub fn new(sample: FrozenBag<Box<str>>) -> Result<Self, EmptySampleError> {
        let lengths = Stats::from_lengths(&sample)?;
        Ok(Str {
            values: Stats::from_sample(sample)?,
            lengths,
            template: None,
        })
    }

    pub fn with_template(mut self, template: Vec<CharClass>) -> Self {
        self.template = Some(template);
        self
    }

    pub fn unique(&self) -> bool {
        self.values.unique()
    }

    /// Merge samples and lengths; templates survive only when both sides
    /// have one of equal width, in which case they union pointwise.
    pub fn merge(&self, other: &Str) -> Str {
        let template = match (&self.template, &other.template) {
            (Some(a), Some(b)) if a.len() == b.len() => {
                Some(a.iter().zip(b).map(|(x, y)| x.union(y)).collect())
            }
            _ => None,
        };
        Str {
            values: self.values.merge(&other.values),
            lengths: self.lengths.merge(&other.lengths),
            template,
        }
    }

    pub fn validate(&self, value: &Datum) -> bool {
        let Datum::Str(s) = value else {
            return false;
        };
        let len = s.chars().count() as u64;
        if len < *self.lengths.min() || len > *self.lengths.max() {
            return false;
        }
        match &self.template {
            Some(template) => s
                .chars()
                .zip(template)
                .all(|(ch, class)| class.contains(ch)),
            None => true,
        }
    }
}

/// A bag of strings that all look like web URLs. A sub-kind of [`Str`]:
/// merging with a plain string pattern degrades to the string pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Url {
    pub inner: Str,
}

impl Url {
    pub fn new(inner: Str) -> Self {
        Url { inner }
    }

    pub fn validate(&self, value: &Datum) -> bool {
        let Datum::Str(s) = value else {
            return false;
        };
        self.inner.validate(value) && (s.starts_with("http://") || s.starts_with("https://"))
    }
}
