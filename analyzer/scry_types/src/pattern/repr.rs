//! Encoded-type wrappers.
//!
//! `StrRepr` records that the *real* type of a string field is something
//! else (a number, a bool, a date-time) spelled out in text; `NumRepr`
//! records that a numeric field is really a POSIX timestamp. The two
//! nest: a string of digits in a plausible timestamp range becomes
//! `StrRepr(NumRepr(DateTime), 'd')`.

use scry_collections::Bag;
use scry_ir::Datum;

use crate::convert::{datetime_from_unix_seconds, parse_bool, parse_datetime, parse_float, parse_int};
use crate::pattern::scalar::{int_base, DateTime, Float, Int};
use crate::Pattern;

/// Whether a number was integral or fractional in the source data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int,
    Float,
}

/// A scalar pattern whose observations were strings.
///
/// `inner` is the decoded pattern (never another `StrRepr`); `format`
/// records how to decode: a `false|true` token pair, an int base tag
/// (`o`/`d`/`x`), `f` for floats, or a strftime format for date-times.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StrRepr {
    pub inner: Box<Pattern>,
    pub format: String,
}

/// Narrower numeric kinds order first; unrelated kinds tie.
fn inner_rank(repr: &StrRepr) -> u8 {
    match &*repr.inner {
        Pattern::Bool(_) => 0,
        Pattern::Int(_) => 1,
        Pattern::Float(_) => 2,
        _ => 3,
    }
}

fn ordered<'a>(a: &'a StrRepr, b: &'a StrRepr) -> (&'a StrRepr, &'a StrRepr) {
    if inner_rank(a) <= inner_rank(b) {
        (a, b)
    } else {
        (b, a)
    }
}

fn base_rank(format: &str) -> u8 {
    match format {
        "o" => 0,
        "x" => 2,
        _ => 1,
    }
}

impl StrRepr {
    /// The compatibility matrix over inner kinds, child (narrower) side
    /// first: bools only mix with numbers when spelled `0|1`, hex ints
    /// never mix with floats, date-times must share a format.
    pub fn compare(&self, other: &StrRepr) -> bool {
        let (child, parent) = ordered(self, other);
        match (&*child.inner, &*parent.inner) {
            (Pattern::Bool(_), Pattern::Bool(_)) => child.format == parent.format,
            (Pattern::Bool(_), Pattern::Int(_) | Pattern::Float(_)) => child.format == "0|1",
            (Pattern::Int(_), Pattern::Int(_)) => true,
            (Pattern::Int(_), Pattern::Float(_)) => child.format != "x",
            (Pattern::Float(_), Pattern::Float(_)) => true,
            (Pattern::DateTime(_), Pattern::DateTime(_)) => child.format == parent.format,
            (Pattern::NumRepr(_), Pattern::NumRepr(_)) => true,
            _ => false,
        }
    }

    pub fn merge(&self, other: &StrRepr) -> Option<StrRepr> {
        let (child, parent) = ordered(self, other);
        let both_int = matches!(&*child.inner, Pattern::Int(_))
            && matches!(&*parent.inner, Pattern::Int(_));
        let both_num_repr = matches!(&*child.inner, Pattern::NumRepr(_))
            && matches!(&*parent.inner, Pattern::NumRepr(_));
        let format = if both_int {
            // The widest base wins: o < d < x.
            if base_rank(&child.format) >= base_rank(&parent.format) {
                child.format.clone()
            } else {
                parent.format.clone()
            }
        } else if both_num_repr && (child.format == "f" || parent.format == "f") {
            "f".to_owned()
        } else {
            parent.format.clone()
        };
        let inner = child.inner.merge(&parent.inner)?;
        Some(StrRepr {
            inner: Box::new(inner),
            format,
        })
    }

    /// Decode the string under the recorded format, then delegate to the
    /// inner pattern.
    pub fn validate(&self, value: &Datum) -> bool {
        let Datum::Str(s) = value else {
            return false;
        };
        match &*self.inner {
            Pattern::Bool(inner) => {
                let (false_token, true_token) =
                    self.format.split_once('|').unwrap_or((self.format.as_str(), ""));
                match parse_bool(s, false_token, true_token) {
                    Ok(b) => inner.validate(&Datum::Bool(b)),
                    Err(_) => false,
                }
            }
            Pattern::Int(inner) => match int_base(&self.format) {
                Some(base) => match parse_int(s, base) {
                    Ok(i) => inner.validate(&Datum::Int(i)),
                    Err(_) => false,
                },
                None => false,
            },
            Pattern::Float(inner) => match parse_float(s) {
                Ok(v) => inner.validate(&Datum::float(v)),
                Err(_) => false,
            },
            Pattern::DateTime(inner) => match parse_datetime(s, &self.format) {
                Ok(dt) => inner.validate(&Datum::DateTime(dt)),
                Err(_) => false,
            },
            Pattern::NumRepr(inner) => match inner.format {
                NumberKind::Int => match parse_int(s, 10) {
                    Ok(i) => inner.validate(&Datum::Int(i)),
                    Err(_) => false,
                },
                NumberKind::Float => match parse_float(s) {
                    Ok(v) => inner.validate(&Datum::float(v)),
                    Err(_) => false,
                },
            },
            _ => false,
        }
    }
}

/// A numeric pattern whose values are really POSIX timestamps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumRepr {
    pub inner: DateTime,
    pub format: NumberKind,
}

impl NumRepr {
    /// Reinterpret an integer pattern as seconds since the epoch.
    pub fn from_int(int: &Int) -> Option<NumRepr> {
        let mut converted = Bag::new();
        for (&seconds, count) in int.values.sample().iter() {
            #[allow(clippy::cast_precision_loss)]
            let dt = datetime_from_unix_seconds(seconds as f64)?;
            converted.add(dt, count);
        }
        Some(NumRepr {
            inner: DateTime::new(converted.freeze()).ok()?,
            format: NumberKind::Int,
        })
    }

    /// Reinterpret a float pattern as seconds since the epoch.
    pub fn from_float(float: &Float) -> Option<NumRepr> {
        let mut converted = Bag::new();
        for (seconds, count) in float.values.sample().iter() {
            let dt = datetime_from_unix_seconds(seconds.get())?;
            converted.add(dt, count);
        }
        Some(NumRepr {
            inner: DateTime::new(converted.freeze()).ok()?,
            format: NumberKind::Float,
        })
    }

    /// Fractional on either side wins.
    pub fn merge(&self, other: &NumRepr) -> NumRepr {
        let format = if self.format == NumberKind::Float || other.format == NumberKind::Float {
            NumberKind::Float
        } else {
            NumberKind::Int
        };
        NumRepr {
            inner: self.inner.merge(&other.inner),
            format,
        }
    }

    /// Convert the number to a date-time, then delegate.
    pub fn validate(&self, value: &Datum) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let seconds = match (self.format, value) {
            (NumberKind::Int, Datum::Int(i)) => *i as f64,
            (NumberKind::Float, Datum::Float(r)) => r.get(),
            (NumberKind::Float, Datum::Int(i)) => *i as f64,
            _ => return false,
        };
        match datetime_from_unix_seconds(seconds) {
            Some(dt) => self.inner.validate(&Datum::DateTime(dt)),
            None => false,
        }
    }
}
