//! The pattern algebra.
//!
//! A [`Pattern`] describes the shape of a bag of co-located values: what
//! kind they are, what range they span, which literal keys recur, and how
//! strings encode other types. Patterns are immutable values produced by
//! the analyzer; the three operations of the algebra are:
//!
//! - [`Pattern::validate`]: does a single value conform?
//! - [`Pattern::compare`]: are two patterns structurally equivalent for
//!   the purposes of merging? This is looser than `==`: `bool ⊏ int ⊏
//!   float` are cross-compatible, and sample statistics are ignored.
//! - [`Pattern::merge`]: fold two compatible patterns into one,
//!   promoting to the wider numeric kind and summing samples. Merging is
//!   commutative and associative over any compatible set.

#[cfg(test)]
mod tests;

mod container;
mod field;
mod repr;
mod scalar;

pub use container::{Dict, DictField, List, Tuple, TupleField};
pub use field::{Field, Fields};
pub use repr::{NumRepr, NumberKind, StrRepr};
pub use scalar::{Bool, DateTime, Float, Int, Str, Url};

use scry_ir::Datum;

/// A node in an inferred schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// The bag was empty; nothing is known.
    Empty,
    /// Heterogeneous or uncountable: any value at all.
    Value,
    Dict(Dict),
    Tuple(Tuple),
    List(List),
    Str(Str),
    Url(Url),
    Bool(Bool),
    Int(Int),
    Float(Float),
    DateTime(DateTime),
    StrRepr(StrRepr),
    NumRepr(NumRepr),
    Field(Field),
    Fields(Fields),
}

impl Pattern {
    /// Whether a single value conforms to this pattern.
    ///
    /// Containers check the outer kind and length band only; content is
    /// not re-validated here.
    pub fn validate(&self, value: &Datum) -> bool {
        match self {
            Pattern::Empty => false,
            Pattern::Value => true,
            Pattern::Dict(dict) => dict.validate(value),
            Pattern::Tuple(tuple) => tuple.validate(value),
            Pattern::List(list) => list.validate(value),
            Pattern::Str(str_pat) => str_pat.validate(value),
            Pattern::Url(url) => url.validate(value),
            Pattern::Bool(bool_pat) => bool_pat.validate(value),
            Pattern::Int(int) => int.validate(value),
            Pattern::Float(float) => float.validate(value),
            Pattern::DateTime(dt) => dt.validate(value),
            Pattern::StrRepr(repr) => repr.validate(value),
            Pattern::NumRepr(repr) => repr.validate(value),
            Pattern::Field(field) => field.validate(value),
            Pattern::Fields(fields) => fields.validate(value),
        }
    }

    /// Structural equivalence for merging.
    ///
    /// Reflexive and symmetric. Numeric kinds are cross-compatible
    /// (`bool ⊏ int ⊏ float`), URLs are a sub-kind of strings, and
    /// containers additionally require compatible content.
    pub fn compare(&self, other: &Pattern) -> bool {
        use Pattern as P;
        match (self, other) {
            (P::Empty, P::Empty) | (P::Value, P::Value) => true,
            (P::Bool(_) | P::Int(_) | P::Float(_), P::Bool(_) | P::Int(_) | P::Float(_)) => true,
            (P::DateTime(_), P::DateTime(_)) => true,
            (P::Str(_) | P::Url(_), P::Str(_) | P::Url(_)) => true,
            (P::List(a), P::List(b)) => match (&a.content, &b.content) {
                (None, None) => true,
                (Some(x), Some(y)) => x.compare(y),
                _ => false,
            },
            (P::Dict(a), P::Dict(b)) => container::compare_pairs(&a.pairs(), &b.pairs()),
            (P::Tuple(a), P::Tuple(b)) => container::compare_pairs(&a.pairs(), &b.pairs()),
            (P::StrRepr(a), P::StrRepr(b)) => a.compare(b),
            (P::NumRepr(_), P::NumRepr(_)) => true,
            (P::Field(a), P::Field(b)) => a.value == b.value,
            (P::Fields(_), P::Fields(_)) => true,
            _ => false,
        }
    }

    /// Merge two compatible patterns into a fresh one.
    ///
    /// `None` when [`Pattern::compare`] does not hold. Statistics merge
    /// by sample addition; numeric kinds promote to the wider side.
    pub fn merge(&self, other: &Pattern) -> Option<Pattern> {
        use Pattern as P;
        if !self.compare(other) {
            return None;
        }
        let merged = match (self, other) {
            (P::Empty, P::Empty) => P::Empty,
            (P::Value, P::Value) => P::Value,

            // Numeric tower: the wider kind wins.
            (P::Bool(a), P::Bool(b)) => P::Bool(a.merge(b)),
            (P::Bool(a), P::Int(b)) | (P::Int(b), P::Bool(a)) => P::Int(b.merge(&a.widen()?)),
            (P::Int(a), P::Int(b)) => P::Int(a.merge(b)),
            (P::Bool(a), P::Float(b)) | (P::Float(b), P::Bool(a)) => {
                P::Float(b.merge(&a.widen()?.widen()?))
            }
            (P::Int(a), P::Float(b)) | (P::Float(b), P::Int(a)) => P::Float(b.merge(&a.widen()?)),
            (P::Float(a), P::Float(b)) => P::Float(a.merge(b)),

            (P::DateTime(a), P::DateTime(b)) => P::DateTime(a.merge(b)),

            // URL is a sub-kind of str; mixing degrades to plain str.
            (P::Str(a), P::Str(b)) => P::Str(a.merge(b)),
            (P::Url(a), P::Url(b)) => P::Url(Url {
                inner: a.inner.merge(&b.inner),
            }),
            (P::Url(a), P::Str(b)) | (P::Str(b), P::Url(a)) => P::Str(a.inner.merge(b)),

            (P::StrRepr(a), P::StrRepr(b)) => P::StrRepr(a.merge(b)?),
            (P::NumRepr(a), P::NumRepr(b)) => P::NumRepr(a.merge(b)),

            (P::List(a), P::List(b)) => P::List(a.merge(b)?),
            (P::Dict(a), P::Dict(b)) => P::Dict(a.merge(b)?),
            (P::Tuple(a), P::Tuple(b)) => P::Tuple(a.merge(b)?),

            (P::Field(a), P::Field(b)) => P::Field(a.merge(b)),
            (P::Fields(a), P::Fields(b)) => P::Fields(a.merge(b)),

            _ => return None,
        };
        Some(merged)
    }
}

impl From<Dict> for Pattern {
    fn from(value: Dict) -> Self {
        Pattern::Dict(value)
    }
}

impl From<Tuple> for Pattern {
    fn from(value: Tuple) -> Self {
        Pattern::Tuple(value)
    }
}

impl From<List> for Pattern {
    fn from(value: List) -> Self {
        Pattern::List(value)
    }
}

impl From<Str> for Pattern {
    fn from(value: Str) -> Self {
        Pattern::Str(value)
    }
}

impl From<Url> for Pattern {
    fn from(value: Url) -> Self {
        Pattern::Url(value)
    }
}

impl From<Bool> for Pattern {
    fn from(value: Bool) -> Self {
        Pattern::Bool(value)
    }
}

impl From<Int> for Pattern {
    fn from(value: Int) -> Self {
        Pattern::Int(value)
    }
}

impl From<Float> for Pattern {
    fn from(value: Float) -> Self {
        Pattern::Float(value)
    }
}

impl From<DateTime> for Pattern {
    fn from(value: DateTime) -> Self {
        Pattern::DateTime(value)
    }
}

impl From<StrRepr> for Pattern {
    fn from(value: StrRepr) -> Self {
        Pattern::StrRepr(value)
    }
}

impl From<NumRepr> for Pattern {
    fn from(value: NumRepr) -> Self {
        Pattern::NumRepr(value)
    }
}

impl From<Field> for Pattern {
    fn from(value: Field) -> Self {
        Pattern::Field(value)
    }
}

impl From<Fields> for Pattern {
    fn from(value: Fields) -> Self {
        Pattern::Fields(value)
    }
}
