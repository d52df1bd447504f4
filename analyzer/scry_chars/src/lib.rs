//! Character-class algebra.
//!
//! Fixed-width string inference compresses each column of a sample into a
//! [`CharClass`]: either a finite set of code points or the universal
//! class. The universal class is a sentinel: it is never materialized as
//! a set of all 1,112,064 Unicode scalar values, it just behaves like one
//! under the set operations.
//!
//! The digit classes form a chain (`oct_digit ⊂ dec_digit ⊂ hex_digit`)
//! that the template inference widens monotonically as it scans columns.


use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Number of Unicode scalar values: the cardinality of the universal class.
pub const UNICODE_SCALARS: u64 = 0x110000 - 0x800;

/// A set of Unicode scalar values, or the universal set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Matches any character.
    Any,
    /// Matches exactly the members.
    Set(BTreeSet<char>),
}

impl CharClass {
    pub fn empty() -> Self {
        CharClass::Set(BTreeSet::new())
    }

    pub fn singleton(ch: char) -> Self {
        CharClass::Set(BTreeSet::from([ch]))
    }

    pub fn from_chars(chars: &str) -> Self {
        chars.chars().collect()
    }

    /// The inclusive range `start..=stop`.
    pub fn range(start: char, stop: char) -> Self {
        (start..=stop).collect()
    }

    pub fn contains(&self, ch: char) -> bool {
        match self {
            CharClass::Any => true,
            CharClass::Set(set) => set.contains(&ch),
        }
    }

    pub fn len(&self) -> u64 {
        match self {
            CharClass::Any => UNICODE_SCALARS,
            CharClass::Set(set) => set.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate members in ascending order.
    pub fn chars(&self) -> Box<dyn Iterator<Item = char> + '_> {
        match self {
            CharClass::Any => Box::new((0..=0x0010_FFFF_u32).filter_map(char::from_u32)),
            CharClass::Set(set) => Box::new(set.iter().copied()),
        }
    }

    pub fn union(&self, other: &CharClass) -> CharClass {
        match (self, other) {
            (CharClass::Any, _) | (_, CharClass::Any) => CharClass::Any,
            (CharClass::Set(a), CharClass::Set(b)) => CharClass::Set(a | b),
        }
    }

    pub fn intersection(&self, other: &CharClass) -> CharClass {
        match (self, other) {
            (CharClass::Any, CharClass::Any) => CharClass::Any,
            (CharClass::Any, set) | (set, CharClass::Any) => set.clone(),
            (CharClass::Set(a), CharClass::Set(b)) => CharClass::Set(a & b),
        }
    }

    /// Members of `self` not in `other`.
    ///
    /// Undefined (`None`) for the universal class minus a finite set: the
    /// result cannot be represented without materializing the universe.
    pub fn difference(&self, other: &CharClass) -> Option<CharClass> {
        match (self, other) {
            (_, CharClass::Any) => Some(CharClass::empty()),
            (CharClass::Any, CharClass::Set(_)) => None,
            (CharClass::Set(a), CharClass::Set(b)) => Some(CharClass::Set(a - b)),
        }
    }

    /// Members of exactly one side; undefined when only one side is
    /// universal, for the same reason as [`CharClass::difference`].
    pub fn symmetric_difference(&self, other: &CharClass) -> Option<CharClass> {
        match (self, other) {
            (CharClass::Any, CharClass::Any) => Some(CharClass::empty()),
            (CharClass::Any, CharClass::Set(_)) | (CharClass::Set(_), CharClass::Any) => None,
            (CharClass::Set(a), CharClass::Set(b)) => Some(CharClass::Set(a ^ b)),
        }
    }

    pub fn is_subset(&self, other: &CharClass) -> bool {
        match (self, other) {
            (_, CharClass::Any) => true,
            (CharClass::Any, CharClass::Set(_)) => false,
            (CharClass::Set(a), CharClass::Set(b)) => a.is_subset(b),
        }
    }
}

impl FromIterator<char> for CharClass {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharClass::Set(iter.into_iter().collect())
    }
}

impl BitOr for &CharClass {
    type Output = CharClass;

    fn bitor(self, rhs: &CharClass) -> CharClass {
        self.union(rhs)
    }
}

impl BitAnd for &CharClass {
    type Output = CharClass;

    fn bitand(self, rhs: &CharClass) -> CharClass {
        self.intersection(rhs)
    }
}

/// Inclusion partial order; the universal class is above every finite set.
impl PartialOrd for CharClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (CharClass::Any, CharClass::Any) => Some(Ordering::Equal),
            (CharClass::Any, CharClass::Set(_)) => Some(Ordering::Greater),
            (CharClass::Set(_), CharClass::Any) => Some(Ordering::Less),
            (CharClass::Set(a), CharClass::Set(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else if a.is_subset(b) {
                    Some(Ordering::Less)
                } else if b.is_subset(a) {
                    Some(Ordering::Greater)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Any => write!(f, "."),
            CharClass::Set(set) if set.is_empty() => write!(f, "∅"),
            CharClass::Set(set) if set.len() == 1 => {
                let mut chars = set.iter();
                match chars.next() {
                    Some(ch) => write!(f, "{ch}"),
                    None => Ok(()),
                }
            }
            CharClass::Set(set) => write!(f, "[{}]", format_ranges(set)),
        }
    }
}

/// Compress a sorted character set into `a-d` range notation.
pub fn format_ranges(set: &BTreeSet<char>) -> String {
    let mut out = String::new();
    let mut run: Option<(char, char)> = None;
    for &ch in set {
        match run {
            Some((start, end)) if ch as u32 == end as u32 + 1 => {
                run = Some((start, ch));
            }
            Some(range) => {
                push_range(&mut out, range);
                run = Some((ch, ch));
            }
            None => run = Some((ch, ch)),
        }
    }
    if let Some(range) = run {
        push_range(&mut out, range);
    }
    out
}

fn push_range(out: &mut String, (start, end): (char, char)) {
    out.push(start);
    if end as u32 == start as u32 + 1 {
        out.push(end);
    } else if end > start {
        out.push('-');
        out.push(end);
    }
}

/// `0-7`.
pub fn oct_digit() -> CharClass {
    CharClass::range('0', '7')
}

/// `0-9`.
pub fn dec_digit() -> CharClass {
    CharClass::range('0', '9')
}

/// `0-9a-fA-F`.
pub fn hex_digit() -> CharClass {
    &(&dec_digit() | &CharClass::range('a', 'f')) | &CharClass::range('A', 'F')
}

/// Characters an identifier may start with.
pub fn ident_first() -> CharClass {
    let mut class = &CharClass::range('A', 'Z') | &CharClass::range('a', 'z');
    class = &class | &CharClass::singleton('_');
    class
}

/// Characters an identifier may continue with.
pub fn ident_char() -> CharClass {
    &ident_first() | &dec_digit()
}
