//! The `Datum` tree.

#[cfg(test)]
mod tests;

use std::fmt;

use chrono::NaiveDateTime;
use scry_collections::Length;

use crate::{Map, Real, Record};

/// A single semi-structured value: the analyzer's input.
///
/// The variant order defines the canonical cross-kind ordering (kind rank
/// first, then the natural order within a kind), which is what keeps
/// choice sets and container content reproducibly sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    Float(Real),
    DateTime(NaiveDateTime),
    Str(String),
    List(Vec<Datum>),
    Map(Map),
    Record(Record),
}

impl Datum {
    pub fn float(value: f64) -> Self {
        Datum::Float(Real::new(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Datum::Str(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Datum>) -> Self {
        Datum::List(items.into_iter().collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (Datum, Datum)>) -> Self {
        Datum::Map(Map::from_entries(entries))
    }

    pub fn record(columns: impl IntoIterator<Item = Datum>) -> Self {
        Datum::Record(Record::positional(columns))
    }

    /// Kind label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "bool",
            Datum::Int(_) => "int",
            Datum::Float(_) => "float",
            Datum::DateTime(_) => "datetime",
            Datum::Str(_) => "str",
            Datum::List(_) => "list",
            Datum::Map(_) => "map",
            Datum::Record(_) => "record",
        }
    }

    /// Whether this value may key a multiset.
    ///
    /// Lists and maps may not; records may when every column may. A bag
    /// holding a non-hashable member cannot be counted and degrades to
    /// the opaque `value` pattern.
    pub fn is_hashable(&self) -> bool {
        match self {
            Datum::List(_) | Datum::Map(_) => false,
            Datum::Record(record) => record.iter().all(Datum::is_hashable),
            _ => true,
        }
    }

    /// Entry count for containers, code-point count for strings.
    pub fn length(&self) -> Option<u64> {
        match self {
            Datum::Str(s) => Some(s.chars().count() as u64),
            Datum::List(items) => Some(items.len() as u64),
            Datum::Map(map) => Some(map.len() as u64),
            Datum::Record(record) => Some(record.len() as u64),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, itself included. Map keys and
    /// values both count. Used to seed progress accounting.
    pub fn node_count(&self) -> u64 {
        match self {
            Datum::List(items) => 1 + items.iter().map(Datum::node_count).sum::<u64>(),
            Datum::Map(map) => {
                1 + map
                    .iter()
                    .map(|(k, v)| k.node_count() + v.node_count())
                    .sum::<u64>()
            }
            Datum::Record(record) => 1 + record.iter().map(Datum::node_count).sum::<u64>(),
            _ => 1,
        }
    }

    /// Number of direct entries (for the top-level progress fraction).
    pub fn top_count(&self) -> u64 {
        self.length().unwrap_or(0)
    }
}

impl Length for Datum {
    fn length(&self) -> u64 {
        Datum::length(self).unwrap_or(0)
    }
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Datum::Bool(value)
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Int(value)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::float(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Str(value.to_owned())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Str(value)
    }
}

impl From<NaiveDateTime> for Datum {
    fn from(value: NaiveDateTime) -> Self {
        Datum::DateTime(value)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "null"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Int(i) => write!(f, "{i}"),
            Datum::Float(v) => write!(f, "{v}"),
            Datum::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Datum::Str(s) => write!(f, "'{s}'"),
            Datum::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Datum::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Datum::Record(record) => {
                write!(f, "(")?;
                for (i, column) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match record.names().and_then(|names| names.get(i)) {
                        Some(name) => write!(f, "{name}={column}")?,
                        None => write!(f, "{column}")?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}
