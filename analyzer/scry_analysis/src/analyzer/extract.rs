//! Path extraction: walking the input along inferred selectors.

use scry_ir::Datum;
use scry_types::{Field, Pattern};

use crate::Anomaly;

use super::Analyzer;

/// One step of a descent path.
///
/// A path is the sequence of selectors from the root to the bag of
/// values currently under analysis; extraction replays it against the
/// root on every descent.
#[derive(Clone, Debug)]
pub(crate) enum Selector {
    /// Every element of a list.
    Items,
    /// Every key of a map.
    Keys,
    /// The value under one literal key; absence is fine iff optional.
    Value(Field),
    /// Every map value whose key validates against the pattern.
    ValuesWhere(Pattern),
    /// One record/list column by literal index or name.
    Column(Field),
    /// Every record/list column whose index or name validates.
    ColumnsWhere(Pattern),
}

impl Analyzer {
    pub(crate) fn extract<'a>(&self, root: &'a Datum, path: &[Selector]) -> Vec<&'a Datum> {
        let mut out = Vec::new();
        self.extract_into(root, path, &mut out);
        out
    }

    fn extract_into<'a>(&self, datum: &'a Datum, path: &[Selector], out: &mut Vec<&'a Datum>) {
        let Some((head, rest)) = path.split_first() else {
            out.push(datum);
            return;
        };
        match head {
            Selector::Items => match datum {
                Datum::List(items) => {
                    for item in items {
                        self.extract_into(item, rest, out);
                    }
                }
                other => self.kind_mismatch(other, "list"),
            },
            Selector::Keys => match datum {
                Datum::Map(map) => {
                    for key in map.keys() {
                        self.extract_into(key, rest, out);
                    }
                }
                other => self.kind_mismatch(other, "map"),
            },
            Selector::Value(field) => match datum {
                Datum::Map(map) => match map.get(&field.value) {
                    Some(value) => self.extract_into(value, rest, out),
                    None if field.optional => {}
                    None => self.warn(&Anomaly::MissingKey {
                        key: field.value.clone(),
                    }),
                },
                other => self.kind_mismatch(other, "map"),
            },
            Selector::ValuesWhere(pattern) => match datum {
                Datum::Map(map) => {
                    for (key, value) in map {
                        if pattern.validate(key) {
                            self.extract_into(value, rest, out);
                        } else {
                            self.warn(&Anomaly::KeyMismatch {
                                key: key.clone(),
                                expected: pattern.to_string(),
                            });
                        }
                    }
                }
                other => self.kind_mismatch(other, "map"),
            },
            Selector::Column(field) => match column_of(datum, &field.value) {
                Ok(Some(value)) => self.extract_into(value, rest, out),
                Ok(None) if field.optional => {}
                Ok(None) => self.warn(&Anomaly::MissingColumn {
                    column: field.value.clone(),
                }),
                Err(found) => self.warn(&Anomaly::KindMismatch {
                    found,
                    expected: "record",
                }),
            },
            Selector::ColumnsWhere(pattern) => match datum {
                Datum::Record(record) => {
                    for (index, value) in record.iter().enumerate() {
                        // Named records select by name, positional by
                        // index, mirroring how the columns were
                        // classified.
                        let selector = match record.names().and_then(|names| names.get(index)) {
                            Some(name) => Datum::from(name.as_str()),
                            #[allow(clippy::cast_possible_wrap)]
                            None => Datum::Int(index as i64),
                        };
                        if pattern.validate(&selector) {
                            self.extract_into(value, rest, out);
                        } else {
                            self.warn(&Anomaly::ColumnMismatch {
                                column: selector,
                                expected: pattern.to_string(),
                            });
                        }
                    }
                }
                Datum::List(items) => {
                    for (index, value) in items.iter().enumerate() {
                        #[allow(clippy::cast_possible_wrap)]
                        let selector = Datum::Int(index as i64);
                        if pattern.validate(&selector) {
                            self.extract_into(value, rest, out);
                        } else {
                            self.warn(&Anomaly::ColumnMismatch {
                                column: selector,
                                expected: pattern.to_string(),
                            });
                        }
                    }
                }
                other => self.kind_mismatch(other, "record"),
            },
        }
    }

    fn kind_mismatch(&self, found: &Datum, expected: &'static str) {
        self.warn(&Anomaly::KindMismatch {
            found: found.kind_name(),
            expected,
        });
    }
}

fn column_of<'a>(datum: &'a Datum, selector: &Datum) -> Result<Option<&'a Datum>, &'static str> {
    match (datum, selector) {
        (Datum::Record(record), Datum::Int(index)) => {
            Ok(usize::try_from(*index).ok().and_then(|i| record.get(i)))
        }
        (Datum::Record(record), Datum::Str(name)) => Ok(record.field(name)),
        (Datum::List(items), Datum::Int(index)) => {
            Ok(usize::try_from(*index).ok().and_then(|i| items.get(i)))
        }
        (other, _) => Err(other.kind_name()),
    }
}
