//! Container patterns.

use std::cmp::Ordering;

use scry_collections::Stats;
use scry_ir::Datum;

use crate::pattern::field::Field;
use crate::Pattern;

/// A mapping: length statistics plus inferred content.
///
/// Content is either one entry per recognized literal key, or a single
/// entry pairing a general key pattern with a general value pattern.
/// Entries stay sorted by key literal so output is reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dict {
    pub lengths: Stats<u64>,
    pub content: Option<Vec<DictField>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DictField {
    pub key: Pattern,
    pub value: Pattern,
}

impl DictField {
    pub fn new(key: impl Into<Pattern>, value: impl Into<Pattern>) -> Self {
        DictField {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Dict {
    pub fn new(lengths: Stats<u64>) -> Self {
        Dict {
            lengths,
            content: None,
        }
    }

    pub fn with_content(mut self, content: Vec<DictField>) -> Self {
        let mut content = content;
        sort_by_literal(&mut content, |field| &field.key);
        self.content = Some(content);
        self
    }

    pub(crate) fn pairs(&self) -> Option<Vec<(&Pattern, &Pattern)>> {
        self.content
            .as_ref()
            .map(|fields| fields.iter().map(|f| (&f.key, &f.value)).collect())
    }

    pub fn validate(&self, value: &Datum) -> bool {
        match value {
            Datum::Map(map) => {
                let len = map.len() as u64;
                *self.lengths.min() <= len && len <= *self.lengths.max()
            }
            _ => false,
        }
    }

    pub fn merge(&self, other: &Dict) -> Option<Dict> {
        let content = match merge_pairs(&self.pairs(), &other.pairs())? {
            None => None,
            Some(pairs) => {
                let mut fields: Vec<DictField> = pairs
                    .into_iter()
                    .map(|(key, value)| DictField { key, value })
                    .collect();
                sort_by_literal(&mut fields, |field| &field.key);
                Some(fields)
            }
        };
        Some(Dict {
            lengths: self.lengths.merge(&other.lengths),
            content,
        })
    }
}

/// A heterogeneous record: one entry per recognized column (by position
/// or, when every record is named, by name), or a single general entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tuple {
    pub lengths: Stats<u64>,
    pub content: Option<Vec<TupleField>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleField {
    pub index: Pattern,
    pub value: Pattern,
}

impl TupleField {
    pub fn new(index: impl Into<Pattern>, value: impl Into<Pattern>) -> Self {
        TupleField {
            index: index.into(),
            value: value.into(),
        }
    }
}

impl Tuple {
    pub fn new(lengths: Stats<u64>) -> Self {
        Tuple {
            lengths,
            content: None,
        }
    }

    pub fn with_content(mut self, content: Vec<TupleField>) -> Self {
        let mut content = content;
        sort_by_literal(&mut content, |field| &field.index);
        self.content = Some(content);
        self
    }

    pub(crate) fn pairs(&self) -> Option<Vec<(&Pattern, &Pattern)>> {
        self.content
            .as_ref()
            .map(|fields| fields.iter().map(|f| (&f.index, &f.value)).collect())
    }

    /// Records validate, and so do lists: table-shaped list input is
    /// classified as tuples, so its sample members must conform.
    pub fn validate(&self, value: &Datum) -> bool {
        let len = match value {
            Datum::Record(record) => record.len() as u64,
            Datum::List(items) => items.len() as u64,
            _ => return false,
        };
        *self.lengths.min() <= len && len <= *self.lengths.max()
    }

    pub fn merge(&self, other: &Tuple) -> Option<Tuple> {
        let content = match merge_pairs(&self.pairs(), &other.pairs())? {
            None => None,
            Some(pairs) => {
                let mut fields: Vec<TupleField> = pairs
                    .into_iter()
                    .map(|(index, value)| TupleField { index, value })
                    .collect();
                sort_by_literal(&mut fields, |field| &field.index);
                Some(fields)
            }
        };
        Some(Tuple {
            lengths: self.lengths.merge(&other.lengths),
            content,
        })
    }
}

/// A homogeneous sequence: length statistics plus one item pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct List {
    pub lengths: Stats<u64>,
    pub content: Option<Box<Pattern>>,
}

impl List {
    pub fn new(lengths: Stats<u64>) -> Self {
        List {
            lengths,
            content: None,
        }
    }

    pub fn with_content(mut self, content: Pattern) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    pub fn validate(&self, value: &Datum) -> bool {
        match value {
            Datum::List(items) => {
                let len = items.len() as u64;
                *self.lengths.min() <= len && len <= *self.lengths.max()
            }
            _ => false,
        }
    }

    pub fn merge(&self, other: &List) -> Option<List> {
        let content = match (&self.content, &other.content) {
            (None, None) => None,
            (Some(a), Some(b)) => Some(Box::new(a.merge(b)?)),
            _ => return None,
        };
        Some(List {
            lengths: self.lengths.merge(&other.lengths),
            content,
        })
    }
}

fn literal_of(pattern: &Pattern) -> Option<&Field> {
    match pattern {
        Pattern::Field(field) => Some(field),
        _ => None,
    }
}

fn sort_by_literal<T>(entries: &mut [T], key: impl Fn(&T) -> &Pattern) {
    entries.sort_by(|a, b| match (literal_of(key(a)), literal_of(key(b))) {
        (Some(x), Some(y)) => x.value.cmp(&y.value),
        _ => Ordering::Equal,
    });
}

/// Compare container content.
///
/// Two contentless containers agree. Literal-keyed content agrees when
/// every shared literal's value patterns agree and at least one literal
/// is shared; one-sided literals merge as optional rather than blocking.
/// General content agrees pairwise.
pub(crate) fn compare_pairs(
    a: &Option<Vec<(&Pattern, &Pattern)>>,
    b: &Option<Vec<(&Pattern, &Pattern)>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => {
            let x_literal = x.iter().all(|&(key, _)| literal_of(key).is_some());
            let y_literal = y.iter().all(|&(key, _)| literal_of(key).is_some());
            if x_literal && y_literal {
                let mut shared = 0usize;
                for &(key, value) in x {
                    let Some(field) = literal_of(key) else {
                        return false;
                    };
                    if let Some((_, other_value)) = find_literal(y, field) {
                        if !value.compare(other_value) {
                            return false;
                        }
                        shared += 1;
                    }
                }
                shared > 0
            } else if !x_literal && !y_literal && x.len() == 1 && y.len() == 1 {
                x[0].0.compare(y[0].0) && x[0].1.compare(y[0].1)
            } else {
                false
            }
        }
        _ => false,
    }
}

fn find_literal<'a>(
    entries: &'a [(&'a Pattern, &'a Pattern)],
    field: &Field,
) -> Option<(&'a Pattern, &'a Pattern)> {
    entries
        .iter()
        .find(|&&(key, _)| literal_of(key).is_some_and(|other| other.value == field.value))
        .copied()
}

/// Merge container content under the same alignment as
/// [`compare_pairs`]. Outer `None` means the sides are incompatible;
/// inner `None` means both were contentless.
#[allow(clippy::type_complexity)]
pub(crate) fn merge_pairs(
    a: &Option<Vec<(&Pattern, &Pattern)>>,
    b: &Option<Vec<(&Pattern, &Pattern)>>,
) -> Option<Option<Vec<(Pattern, Pattern)>>> {
    match (a, b) {
        (None, None) => Some(None),
        (Some(x), Some(y)) => {
            let x_literal = x.iter().all(|&(key, _)| literal_of(key).is_some());
            let y_literal = y.iter().all(|&(key, _)| literal_of(key).is_some());
            if x_literal && y_literal {
                let mut merged: Vec<(Pattern, Pattern)> = Vec::with_capacity(x.len().max(y.len()));
                for &(key, value) in x {
                    let field = literal_of(key)?;
                    match find_literal(y, field) {
                        Some((other_key, other_value)) => {
                            let other_field = literal_of(other_key)?;
                            merged.push((
                                Pattern::Field(field.merge(other_field)),
                                value.merge(other_value)?,
                            ));
                        }
                        // Absent on the other side: present in strictly
                        // fewer entries than the merged container holds.
                        None => merged.push((
                            Pattern::Field(Field {
                                value: field.value.clone(),
                                optional: true,
                            }),
                            value.clone(),
                        )),
                    }
                }
                for &(key, value) in y {
                    let field = literal_of(key)?;
                    if find_literal(x, field).is_none() {
                        merged.push((
                            Pattern::Field(Field {
                                value: field.value.clone(),
                                optional: true,
                            }),
                            value.clone(),
                        ));
                    }
                }
                Some(Some(merged))
            } else if !x_literal && !y_literal && x.len() == 1 && y.len() == 1 {
                Some(Some(vec![(
                    x[0].0.merge(y[0].0)?,
                    x[0].1.merge(y[0].1)?,
                )]))
            } else {
                None
            }
        }
        _ => None,
    }
}
