//! Literal fields and choice sets.

use scry_ir::Datum;

/// A recognized literal key or column index.
///
/// `optional` records that the field was observed in strictly fewer
/// entries than the enclosing container holds. It is deliberately
/// ignored by `compare`: the same field may be mandatory in one subtree
/// and optional in another, and merging ORs the flags together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Field {
    pub value: Datum,
    pub optional: bool,
}

impl Field {
    pub fn new(value: impl Into<Datum>, optional: bool) -> Self {
        Field {
            value: value.into(),
            optional,
        }
    }

    pub fn merge(&self, other: &Field) -> Field {
        Field {
            value: self.value.clone(),
            optional: self.optional || other.optional,
        }
    }

    pub fn validate(&self, value: &Datum) -> bool {
        *value == self.value
    }
}

/// A small, enumerable set of literal fields: the pattern a bag gets
/// when its distinct values stay under the field threshold.
///
/// Members are kept sorted by literal with at most one member per
/// distinct literal; construction merges duplicates. Never empty by
/// construction (an empty bag is the `Empty` pattern long before a
/// choice set could be built).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fields {
    members: Vec<Field>,
}

impl Fields {
    pub fn new(members: impl IntoIterator<Item = Field>) -> Self {
        let mut members: Vec<Field> = members.into_iter().collect();
        members.sort();
        let mut deduped: Vec<Field> = Vec::with_capacity(members.len());
        for member in members {
            match deduped.last_mut() {
                Some(last) if last.value == member.value => *last = last.merge(&member),
                _ => deduped.push(member),
            }
        }
        Fields { members: deduped }
    }

    pub fn members(&self) -> &[Field] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, value: &Datum) -> Option<&Field> {
        self.members.iter().find(|member| member.value == *value)
    }

    /// Union by literal; shared literals merge their optionality.
    pub fn merge(&self, other: &Fields) -> Fields {
        Fields::new(self.members.iter().chain(&other.members).cloned())
    }

    /// Disjunction over the members.
    pub fn validate(&self, value: &Datum) -> bool {
        self.members.iter().any(|member| member.validate(value))
    }
}
