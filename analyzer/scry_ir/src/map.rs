//! Insertion-ordered mapping with `Datum` keys.

use crate::Datum;

/// A mapping from datum keys to datum values.
///
/// Entries keep their insertion order (the order the source document
/// presented them in); inserting an existing key replaces its value in
/// place. Lookup is a linear scan: the analyzer only indexes maps by
/// literal key when the key set is small enough to be a choice set, so
/// scans stay short.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Map {
    entries: Vec<(Datum, Datum)>,
}

impl Map {
    pub fn new() -> Self {
        Map::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Datum, Datum)>) -> Self {
        let mut map = Map::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Insert `value` under `key`, replacing any existing entry.
    pub fn insert(&mut self, key: Datum, value: Datum) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Datum) -> Option<&Datum> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Datum, &Datum)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Datum> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Datum> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Datum, Datum)> for Map {
    fn from_iter<I: IntoIterator<Item = (Datum, Datum)>>(iter: I) -> Self {
        Map::from_entries(iter)
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Datum, &'a Datum);
    type IntoIter = MapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        MapIter {
            inner: self.entries.iter(),
        }
    }
}

/// Borrowed entry iterator over a [`Map`].
pub struct MapIter<'a> {
    inner: std::slice::Iter<'a, (Datum, Datum)>,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a Datum, &'a Datum);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}
