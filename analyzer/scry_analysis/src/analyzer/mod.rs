//! The two-phase recursive analyzer.
//!
//! Phase one (*match*) classifies the bag of values at the current level
//! into a single pattern node. Phase two (*descend*) uses that node as a
//! path selector, re-extracts the next level of values from the root,
//! and recurses. Containers compose the recursion results into their
//! content; everything else returns as a leaf.
//!
//! Descent always starts again from the root along the accumulated
//! selector path rather than carrying child collections around, so the
//! analyzer holds no references into the input beyond the current
//! extraction.


mod extract;
mod matcher;

use smallvec::SmallVec;

use scry_ir::Datum;
use scry_stack::ensure_sufficient_stack;
use scry_types::{Dict, DictField, Field, Pattern, Tuple, TupleField};

use crate::{Anomaly, Config, Error, Progress};
use extract::Selector;

type Path = SmallVec<[Selector; 8]>;
type Observer = dyn Fn(&Anomaly) + Send + Sync;

/// Infers a structural pattern for one in-memory value tree.
///
/// An analyzer is configured once and may then analyze any number of
/// inputs; analyses of independent inputs share no state beyond the
/// configuration, so separate analyzers may run on separate threads
/// freely.
pub struct Analyzer {
    config: Config,
    min_seconds: f64,
    max_seconds: f64,
    progress: Progress,
    observer: Option<Box<Observer>>,
}

impl Analyzer {
    /// Validate `config` and resolve its timestamp window against the
    /// current clock.
    pub fn new(config: Config) -> Result<Self, Error> {
        let (min, max) = config.resolve_window()?;
        Ok(Analyzer {
            min_seconds: scry_types::convert::unix_seconds(min),
            max_seconds: scry_types::convert::unix_seconds(max),
            config,
            progress: Progress::new(),
            observer: None,
        })
    }

    /// Install a callback for validation anomalies. Invoked
    /// synchronously from the analyzing thread.
    pub fn on_warning(mut self, observer: impl Fn(&Anomaly) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// A progress handle, readable from any thread.
    pub fn progress(&self) -> Progress {
        self.progress.clone()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn timestamp_window(&self) -> (f64, f64) {
        (self.min_seconds, self.max_seconds)
    }

    /// Infer the structural pattern of `root`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(&self, root: &Datum) -> Result<Pattern, Error> {
        if self.config.track_progress {
            self.progress.begin(root.top_count(), root.node_count());
        }
        let mut path = Path::new();
        let result = self.analyze_at(root, &mut path, self.config.field_threshold, None);
        if self.config.track_progress {
            self.progress.finish();
        }
        result
    }

    pub(crate) fn warn(&self, anomaly: &Anomaly) {
        tracing::warn!(%anomaly, "validation anomaly");
        if let Some(observer) = &self.observer {
            observer(anomaly);
        }
    }

    fn analyze_at(
        &self,
        root: &Datum,
        path: &mut Path,
        threshold: usize,
        parent_card: Option<u64>,
    ) -> Result<Pattern, Error> {
        ensure_sufficient_stack(|| self.analyze_level(root, path, threshold, parent_card))
    }

    fn analyze_level(
        &self,
        root: &Datum,
        path: &mut Path,
        threshold: usize,
        parent_card: Option<u64>,
    ) -> Result<Pattern, Error> {
        let items = self.extract(root, path);
        if self.config.track_progress {
            self.progress.retire_sub(items.len() as u64);
            if path.len() == 1 {
                self.progress.retire_top(items.len() as u64);
            }
        }
        let pattern = self.match_bag(&items, threshold, parent_card)?;
        match pattern {
            Pattern::List(list) => {
                // Lists are homogeneous: a single item pattern covers
                // every element of every sampled list.
                let card = list.lengths.card();
                path.push(Selector::Items);
                let item = self.analyze_at(root, path, self.config.field_threshold, Some(card))?;
                path.pop();
                Ok(Pattern::List(list.with_content(item)))
            }
            Pattern::Dict(dict) => self.analyze_dict(root, path, dict),
            Pattern::Tuple(tuple) => self.analyze_tuple(root, path, tuple, &items),
            leaf => Ok(leaf),
        }
    }

    fn analyze_dict(&self, root: &Datum, path: &mut Path, dict: Dict) -> Result<Pattern, Error> {
        let card = dict.lengths.card();
        path.push(Selector::Keys);
        let keys = self.analyze_at(root, path, self.config.field_threshold, Some(card))?;
        path.pop();
        match keys {
            Pattern::Fields(fields) => {
                let mut content = Vec::with_capacity(fields.len());
                for field in fields.iter() {
                    path.push(Selector::Value(field.clone()));
                    // A literal field's values are data, never a choice
                    // set over themselves.
                    let value = self.analyze_at(root, path, 0, Some(card))?;
                    path.pop();
                    content.push(DictField::new(field.clone(), value));
                }
                let content = self.collapse_siblings(root, path, content)?;
                Ok(Pattern::Dict(dict.with_content(content)))
            }
            key_pattern => {
                path.push(Selector::ValuesWhere(key_pattern.clone()));
                let value =
                    self.analyze_at(root, path, self.config.field_threshold, Some(card))?;
                path.pop();
                Ok(Pattern::Dict(
                    dict.with_content(vec![DictField::new(key_pattern, value)]),
                ))
            }
        }
    }

    /// Collapse literal-keyed entries whose subtrees share a shape.
    ///
    /// A mapping that uses identifiers as keys ("ABZ", "AMS", …) with a
    /// record per key would otherwise produce one subtree per key.
    /// Container-valued entries are grouped into greedy equivalence
    /// classes under `compare`; each class of two or more folds into a
    /// single entry whose key side is re-matched from the raw key bag
    /// and whose value side is the merge of the class. Scalar-valued
    /// entries always stay distinct.
    fn collapse_siblings(
        &self,
        root: &Datum,
        path: &mut Path,
        content: Vec<DictField>,
    ) -> Result<Vec<DictField>, Error> {
        let mut keepers: Vec<DictField> = Vec::new();
        let mut classes: Vec<Vec<DictField>> = Vec::new();
        for entry in content {
            let collapsible = matches!(
                entry.value,
                Pattern::Dict(_) | Pattern::Tuple(_) | Pattern::List(_)
            );
            if !collapsible {
                keepers.push(entry);
                continue;
            }
            match classes
                .iter_mut()
                .find(|class| class[0].value.compare(&entry.value))
            {
                Some(class) => class.push(entry),
                None => classes.push(vec![entry]),
            }
        }

        let mut result = keepers;
        for class in classes {
            if class.len() == 1 {
                result.extend(class);
                continue;
            }
            let folded = class
                .iter()
                .skip(1)
                .try_fold(class[0].value.clone(), |acc, entry| acc.merge(&entry.value));
            match folded {
                Some(value) => {
                    tracing::debug!(members = class.len(), "collapsing sibling subtrees");
                    let literals: Vec<&Datum> = class
                        .iter()
                        .filter_map(|entry| match &entry.key {
                            Pattern::Field(field) => Some(&field.value),
                            _ => None,
                        })
                        .collect();
                    path.push(Selector::Keys);
                    let keys = self.extract(root, path);
                    path.pop();
                    let class_keys: Vec<&Datum> = keys
                        .into_iter()
                        .filter(|key| literals.iter().any(|literal| *literal == *key))
                        .collect();
                    let key_pattern = self.match_bag(&class_keys, 0, None)?;
                    result.push(DictField::new(key_pattern, value));
                }
                // A pairwise-compatible class can still fail to fold
                // (e.g. an inner sample quirk); keep the entries apart.
                None => result.extend(class),
            }
        }
        Ok(result)
    }

    fn analyze_tuple(
        &self,
        root: &Datum,
        path: &mut Path,
        tuple: Tuple,
        items: &[&Datum],
    ) -> Result<Pattern, Error> {
        let card = tuple.lengths.card();
        // Names are only trusted when every single record carries them;
        // otherwise columns go by position.
        let all_named = items
            .iter()
            .all(|item| matches!(item, Datum::Record(record) if record.is_named()));
        if all_named {
            self.analyze_named_tuple(root, path, tuple, items, card)
        } else {
            self.analyze_positional_tuple(root, path, tuple, items, card)
        }
    }

    fn analyze_named_tuple(
        &self,
        root: &Datum,
        path: &mut Path,
        tuple: Tuple,
        items: &[&Datum],
        card: u64,
    ) -> Result<Pattern, Error> {
        // Observation count per column name, in first-seen order.
        let mut names: Vec<(&str, u64)> = Vec::new();
        for item in items {
            let Datum::Record(record) = item else {
                continue;
            };
            let Some(record_names) = record.names() else {
                continue;
            };
            for name in record_names {
                match names.iter_mut().find(|(known, _)| *known == name.as_str()) {
                    Some((_, count)) => *count += 1,
                    None => names.push((name.as_str(), 1)),
                }
            }
        }
        if names.len() < self.config.field_threshold {
            let mut content = Vec::with_capacity(names.len());
            for (name, count) in &names {
                let field = Field::new(*name, *count < card);
                path.push(Selector::Column(field.clone()));
                let value = self.analyze_at(root, path, 0, Some(card))?;
                path.pop();
                content.push(TupleField::new(field, value));
            }
            return Ok(Pattern::Tuple(tuple.with_content(content)));
        }
        // Too many columns: treat the names themselves as data.
        let owned: Vec<Datum> = names
            .iter()
            .map(|(name, _)| Datum::from(*name))
            .collect();
        let refs: Vec<&Datum> = owned.iter().collect();
        self.analyze_general_tuple(root, path, tuple, &refs, card)
    }

    fn analyze_positional_tuple(
        &self,
        root: &Datum,
        path: &mut Path,
        tuple: Tuple,
        items: &[&Datum],
        card: u64,
    ) -> Result<Pattern, Error> {
        let width = items
            .iter()
            .filter_map(|item| item.length())
            .max()
            .unwrap_or(0);
        if (width as usize) < self.config.field_threshold {
            let mut content = Vec::with_capacity(width as usize);
            for index in 0..width {
                let count = items
                    .iter()
                    .filter(|item| item.length().is_some_and(|len| len > index))
                    .count() as u64;
                #[allow(clippy::cast_possible_wrap)]
                let field = Field::new(index as i64, count < card);
                path.push(Selector::Column(field.clone()));
                let value = self.analyze_at(root, path, 0, Some(card))?;
                path.pop();
                content.push(TupleField::new(field, value));
            }
            return Ok(Pattern::Tuple(tuple.with_content(content)));
        }
        // Too many columns: treat the indices themselves as data.
        #[allow(clippy::cast_possible_wrap)]
        let owned: Vec<Datum> = (0..width).map(|index| Datum::Int(index as i64)).collect();
        let refs: Vec<&Datum> = owned.iter().collect();
        self.analyze_general_tuple(root, path, tuple, &refs, card)
    }

    fn analyze_general_tuple(
        &self,
        root: &Datum,
        path: &mut Path,
        tuple: Tuple,
        column_data: &[&Datum],
        card: u64,
    ) -> Result<Pattern, Error> {
        let index_pattern = self.match_bag(column_data, self.config.field_threshold, Some(card))?;
        path.push(Selector::ColumnsWhere(index_pattern.clone()));
        let value =
            self.analyze_at(root, path, self.config.field_threshold, Some(card))?;
        path.pop();
        Ok(Pattern::Tuple(tuple.with_content(vec![TupleField::new(
            index_pattern,
            value,
        )])))
    }
}
