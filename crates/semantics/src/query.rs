//! Cached label queries over the prim hierarchy.

use crate::error::{Result, SemanticsError};
use crate::labels_api::LabelsAPI;
use crate::sampling;
use stagegraph_core::{Interval, Prim, PrimPath, TimeCode, Token, TokenArray};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// The time specification a [`LabelsQuery`] evaluates at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryTime {
    At(TimeCode),
    Over(Interval),
}

/// Queries a prim's labels for one taxonomy at a time code or over an
/// interval, including labels inherited from ancestors.
///
/// All prims passed to one query must belong to the same stage. The query
/// caches per-path label reads and should be discarded when the stage
/// changes.
#[derive(Debug)]
pub struct LabelsQuery {
    taxonomy: Token,
    time: QueryTime,
    cached_labels: RwLock<HashMap<PrimPath, HashSet<Token>>>,
}

impl LabelsQuery {
    /// A query for `taxonomy` at a single `time_code`. The taxonomy must
    /// not be empty.
    pub fn at_time(taxonomy: Token, time_code: TimeCode) -> Result<Self> {
        if taxonomy.is_empty() {
            return Err(SemanticsError::EmptyTaxonomy);
        }
        Ok(LabelsQuery {
            taxonomy,
            time: QueryTime::At(time_code),
            cached_labels: RwLock::new(HashMap::new()),
        })
    }

    /// A query for `taxonomy` over `interval`. Neither may be empty.
    ///
    /// A finite open minimum returns the same result as a closed one: the
    /// values are held-interpolated, so there is no distinct value "just
    /// after" the boundary.
    pub fn over_interval(taxonomy: Token, interval: Interval) -> Result<Self> {
        if taxonomy.is_empty() {
            return Err(SemanticsError::EmptyTaxonomy);
        }
        if interval.is_empty() {
            return Err(SemanticsError::EmptyInterval(interval));
        }
        Ok(LabelsQuery {
            taxonomy,
            time: QueryTime::Over(interval),
            cached_labels: RwLock::new(HashMap::new()),
        })
    }

    pub fn taxonomy(&self) -> Token {
        self.taxonomy
    }

    pub fn time(&self) -> QueryTime {
        self.time
    }

    /// The sorted union of labels authored directly on `prim` for this
    /// query's taxonomy and time. Empty when the prim is unlabeled.
    pub fn compute_unique_direct_labels(&self, prim: &Prim) -> TokenArray {
        // If the prim is not labeled we can return without locking.
        if !self.populate_labels(prim) {
            return TokenArray::new();
        }
        let cache = self.cached_labels.read().unwrap();
        match cache.get(&prim.path()) {
            Some(labels) => sampling::sorted(labels.clone()),
            None => TokenArray::new(),
        }
    }

    /// The sorted union of labels on `prim` and all of its ancestors for
    /// this query's taxonomy and time.
    pub fn compute_unique_inherited_labels(&self, prim: &Prim) -> TokenArray {
        if !self.populate_inherited_labels(prim) {
            return TokenArray::new();
        }
        let mut unique = HashSet::new();
        {
            let cache = self.cached_labels.read().unwrap();
            for path in prim.path().ancestors() {
                if let Some(labels) = cache.get(&path) {
                    unique.extend(labels.iter().copied());
                }
            }
        }
        sampling::sorted(unique)
    }

    /// True if `label` was authored directly on `prim` for this query's
    /// taxonomy and time.
    pub fn has_direct_label(&self, prim: &Prim, label: Token) -> bool {
        if !self.populate_labels(prim) {
            return false;
        }
        let cache = self.cached_labels.read().unwrap();
        cache
            .get(&prim.path())
            .is_some_and(|labels| labels.contains(&label))
    }

    /// True if `label` was authored on `prim` or any of its ancestors for
    /// this query's taxonomy and time.
    pub fn has_inherited_label(&self, prim: &Prim, label: Token) -> bool {
        if !self.populate_inherited_labels(prim) {
            return false;
        }
        let cache = self.cached_labels.read().unwrap();
        prim.path().ancestors().any(|path| {
            cache
                .get(&path)
                .is_some_and(|labels| labels.contains(&label))
        })
    }

    /// Ensures `prim`'s labels are cached. Returns true when the prim has a
    /// cache entry, i.e. the schema is applied to it for this taxonomy.
    fn populate_labels(&self, prim: &Prim) -> bool {
        let schema = LabelsAPI::new(prim.clone(), self.taxonomy);
        if !schema.is_applied() {
            return false;
        }
        let path = prim.path();
        {
            let cache = self.cached_labels.read().unwrap();
            if cache.contains_key(&path) {
                return true;
            }
        }

        // Compute outside the lock.
        let attr = schema.labels_attr();
        let labels = match self.time {
            QueryTime::At(time_code) => match attr.get(time_code) {
                Some(value) => value.into_iter().collect(),
                None => {
                    tracing::error!(
                        path = %path,
                        taxonomy = %self.taxonomy,
                        "labels attribute has no value"
                    );
                    HashSet::new()
                }
            },
            QueryTime::Over(interval) => {
                let times = sampling::interval_sample_times(&attr, &interval);
                sampling::union_over_times(&attr, &times).unwrap_or_default()
            }
        };

        let mut cache = self.cached_labels.write().unwrap();
        // Another thread may have populated this path in the meantime; its
        // result is identical, so the loser's computation is discarded.
        cache.entry(path).or_insert(labels);
        true
    }

    /// Ensures every labeled ancestor of `prim` (including `prim`) is
    /// cached. Returns true when any of them carries the schema.
    fn populate_inherited_labels(&self, prim: &Prim) -> bool {
        let stage = prim.stage();
        let mut has_inherited_label = false;
        for path in prim.path().ancestors() {
            // populate_labels must run for every ancestor so each one lands
            // in the cache; don't short-circuit.
            let Some(ancestor) = stage.prim_at_path(path) else {
                continue;
            };
            if self.populate_labels(&ancestor) {
                has_inherited_label = true;
            }
        }
        has_inherited_label
    }
}
