//! An in-memory stage: the prim hierarchy the semantics schemas attach to.
//!
//! `Stage`, `Prim`, and `Attribute` are cheap handles over shared state.
//! Prims are addressed by path; handles stay valid across authoring because
//! every operation re-resolves its path under the stage lock.

use crate::error::{Result, StageError};
use crate::path::PrimPath;
use crate::time::{Interval, TimeCode};
use crate::token::{Token, TokenArray};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
struct AttrData {
    default: Option<TokenArray>,
    // Sorted by time. Small per-attribute sample counts are expected, so a
    // sorted Vec beats a tree map here.
    samples: Vec<(f64, TokenArray)>,
}

impl AttrData {
    fn is_authored(&self) -> bool {
        self.default.is_some() || !self.samples.is_empty()
    }

    fn insert_sample(&mut self, time: f64, value: TokenArray) {
        match self.samples.binary_search_by(|(t, _)| t.total_cmp(&time)) {
            Ok(idx) => self.samples[idx].1 = value,
            Err(idx) => self.samples.insert(idx, (time, value)),
        }
    }

    /// Held interpolation: the nearest sample at or before `t`; before the
    /// first sample, the first sample; with no samples, the default.
    fn resolve(&self, time: TimeCode) -> Option<TokenArray> {
        let t = match time {
            TimeCode::Default => return self.default.clone(),
            TimeCode::Numeric(t) => t,
        };
        if self.samples.is_empty() {
            return self.default.clone();
        }
        let held = self
            .samples
            .iter()
            .take_while(|(sample_time, _)| *sample_time <= t)
            .last()
            .unwrap_or(&self.samples[0]);
        Some(held.1.clone())
    }
}

#[derive(Debug, Default)]
struct PrimData {
    children: Vec<Token>,
    applied_schemas: Vec<Token>,
    attributes: IndexMap<Token, AttrData>,
}

#[derive(Debug)]
struct StageData {
    prims: HashMap<PrimPath, PrimData>,
}

impl StageData {
    fn new() -> Self {
        let mut prims = HashMap::new();
        prims.insert(PrimPath::root(), PrimData::default());
        StageData { prims }
    }
}

/// A cloneable handle to an in-memory prim hierarchy.
#[derive(Debug, Clone)]
pub struct Stage {
    inner: Arc<RwLock<StageData>>,
}

impl Stage {
    /// Creates an empty stage containing only the pseudo-root.
    pub fn in_memory() -> Self {
        Stage {
            inner: Arc::new(RwLock::new(StageData::new())),
        }
    }

    /// The pseudo-root prim at `/`. It always exists but cannot carry
    /// attributes or applied schemas.
    pub fn pseudo_root(&self) -> Prim {
        Prim {
            stage: self.clone(),
            path: PrimPath::root(),
        }
    }

    /// Defines a prim at `path`, creating any missing ancestors. Defining an
    /// already-existing prim is a no-op that returns its handle.
    pub fn define_prim(&self, path: PrimPath) -> Result<Prim> {
        if path.is_root() {
            return Ok(self.pseudo_root());
        }
        let mut chain: Vec<PrimPath> = path.ancestors().collect();
        chain.reverse();

        let mut data = self.inner.write().unwrap();
        for prim_path in chain {
            if data.prims.contains_key(&prim_path) {
                continue;
            }
            debug!(path = %prim_path, "defining prim");
            data.prims.insert(prim_path, PrimData::default());
            let parent = prim_path.parent().unwrap_or_else(PrimPath::root);
            let name = prim_path.name();
            let parent_data = data
                .prims
                .get_mut(&parent)
                .expect("ancestors are created root-first");
            if !parent_data.children.contains(&name) {
                parent_data.children.push(name);
            }
        }
        Ok(Prim {
            stage: self.clone(),
            path,
        })
    }

    /// Returns the prim at `path`, if one has been defined.
    pub fn prim_at_path(&self, path: PrimPath) -> Option<Prim> {
        let data = self.inner.read().unwrap();
        data.prims.contains_key(&path).then(|| Prim {
            stage: self.clone(),
            path,
        })
    }
}

/// A handle to one prim on a stage.
#[derive(Debug, Clone)]
pub struct Prim {
    stage: Stage,
    path: PrimPath,
}

impl Prim {
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn path(&self) -> PrimPath {
        self.path
    }

    pub fn name(&self) -> Token {
        self.path.name()
    }

    pub fn is_pseudo_root(&self) -> bool {
        self.path.is_root()
    }

    pub fn parent(&self) -> Option<Prim> {
        self.path.parent().map(|path| Prim {
            stage: self.stage.clone(),
            path,
        })
    }

    /// Child prims in definition order.
    pub fn children(&self) -> Vec<Prim> {
        let data = self.stage.inner.read().unwrap();
        let Some(prim_data) = data.prims.get(&self.path) else {
            return Vec::new();
        };
        prim_data
            .children
            .iter()
            .filter_map(|name| self.path.append(*name).ok())
            .map(|path| Prim {
                stage: self.stage.clone(),
                path,
            })
            .collect()
    }

    /// Records a multi-apply API schema instance on this prim, encoded as
    /// `Schema:instance`. Applying the same instance twice is a no-op.
    pub fn apply_api_schema(&self, schema: Token, instance: Token) -> Result<()> {
        if self.is_pseudo_root() {
            return Err(StageError::PseudoRoot);
        }
        let entry = Token::new(&format!("{}:{}", schema, instance));
        let mut data = self.stage.inner.write().unwrap();
        let prim_data = data
            .prims
            .get_mut(&self.path)
            .ok_or(StageError::MissingPrim(self.path))?;
        if !prim_data.applied_schemas.contains(&entry) {
            debug!(path = %self.path, schema = %entry, "applying API schema");
            prim_data.applied_schemas.push(entry);
        }
        Ok(())
    }

    pub fn has_api_schema(&self, schema: Token, instance: Token) -> bool {
        let entry = Token::new(&format!("{}:{}", schema, instance));
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)
            .is_some_and(|prim_data| prim_data.applied_schemas.contains(&entry))
    }

    /// All applied schema records, in application order.
    pub fn applied_schemas(&self) -> Vec<Token> {
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)
            .map(|prim_data| prim_data.applied_schemas.clone())
            .unwrap_or_default()
    }

    /// A handle to the named attribute. The attribute need not be authored
    /// yet; authoring happens through the handle.
    pub fn attribute(&self, name: Token) -> Attribute {
        Attribute {
            stage: self.stage.clone(),
            path: self.path,
            name,
        }
    }
}

/// A handle to one named attribute of a prim.
#[derive(Debug, Clone)]
pub struct Attribute {
    stage: Stage,
    path: PrimPath,
    name: Token,
}

impl Attribute {
    pub fn name(&self) -> Token {
        self.name
    }

    pub fn prim_path(&self) -> PrimPath {
        self.path
    }

    /// True once a default value or any time sample has been written.
    pub fn is_authored(&self) -> bool {
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)
            .and_then(|prim_data| prim_data.attributes.get(&self.name))
            .is_some_and(AttrData::is_authored)
    }

    /// Authors the default value.
    pub fn set(&self, value: TokenArray) -> Result<()> {
        self.author(|attr| attr.default = Some(value))
    }

    /// Authors a time sample.
    pub fn set_at_time(&self, value: TokenArray, time: f64) -> Result<()> {
        self.author(|attr| attr.insert_sample(time, value))
    }

    fn author(&self, write: impl FnOnce(&mut AttrData)) -> Result<()> {
        if self.path.is_root() {
            return Err(StageError::PseudoRoot);
        }
        let mut data = self.stage.inner.write().unwrap();
        let prim_data = data
            .prims
            .get_mut(&self.path)
            .ok_or(StageError::MissingPrim(self.path))?;
        write(prim_data.attributes.entry(self.name).or_default());
        Ok(())
    }

    /// Resolves the value at `time`. Returns `None` when nothing relevant
    /// has been authored.
    pub fn get(&self, time: TimeCode) -> Option<TokenArray> {
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)?
            .attributes
            .get(&self.name)?
            .resolve(time)
    }

    /// All authored sample times, ascending.
    pub fn time_samples(&self) -> Vec<f64> {
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)
            .and_then(|prim_data| prim_data.attributes.get(&self.name))
            .map(|attr| attr.samples.iter().map(|(t, _)| *t).collect())
            .unwrap_or_default()
    }

    /// Authored sample times falling inside `interval`, ascending.
    pub fn time_samples_in_interval(&self, interval: &Interval) -> Vec<f64> {
        self.time_samples()
            .into_iter()
            .filter(|t| interval.contains(*t))
            .collect()
    }

    /// True when more than one sample is authored, i.e. the resolved value
    /// can differ across times.
    pub fn value_might_be_time_varying(&self) -> bool {
        let data = self.stage.inner.read().unwrap();
        data.prims
            .get(&self.path)
            .and_then(|prim_data| prim_data.attributes.get(&self.name))
            .is_some_and(|attr| attr.samples.len() > 1)
    }
}
