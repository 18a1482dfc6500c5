//! The multi-apply labels schema.
//!
//! Applying `LabelsAPI` to a prim for a taxonomy records
//! `SemanticsLabelsAPI:<taxonomy>` in the prim's applied schemas and gives
//! it a `semantics:labels:<taxonomy>` token-array attribute. A prim may
//! carry any number of taxonomies.

use crate::error::{Result, SemanticsError};
use crate::sampling;
use crate::tokens::SEMANTICS_TOKENS;
use stagegraph_core::path::is_valid_identifier;
use stagegraph_core::{Attribute, Interval, Prim, Token, TokenArray};
use std::collections::HashSet;

const INSTANCE_NAME_PLACEHOLDER: &str = "__INSTANCE_NAME__";

// The authored property path for an applied instance. The token table's
// `semantics_labels_multiple_apply_template` names the same property in the
// schema's identifier form.
const LABELS_PROPERTY_TEMPLATE: &str = "semantics:labels:__INSTANCE_NAME__";

/// A view of one taxonomy's labels on one prim.
#[derive(Debug, Clone)]
pub struct LabelsAPI {
    prim: Prim,
    instance_name: Token,
}

impl LabelsAPI {
    /// Wraps `prim` for `taxonomy`. The schema may or may not be applied;
    /// check [`LabelsAPI::is_applied`].
    pub fn new(prim: Prim, taxonomy: Token) -> Self {
        LabelsAPI {
            prim,
            instance_name: taxonomy,
        }
    }

    pub fn prim(&self) -> &Prim {
        &self.prim
    }

    /// The taxonomy this view addresses.
    pub fn instance_name(&self) -> Token {
        self.instance_name
    }

    /// True when `SemanticsLabelsAPI:<taxonomy>` is in the prim's applied
    /// schemas.
    pub fn is_applied(&self) -> bool {
        self.prim
            .has_api_schema(SEMANTICS_TOKENS.semantics_labels_api, self.instance_name)
    }

    /// Whether [`LabelsAPI::apply`] would succeed.
    pub fn can_apply(prim: &Prim, taxonomy: Token) -> bool {
        !prim.is_pseudo_root() && !taxonomy.is_empty() && is_valid_identifier(taxonomy.as_str())
    }

    /// Applies the schema for `taxonomy` and returns the resulting view.
    /// Re-applying an existing taxonomy is a no-op.
    pub fn apply(prim: &Prim, taxonomy: Token) -> Result<LabelsAPI> {
        if prim.is_pseudo_root() {
            return Err(SemanticsError::PseudoRoot);
        }
        if taxonomy.is_empty() {
            return Err(SemanticsError::EmptyTaxonomy);
        }
        if !is_valid_identifier(taxonomy.as_str()) {
            return Err(SemanticsError::InvalidTaxonomy(taxonomy));
        }
        prim.apply_api_schema(SEMANTICS_TOKENS.semantics_labels_api, taxonomy)?;
        Ok(LabelsAPI::new(prim.clone(), taxonomy))
    }

    /// The attribute name for `taxonomy`: `semantics:labels:<taxonomy>`.
    pub fn labels_attr_name(taxonomy: Token) -> Token {
        Token::new(&LABELS_PROPERTY_TEMPLATE.replace(INSTANCE_NAME_PLACEHOLDER, taxonomy.as_str()))
    }

    /// The labels attribute handle for this taxonomy.
    pub fn labels_attr(&self) -> Attribute {
        self.prim
            .attribute(Self::labels_attr_name(self.instance_name))
    }

    /// Authors `default` as the labels attribute's default value and
    /// returns the attribute.
    pub fn create_labels_attr(&self, default: TokenArray) -> Result<Attribute> {
        let attr = self.labels_attr();
        attr.set(default)?;
        Ok(attr)
    }

    /// The sorted union of this taxonomy's labels over `interval`: every
    /// value authored at a sample inside the interval, plus the value
    /// holding as the interval begins. Errors when the schema is not
    /// applied here or the interval is empty.
    pub fn compute_over_interval(&self, interval: &Interval) -> Result<TokenArray> {
        if !self.is_applied() {
            return Err(SemanticsError::UnappliedSchema {
                path: self.prim.path(),
                taxonomy: self.instance_name,
            });
        }
        if interval.is_empty() {
            return Err(SemanticsError::EmptyInterval(*interval));
        }
        let attr = self.labels_attr();
        let times = sampling::interval_sample_times(&attr, interval);
        let labels = sampling::union_over_times(&attr, &times).unwrap_or_default();
        Ok(sampling::sorted(labels))
    }

    /// Taxonomies applied directly to `prim`, sorted. The pseudo-root has
    /// none.
    pub fn direct_taxonomies(prim: &Prim) -> Vec<Token> {
        let prefix = format!("{}:", SEMANTICS_TOKENS.semantics_labels_api);
        let mut taxonomies: Vec<Token> = prim
            .applied_schemas()
            .iter()
            .filter_map(|entry| entry.as_str().strip_prefix(&prefix))
            .map(Token::new)
            .collect();
        taxonomies.sort();
        taxonomies.dedup();
        taxonomies
    }

    /// Taxonomies applied to any strict ancestor of `prim`, sorted and
    /// deduplicated.
    pub fn ancestor_taxonomies(prim: &Prim) -> Vec<Token> {
        Self::collect_taxonomies(prim, true)
    }

    /// Taxonomies applied to `prim` or any of its ancestors, sorted and
    /// deduplicated.
    pub fn inherited_taxonomies(prim: &Prim) -> Vec<Token> {
        Self::collect_taxonomies(prim, false)
    }

    fn collect_taxonomies(prim: &Prim, skip_self: bool) -> Vec<Token> {
        let stage = prim.stage();
        let mut unique = HashSet::new();
        for path in prim.path().ancestors().skip(if skip_self { 1 } else { 0 }) {
            if let Some(ancestor) = stage.prim_at_path(path) {
                unique.extend(Self::direct_taxonomies(&ancestor));
            }
        }
        sampling::sorted(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_name_substitutes_the_taxonomy() {
        assert_eq!(
            LabelsAPI::labels_attr_name(Token::new("style")).as_str(),
            "semantics:labels:style"
        );
        assert_eq!(
            LabelsAPI::labels_attr_name(Token::new("category")).as_str(),
            "semantics:labels:category"
        );
    }

    #[test]
    fn can_apply_validates_instance_names() {
        let stage = stagegraph_core::Stage::in_memory();
        let prim = stage
            .define_prim(stagegraph_core::PrimPath::parse("/P").unwrap())
            .unwrap();
        assert!(LabelsAPI::can_apply(&prim, Token::new("style")));
        assert!(!LabelsAPI::can_apply(&prim, Token::empty()));
        assert!(!LabelsAPI::can_apply(&prim, Token::new("no spaces")));
        assert!(!LabelsAPI::can_apply(&stage.pseudo_root(), Token::new("style")));
    }
}
