//! Canonical tokens for the semantics-labels schema family.
//!
//! The schema vocabulary is fixed at build time. Each token is published as
//! a read-only field of [`SemanticsTokensType`]; referring to a name that is
//! not part of the vocabulary is a compile error, not a runtime lookup
//! failure.

use once_cell::sync::Lazy;
use stagegraph_core::Token;

/// The token table for the semantics-labels schemas.
///
/// External code reads this through [`SEMANTICS_TOKENS`]; the struct cannot
/// be constructed outside this crate, so the published table is the only
/// instance that ever exists.
#[non_exhaustive]
#[derive(Debug)]
pub struct SemanticsTokensType {
    /// `"semanticsLabels"` — the property namespace prefix shared by all
    /// applied instances of the labels schema.
    pub semantics_labels: Token,
    /// `"semanticsLabels:__INSTANCE_NAME__"` — the multiple-apply property
    /// template; `__INSTANCE_NAME__` is replaced by the taxonomy.
    pub semantics_labels_multiple_apply_template: Token,
    /// `"SemanticsLabelsAPI"` — the schema type name recorded on prims the
    /// schema is applied to.
    pub semantics_labels_api: Token,
}

impl SemanticsTokensType {
    fn new() -> Self {
        SemanticsTokensType {
            semantics_labels: Token::new("semanticsLabels"),
            semantics_labels_multiple_apply_template: Token::new(
                "semanticsLabels:__INSTANCE_NAME__",
            ),
            semantics_labels_api: Token::new("SemanticsLabelsAPI"),
        }
    }

    /// Every (symbolic name, token) pair in the table. The enumeration is
    /// closed: these three entries are the entire vocabulary.
    pub fn all(&self) -> [(&'static str, Token); 3] {
        [
            ("semanticsLabels", self.semantics_labels),
            (
                "semanticsLabels_MultipleApplyTemplate_",
                self.semantics_labels_multiple_apply_template,
            ),
            ("SemanticsLabelsAPI", self.semantics_labels_api),
        ]
    }

    /// Looks up a token by its symbolic name.
    pub fn get(&self, name: &str) -> Option<Token> {
        match name {
            "semanticsLabels" => Some(self.semantics_labels),
            "semanticsLabels_MultipleApplyTemplate_" => {
                Some(self.semantics_labels_multiple_apply_template)
            }
            "SemanticsLabelsAPI" => Some(self.semantics_labels_api),
            _ => None,
        }
    }
}

/// The process-wide semantics token table. Initialized on first use and
/// immutable afterwards, so it is freely shared across threads.
pub static SEMANTICS_TOKENS: Lazy<SemanticsTokensType> = Lazy::new(SemanticsTokensType::new);
