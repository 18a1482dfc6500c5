use stagegraph_core::{Interval, PrimPath, StageError, Token};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemanticsError {
    #[error("taxonomy must not be empty")]
    EmptyTaxonomy,
    #[error("interval {0} is empty")]
    EmptyInterval(Interval),
    #[error("'{0}' is not a valid taxonomy instance name")]
    InvalidTaxonomy(Token),
    #[error("LabelsAPI '{taxonomy}' is not applied at {path}")]
    UnappliedSchema { path: PrimPath, taxonomy: Token },
    #[error("cannot apply LabelsAPI to the pseudo-root")]
    PseudoRoot,
    #[error(transparent)]
    Stage(#[from] StageError),
}

pub type Result<T> = std::result::Result<T, SemanticsError>;
