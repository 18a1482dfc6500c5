use crate::path::PrimPath;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("path '{0}' is not absolute")]
    NotAbsolute(String),
    #[error("path '{path}' contains invalid identifier '{segment}'")]
    InvalidIdentifier { path: String, segment: String },
    #[error("path '{0}' has a trailing separator")]
    TrailingSeparator(String),
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("no prim exists at {0}")]
    MissingPrim(PrimPath),
    #[error("cannot author on the pseudo-root")]
    PseudoRoot,
}

pub type Result<T> = std::result::Result<T, StageError>;
