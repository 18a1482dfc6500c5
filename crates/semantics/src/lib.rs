//! Semantics labels for stage prims.
//!
//! Prims are labeled per taxonomy ("style", "category", ...) through the
//! multi-apply [`LabelsAPI`] schema; labels on an ancestor apply to all of
//! its descendants. [`LabelsQuery`] answers direct and inherited label
//! queries for one taxonomy at a time code or over an interval, with
//! per-path caching.

pub mod error;
pub mod labels_api;
pub mod query;
mod sampling;
pub mod tokens;

pub use error::{Result, SemanticsError};
pub use labels_api::LabelsAPI;
pub use query::{LabelsQuery, QueryTime};
pub use tokens::{SEMANTICS_TOKENS, SemanticsTokensType};
