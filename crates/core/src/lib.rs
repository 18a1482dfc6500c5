pub mod error;
pub mod logging;
pub mod path;
pub mod stage;
pub mod time;
pub mod token;

pub use error::{PathError, Result, StageError};
pub use path::PrimPath;
pub use stage::{Attribute, Prim, Stage};
pub use time::{Interval, TimeCode};
pub use token::{Token, TokenArray};
