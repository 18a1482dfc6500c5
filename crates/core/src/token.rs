//! Interned string tokens.
//!
//! Tokens are the canonical identifiers used throughout the stage model:
//! prim names, attribute names, schema names, label values. Interning makes
//! them `Copy` and makes equality/hashing a handle comparison.

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// Process-wide token registry. Interning is append-only; resolved strings
// live for the rest of the process, which is what lets `as_str` hand out
// `&'static str`.
static REGISTRY: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);

/// A `Copy` handle to an interned string.
///
/// Two tokens built from the same string compare equal and hash identically.
/// Ordering is by string value so that sorted token output is deterministic
/// and human-readable.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(Spur);

/// The attribute value type used by the stage model.
pub type TokenArray = Vec<Token>;

impl Token {
    pub fn new(s: &str) -> Self {
        Token(REGISTRY.get_or_intern(s))
    }

    pub fn empty() -> Self {
        Token::new("")
    }

    pub fn as_str(&self) -> &'static str {
        let registry: &'static ThreadedRodeo = Lazy::force(&REGISTRY);
        registry.resolve(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::empty()
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::new(s)
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?})", self.as_str())
    }
}

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Token::new(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = Token::new("semanticsLabels");
        let b = Token::new("semanticsLabels");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "semanticsLabels");
    }

    #[test]
    fn ordering_follows_string_value() {
        let mut tokens = vec![Token::new("shelf"), Token::new("book"), Token::new("case")];
        tokens.sort();
        let strs: Vec<_> = tokens.iter().map(Token::as_str).collect();
        assert_eq!(strs, ["book", "case", "shelf"]);
    }

    #[test]
    fn empty_token() {
        assert!(Token::empty().is_empty());
        assert!(!Token::new("x").is_empty());
        assert_eq!(Token::default(), Token::empty());
    }

    #[test]
    fn serde_round_trips_as_string() {
        let token = Token::new("style");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"style\"");
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
