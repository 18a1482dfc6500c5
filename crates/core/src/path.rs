//! Absolute prim paths.
//!
//! A `PrimPath` names a location in the stage hierarchy, e.g.
//! `/Grandparent/Parent/Child`. The pseudo-root is `/`. Paths are interned,
//! so a `PrimPath` is `Copy` and cheap to hash and compare.

use crate::error::PathError;
use crate::token::Token;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

const SEPARATOR: char = '/';
const ROOT: &str = "/";

/// Returns true if `s` is a legal prim or instance identifier:
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// An absolute, validated path to a prim.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimPath(Token);

impl PrimPath {
    /// The pseudo-root path `/`.
    pub fn root() -> Self {
        PrimPath(Token::new(ROOT))
    }

    /// Parses an absolute path. Every segment must be a valid identifier.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        if !s.starts_with(SEPARATOR) {
            return Err(PathError::NotAbsolute(s.to_string()));
        }
        if s == ROOT {
            return Ok(Self::root());
        }
        if s.ends_with(SEPARATOR) {
            return Err(PathError::TrailingSeparator(s.to_string()));
        }
        for segment in s[1..].split(SEPARATOR) {
            if !is_valid_identifier(segment) {
                return Err(PathError::InvalidIdentifier {
                    path: s.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(PrimPath(Token::new(s)))
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }

    pub fn is_root(&self) -> bool {
        self.as_str() == ROOT
    }

    /// The last path component; the empty token for the pseudo-root.
    pub fn name(&self) -> Token {
        match self.as_str().rfind(SEPARATOR) {
            Some(idx) => Token::new(&self.as_str()[idx + 1..]),
            None => Token::empty(),
        }
    }

    /// The parent path; `None` for the pseudo-root.
    pub fn parent(&self) -> Option<PrimPath> {
        if self.is_root() {
            return None;
        }
        let s = self.as_str();
        let idx = s.rfind(SEPARATOR).unwrap_or(0);
        if idx == 0 {
            Some(Self::root())
        } else {
            Some(PrimPath(Token::new(&s[..idx])))
        }
    }

    /// Appends a child identifier.
    pub fn append(&self, child: Token) -> Result<PrimPath, PathError> {
        if !is_valid_identifier(child.as_str()) {
            return Err(PathError::InvalidIdentifier {
                path: self.as_str().to_string(),
                segment: child.as_str().to_string(),
            });
        }
        let joined = if self.is_root() {
            format!("/{}", child)
        } else {
            format!("{}/{}", self.as_str(), child)
        };
        Ok(PrimPath(Token::new(&joined)))
    }

    /// Iterates over this path and each of its ancestors, nearest first,
    /// stopping before the pseudo-root. The pseudo-root itself yields
    /// nothing.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: if self.is_root() { None } else { Some(*self) },
        }
    }
}

/// Iterator returned by [`PrimPath::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<PrimPath>,
}

impl Iterator for Ancestors {
    type Item = PrimPath;

    fn next(&mut self) -> Option<PrimPath> {
        let current = self.next.take()?;
        self.next = current.parent().filter(|p| !p.is_root());
        Some(current)
    }
}

impl PartialOrd for PrimPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrimPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimPath({:?})", self.as_str())
    }
}

impl Serialize for PrimPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PrimPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PrimPath::parse(&s).map_err(serde::de::Error::custom)
    }
}
