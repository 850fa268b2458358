//! Field paths for addressing nodes in a document tree.
//!
//! A path is an ordered sequence of segments: field names, array indices,
//! or the `*` wildcard matching any single segment. Paths render to and
//! parse from dot notation (`sites.0.siteType`, `sites.*.siteType`).

use crate::errors::{DocWatchError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One segment of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A named object field
    Field(String),
    /// A concrete array index
    Index(usize),
    /// Wildcard matching any single segment
    Any,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "{}", i),
            PathSegment::Any => write!(f, "*"),
        }
    }
}

/// An immutable field path
///
/// Equality and prefix containment are the primary operations; ordering is
/// provided only so paths can key deterministic collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path addressing the document root
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Build a path from pre-constructed segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse a dot-notation path string
    ///
    /// Numeric segments parse as array indices, `*` as the wildcard, and
    /// everything else as a field name.
    ///
    /// # Errors
    ///
    /// Returns `DocWatchError::PathParse` if the string is empty or contains
    /// an empty segment (`a..b`).
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(DocWatchError::PathParse {
                path: s.to_string(),
                reason: "empty path".to_string(),
            });
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(DocWatchError::PathParse {
                    path: s.to_string(),
                    reason: "empty segment".to_string(),
                });
            }
            if part == "*" {
                segments.push(PathSegment::Any);
            } else if let Ok(index) = part.parse::<usize>() {
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Field(part.to_string()));
            }
        }
        Ok(Self { segments })
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of this path
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The final segment, if any
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path with the final segment removed
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Extend with a single segment
    pub fn child(&self, segment: PathSegment) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Extend with a named field segment
    pub fn child_field(&self, name: &str) -> Path {
        self.child(PathSegment::Field(name.to_string()))
    }

    /// Extend with an array index segment
    pub fn child_index(&self, index: usize) -> Path {
        self.child(PathSegment::Index(index))
    }

    /// Concatenate another path onto this one
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// True if this path matches `other` exactly
    ///
    /// A wildcard segment on either side matches any single segment of the
    /// other.
    pub fn matches(&self, other: &Path) -> bool {
        self.segments.len() == other.segments.len() && self.is_prefix_of(other)
    }

    /// True if this path is a prefix of `other`
    ///
    /// Wildcard segments match any single segment on the other side. Every
    /// path is a prefix of itself; the root path is a prefix of all.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        if self.segments.len() > other.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(left, right)| segment_matches(left, right))
    }

    /// True if this path is a strict prefix of `other` (shorter, matching)
    pub fn is_strict_prefix_of(&self, other: &Path) -> bool {
        self.segments.len() < other.segments.len() && self.is_prefix_of(other)
    }
}

fn segment_matches(left: &PathSegment, right: &PathSegment) -> bool {
    matches!(left, PathSegment::Any) || matches!(right, PathSegment::Any) || left == right
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = DocWatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(D::Error::custom)
    }
}

/// Resolve a concrete path against a document tree
///
/// Returns the node addressed by the path, or `None` if any segment is
/// absent. Wildcard segments never resolve (they address a set of nodes,
/// not one).
pub fn resolve<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut node = doc;
    for segment in path.segments() {
        node = match segment {
            PathSegment::Field(name) => node.as_object()?.get(name)?,
            PathSegment::Index(i) => node.as_array()?.get(*i)?,
            PathSegment::Any => return None,
        };
    }
    Some(node)
}
