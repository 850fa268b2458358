//! Projection rules classifying field paths as included or excluded.
//!
//! A projection is a single rule or an ordered list of rules (lists may
//! nest). A path is included *explicitly* when a rule's field pattern
//! matches it exactly, and *implicitly* when an ancestor is included with
//! recursion. Explicit decisions beat implicit ones; within the same class
//! the last matching rule wins, which is what makes ordered composition
//! via [`Projection::add`] meaningful for overlapping wildcard rules.

use crate::path::Path;
use serde::{Deserialize, Deserializer, Serialize};

/// A single projection rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProjection {
    /// Field pattern this rule applies to (may contain wildcards)
    pub field: Path,
    /// Whether matching paths are included or excluded
    #[serde(default = "default_include", deserialize_with = "flexible_bool")]
    pub include: bool,
    /// Whether inclusion extends to all descendants of the field
    #[serde(default, deserialize_with = "flexible_bool")]
    pub recursive: bool,
}

impl FieldProjection {
    /// Create a rule for the given field pattern
    pub fn new(field: Path, include: bool, recursive: bool) -> Self {
        Self {
            field,
            include,
            recursive,
        }
    }
}

fn default_include() -> bool {
    true
}

/// Accepts `true`/`false` as well as the 0/1 integers found in historically
/// stored configuration documents.
fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlexibleBool;

    impl serde::de::Visitor<'_> for FlexibleBool {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a boolean or 0/1 integer")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(FlexibleBool)
}

/// How a path's inclusion was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// A rule matched the path exactly
    Explicit(bool),
    /// An ancestor rule covered the path (recursive include or any exclude)
    Implicit(bool),
    /// No rule said anything about the path
    Undecided,
}

/// A projection: one rule or an ordered composition of rules
///
/// Serializes as either a single rule object or an array of projections,
/// matching the shape stored in entity metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Field(FieldProjection),
    List(Vec<Projection>),
}

impl Projection {
    /// The "all fields" default: every path included recursively
    pub fn all_fields() -> Self {
        Projection::Field(FieldProjection::new(
            Path::parse("*").unwrap_or_default(),
            true,
            true,
        ))
    }

    /// The "no fields" default: every path excluded
    pub fn no_fields() -> Self {
        Projection::Field(FieldProjection::new(
            Path::parse("*").unwrap_or_default(),
            false,
            false,
        ))
    }

    /// Compose this projection with a supplement, order-sensitively
    ///
    /// The supplement's rules are evaluated after this projection's rules,
    /// so they can only add coverage or override equally-specific earlier
    /// rules, never silently reorder them.
    pub fn add(&self, supplement: Projection) -> Projection {
        Projection::List(vec![self.clone(), supplement])
    }

    /// All rules in evaluation order, nested lists flattened
    pub fn rules(&self) -> Vec<&FieldProjection> {
        let mut out = Vec::new();
        self.collect_rules(&mut out);
        out
    }

    fn collect_rules<'a>(&'a self, out: &mut Vec<&'a FieldProjection>) {
        match self {
            Projection::Field(rule) => out.push(rule),
            Projection::List(items) => {
                for item in items {
                    item.collect_rules(out);
                }
            }
        }
    }

    /// Classify a path under this projection
    pub fn inclusion(&self, path: &Path) -> Inclusion {
        let mut explicit: Option<bool> = None;
        let mut implicit: Option<bool> = None;
        for rule in self.rules() {
            if rule.field.matches(path) {
                explicit = Some(rule.include);
            } else if rule.field.is_strict_prefix_of(path) {
                if rule.include {
                    if rule.recursive {
                        implicit = Some(true);
                    }
                } else {
                    // An excluded ancestor removes the whole subtree
                    implicit = Some(false);
                }
            }
        }
        match (explicit, implicit) {
            (Some(include), _) => Inclusion::Explicit(include),
            (None, Some(include)) => Inclusion::Implicit(include),
            (None, None) => Inclusion::Undecided,
        }
    }

    /// True if the path is included, explicitly or implicitly
    pub fn is_included(&self, path: &Path) -> bool {
        match self.inclusion(path) {
            Inclusion::Explicit(include) | Inclusion::Implicit(include) => include,
            Inclusion::Undecided => false,
        }
    }

    /// True if any rule can include a path strictly below the given one
    ///
    /// Used to decide whether a container that is not itself included must
    /// still be descended into.
    pub fn may_include_descendants(&self, path: &Path) -> bool {
        self.rules()
            .iter()
            .any(|rule| rule.include && path.is_strict_prefix_of(&rule.field))
    }

    /// True if the projection touches the path at all: the path is included
    /// or some included rule lies below it
    pub fn touches(&self, path: &Path) -> bool {
        self.is_included(path) || self.may_include_descendants(path)
    }
}
