//! Construction-time errors.
//!
//! A morphology that passes construction is a well-formed forest; traversal
//! and geometry never re-check these conditions.

use thiserror::Error;

/// What is wrong with a section graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeDefect {
    /// A section carries fewer than two points.
    #[error("section has {count} point(s), at least 2 required")]
    TooFewPoints { count: usize },
    /// A point has a non-finite coordinate or a negative radius.
    #[error("point {index} is not finite or has a negative radius")]
    InvalidPoint { index: usize },
    /// Two sections share an identifier.
    #[error("duplicate section identifier")]
    DuplicateId,
    /// No section lacks a parent.
    #[error("no root section")]
    NoRoot,
    /// More than one section lacks a parent.
    #[error("more than one root section")]
    MultipleRoots,
    /// A section names a parent that does not exist.
    #[error("parent section {parent} does not exist")]
    MissingParent { parent: i64 },
    /// A section cannot be reached from the root (it sits on a cycle).
    #[error("section is not reachable from the root")]
    Unreachable,
}

/// Errors raised while building a neurite, soma or morphology.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MorphologyError {
    #[error("Malformed tree at section {section}: {defect}")]
    MalformedTree { section: i64, defect: TreeDefect },

    #[error("Soma outline must contain at least one point")]
    EmptyOutline,

    #[error("Invalid soma: {0}")]
    InvalidSoma(String),
}

impl MorphologyError {
    pub(crate) fn malformed(section: i64, defect: TreeDefect) -> Self {
        MorphologyError::MalformedTree { section, defect }
    }
}
