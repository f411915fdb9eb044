//! Sections: the nodes of a neurite's tree.

use serde::{Deserialize, Serialize};

use crate::types::{BranchType, Point};

/// Index of a section inside its neurite's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub usize);

impl SectionId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unbranched run of points between two branch or end points.
///
/// Parent and child links are arena indices owned by the enclosing
/// [`Neurite`](crate::Neurite); a section on its own cannot be walked.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub(crate) id: SectionId,
    pub(crate) points: Vec<Point>,
    pub(crate) branch_type: BranchType,
    pub(crate) parent: Option<SectionId>,
    pub(crate) children: Vec<SectionId>,
}

impl Section {
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Points in order; always at least two.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first_point(&self) -> Point {
        self.points[0]
    }

    pub fn last_point(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn branch_type(&self) -> BranchType {
        self.branch_type
    }

    pub fn parent_id(&self) -> Option<SectionId> {
        self.parent
    }

    pub fn child_ids(&self) -> &[SectionId] {
        &self.children
    }
}
