//! Neurites: rooted section trees stored as an arena.
//!
//! Two construction paths exist. [`NeuriteBuilder`] grows a tree one child
//! at a time, so its topology is valid by construction. [`Neurite::from_records`]
//! accepts the flat output of a reader and checks that the parent links form
//! a single rooted tree before anything else can see it.

use std::collections::{HashMap, VecDeque};

use crate::error::{MorphologyError, TreeDefect};
use crate::record::SectionRecord;
use crate::section::{Section, SectionId};
use crate::types::{BranchType, Point};

/// One rooted tree of sections extending from the soma.
#[derive(Debug, Clone, PartialEq)]
pub struct Neurite {
    pub(crate) sections: Vec<Section>,
    pub(crate) root: SectionId,
}

impl Neurite {
    /// Start a neurite from its root section.
    pub fn builder(
        points: Vec<Point>,
        branch_type: BranchType,
    ) -> Result<NeuriteBuilder, MorphologyError> {
        check_points(0, &points)?;
        Ok(NeuriteBuilder {
            sections: vec![Section {
                id: SectionId(0),
                points,
                branch_type,
                parent: None,
                children: Vec::new(),
            }],
        })
    }

    /// Build a neurite from flat reader records.
    ///
    /// Children are attached in record order. Fails with
    /// [`MorphologyError::MalformedTree`] if any section has fewer than two
    /// valid points, identifiers repeat, there is not exactly one root, a
    /// parent is missing, or some section is not reachable from the root.
    pub fn from_records(records: Vec<SectionRecord>) -> Result<Self, MorphologyError> {
        let mut index_of: HashMap<i64, usize> = HashMap::with_capacity(records.len());
        for (idx, rec) in records.iter().enumerate() {
            check_points(rec.id, &rec.points)?;
            if index_of.insert(rec.id, idx).is_some() {
                return Err(MorphologyError::malformed(rec.id, TreeDefect::DuplicateId));
            }
        }

        let mut root = None;
        let mut parents = Vec::with_capacity(records.len());
        for rec in &records {
            let parent = match rec.parent {
                None => {
                    if root.is_some() {
                        return Err(MorphologyError::malformed(rec.id, TreeDefect::MultipleRoots));
                    }
                    root = Some(SectionId(index_of[&rec.id]));
                    None
                }
                Some(pid) => match index_of.get(&pid) {
                    Some(&pidx) => Some(SectionId(pidx)),
                    None => {
                        return Err(MorphologyError::malformed(
                            rec.id,
                            TreeDefect::MissingParent { parent: pid },
                        ))
                    }
                },
            };
            parents.push(parent);
        }
        let root = root.ok_or(MorphologyError::malformed(-1, TreeDefect::NoRoot))?;

        let mut children: Vec<Vec<SectionId>> = vec![Vec::new(); records.len()];
        for (idx, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[p.index()].push(SectionId(idx));
            }
        }

        // With one root and one parent per section, anything the root cannot
        // reach lies on a cycle.
        let mut seen = vec![false; records.len()];
        let mut queue = VecDeque::from([root]);
        seen[root.index()] = true;
        while let Some(id) = queue.pop_front() {
            for &c in &children[id.index()] {
                if !seen[c.index()] {
                    seen[c.index()] = true;
                    queue.push_back(c);
                }
            }
        }
        if let Some(idx) = seen.iter().position(|s| !s) {
            return Err(MorphologyError::malformed(records[idx].id, TreeDefect::Unreachable));
        }

        let sections = records
            .into_iter()
            .zip(parents)
            .zip(children)
            .enumerate()
            .map(|(idx, ((rec, parent), children))| Section {
                id: SectionId(idx),
                points: rec.points,
                branch_type: rec.branch_type,
                parent,
                children,
            })
            .collect::<Vec<_>>();

        log::debug!("Built neurite with {} sections", sections.len());
        Ok(Self { sections, root })
    }

    /// Aggregate type: the root section's type.
    pub fn branch_type(&self) -> BranchType {
        self.sections[self.root.index()].branch_type
    }

    pub fn root_id(&self) -> SectionId {
        self.root
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false: a neurite has at least its root.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Raw arena access.
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    /// A copy with every point passed through `f`; topology is untouched.
    pub fn map_points<F>(&self, mut f: F) -> Neurite
    where
        F: FnMut(&Point) -> Point,
    {
        let sections = self
            .sections
            .iter()
            .map(|s| Section {
                points: s.points.iter().map(&mut f).collect(),
                ..s.clone()
            })
            .collect();
        Neurite { sections, root: self.root }
    }
}

/// Incremental neurite construction.
#[derive(Debug, Clone)]
pub struct NeuriteBuilder {
    sections: Vec<Section>,
}

impl NeuriteBuilder {
    pub fn root_id(&self) -> SectionId {
        SectionId(0)
    }

    /// Attach a new section under `parent`; children keep insertion order.
    pub fn child(
        &mut self,
        parent: SectionId,
        points: Vec<Point>,
        branch_type: BranchType,
    ) -> Result<SectionId, MorphologyError> {
        let id = SectionId(self.sections.len());
        check_points(id.index() as i64, &points)?;
        let parent_section = self.sections.get_mut(parent.index()).ok_or_else(|| {
            MorphologyError::malformed(
                id.index() as i64,
                TreeDefect::MissingParent { parent: parent.index() as i64 },
            )
        })?;
        parent_section.children.push(id);
        self.sections.push(Section {
            id,
            points,
            branch_type,
            parent: Some(parent),
            children: Vec::new(),
        });
        Ok(id)
    }

    pub fn build(self) -> Neurite {
        Neurite { sections: self.sections, root: SectionId(0) }
    }
}

fn check_points(section: i64, points: &[Point]) -> Result<(), MorphologyError> {
    if points.len() < 2 {
        return Err(MorphologyError::malformed(
            section,
            TreeDefect::TooFewPoints { count: points.len() },
        ));
    }
    if let Some(index) = points.iter().position(|p| !p.is_valid()) {
        return Err(MorphologyError::malformed(section, TreeDefect::InvalidPoint { index }));
    }
    Ok(())
}
