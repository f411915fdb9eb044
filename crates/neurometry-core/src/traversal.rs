//! Section-tree traversal.
//!
//! A [`SectionRef`] pairs a borrowed [`Neurite`] with a section index, so
//! parent and child lookups stay O(1) without the sections owning each
//! other. Every iterator here holds only borrows plus its own stack or
//! queue: calling a traversal again starts a fresh, independent walk.
//!
//! Traversals assume the single-root, acyclic invariant that
//! [`Neurite`] construction enforces.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::neurite::Neurite;
use crate::section::{Section, SectionId};
use crate::types::{BranchType, Point, Segment};

/// Order in which a section tree is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterOrder {
    /// Depth-first, each section before its descendants, children in stored
    /// order. The canonical order of every per-section feature.
    #[default]
    PreOrder,
    /// Depth-first, each section after its descendants.
    PostOrder,
    /// Level by level from the root.
    BreadthFirst,
}

/// A section together with the neurite it lives in.
#[derive(Debug, Clone, Copy)]
pub struct SectionRef<'a> {
    neurite: &'a Neurite,
    id: SectionId,
}

impl PartialEq for SectionRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.neurite, other.neurite) && self.id == other.id
    }
}

impl Eq for SectionRef<'_> {}

impl<'a> SectionRef<'a> {
    #[inline]
    fn at(neurite: &'a Neurite, id: SectionId) -> Self {
        Self { neurite, id }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn neurite(&self) -> &'a Neurite {
        self.neurite
    }

    /// The underlying section data.
    pub fn section(&self) -> &'a Section {
        &self.neurite.sections[self.id.index()]
    }

    pub fn points(&self) -> &'a [Point] {
        &self.section().points
    }

    pub fn branch_type(&self) -> BranchType {
        self.section().branch_type
    }

    pub fn parent(&self) -> Option<SectionRef<'a>> {
        self.section().parent.map(|p| SectionRef::at(self.neurite, p))
    }

    /// Children in stored order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = SectionRef<'a>> + 'a {
        let neurite = self.neurite;
        self.section().children.iter().map(move |&c| SectionRef::at(neurite, c))
    }

    pub fn child_count(&self) -> usize {
        self.section().children.len()
    }

    pub fn is_root(&self) -> bool {
        self.section().parent.is_none()
    }

    /// Two or more children.
    pub fn is_bifurcation(&self) -> bool {
        self.child_count() >= 2
    }

    /// No children.
    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Consecutive point pairs, in point order.
    pub fn iter_segments(&self) -> Segments<'a> {
        Segments { windows: self.points().windows(2) }
    }

    /// From the parent up to and including the root.
    pub fn ancestors(&self) -> Upstream<'a> {
        Upstream { neurite: self.neurite, next: self.section().parent }
    }

    /// This section, then its ancestors up to the root.
    pub fn path_to_root(&self) -> Upstream<'a> {
        Upstream { neurite: self.neurite, next: Some(self.id) }
    }

    /// The subtree rooted at this section.
    pub fn iter_downstream(&self, order: IterOrder) -> Sections<'a> {
        Sections::new(self.neurite, self.id, order)
    }

    /// Number of ancestors; the neurite root has order 0.
    pub fn branch_order(&self) -> usize {
        self.ancestors().count()
    }

    /// Strahler number: 1 at leaves, growing towards the root.
    ///
    /// A section whose highest child order `i` is shared by two or more
    /// children has order `i + 1`; otherwise it inherits `i`.
    pub fn strahler_order(&self) -> usize {
        strahler_orders(self.neurite, self.id)[self.id.index()]
    }
}

/// Strahler orders of the subtree under `start`, indexed by section id.
/// Sections outside the subtree are left at 0.
fn strahler_orders(neurite: &Neurite, start: SectionId) -> Vec<usize> {
    let mut orders: Vec<usize> = vec![0; neurite.len()];
    for s in Sections::new(neurite, start, IterOrder::PostOrder) {
        let mut max = 0;
        let mut count = 0;
        for c in s.children() {
            let o = orders[c.id.index()];
            if o > max {
                max = o;
                count = 1;
            } else if o == max {
                count += 1;
            }
        }
        orders[s.id.index()] = match count {
            0 => 1,
            1 => max,
            _ => max + 1,
        };
    }
    orders
}

impl Neurite {
    pub fn root(&self) -> SectionRef<'_> {
        SectionRef::at(self, self.root)
    }

    pub fn section(&self, id: SectionId) -> Option<SectionRef<'_>> {
        (id.index() < self.sections.len()).then(|| SectionRef::at(self, id))
    }

    /// Every section of the neurite, in `order`.
    pub fn iter_sections(&self, order: IterOrder) -> Sections<'_> {
        Sections::new(self, self.root, order)
    }

    /// Sections with two or more children, in pre-order.
    pub fn bifurcations(&self) -> impl Iterator<Item = SectionRef<'_>> + '_ {
        self.iter_sections(IterOrder::PreOrder).filter(SectionRef::is_bifurcation)
    }

    /// Sections without children, in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = SectionRef<'_>> + '_ {
        self.iter_sections(IterOrder::PreOrder).filter(SectionRef::is_leaf)
    }

    /// Strahler order of every section, indexed by [`SectionId`].
    pub fn strahler_orders(&self) -> Vec<usize> {
        strahler_orders(self, self.root)
    }

    /// Every segment of every section: pre-order, then point order.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.iter_sections(IterOrder::PreOrder).flat_map(|s| s.iter_segments())
    }
}

/// Segments of one section.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    windows: std::slice::Windows<'a, Point>,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        self.windows.next().map(|w| Segment::new(w[0], w[1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}
impl FusedIterator for Segments<'_> {}

/// Walk towards the root.
#[derive(Debug, Clone)]
pub struct Upstream<'a> {
    neurite: &'a Neurite,
    next: Option<SectionId>,
}

impl<'a> Iterator for Upstream<'a> {
    type Item = SectionRef<'a>;

    fn next(&mut self) -> Option<SectionRef<'a>> {
        let id = self.next?;
        let current = SectionRef::at(self.neurite, id);
        self.next = current.section().parent;
        Some(current)
    }
}

impl FusedIterator for Upstream<'_> {}

/// Walk over a subtree in a fixed [`IterOrder`].
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    neurite: &'a Neurite,
    state: WalkState,
}

#[derive(Debug, Clone)]
enum WalkState {
    Pre(Vec<SectionId>),
    /// Sections paired with how many of their children were already expanded.
    Post(Vec<(SectionId, usize)>),
    Breadth(VecDeque<SectionId>),
}

impl<'a> Sections<'a> {
    fn new(neurite: &'a Neurite, start: SectionId, order: IterOrder) -> Self {
        let state = match order {
            IterOrder::PreOrder => WalkState::Pre(vec![start]),
            IterOrder::PostOrder => WalkState::Post(vec![(start, 0)]),
            IterOrder::BreadthFirst => WalkState::Breadth(VecDeque::from([start])),
        };
        Self { neurite, state }
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = SectionRef<'a>;

    fn next(&mut self) -> Option<SectionRef<'a>> {
        let neurite = self.neurite;
        let sections = &neurite.sections;
        let id = match &mut self.state {
            WalkState::Pre(stack) => {
                let id = stack.pop()?;
                stack.extend(sections[id.index()].children.iter().rev());
                id
            }
            WalkState::Post(stack) => loop {
                let (id, expanded) = stack.last_mut()?;
                let id = *id;
                let children = &sections[id.index()].children;
                if *expanded < children.len() {
                    let child = children[*expanded];
                    *expanded += 1;
                    stack.push((child, 0));
                } else {
                    stack.pop();
                    break id;
                }
            },
            WalkState::Breadth(queue) => {
                let id = queue.pop_front()?;
                queue.extend(sections[id.index()].children.iter());
                id
            }
        };
        Some(SectionRef::at(neurite, id))
    }
}

impl FusedIterator for Sections<'_> {}
