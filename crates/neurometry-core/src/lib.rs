//! # Neurometry Core
//!
//! The data model of the Neurometry framework: neuron morphologies made of
//! a soma and tree-shaped neurites, each neurite an arena of sections.
//!
//! ## Modules
//!
//! - [`types`]: Points, segments, branch types and the branch-type filter.
//! - [`section`]: Section data and arena identifiers.
//! - [`neurite`]: Neurite construction and validation.
//! - [`soma`]: The cell body.
//! - [`morphology`]: Soma plus ordered neurites.
//! - [`traversal`]: Pre-order, post-order and breadth-first walks,
//!   ancestor walks and topological roles.
//! - [`record`]: Flat serialisable records consumed by readers.
//!
//! Everything is immutable once built. Malformed trees are rejected at
//! construction with [`MorphologyError::MalformedTree`] and never reach
//! traversal.

pub mod error;
pub mod morphology;
pub mod neurite;
pub mod record;
pub mod section;
pub mod soma;
pub mod traversal;
pub mod types;

pub use error::{MorphologyError, TreeDefect};
pub use morphology::Morphology;
pub use neurite::{Neurite, NeuriteBuilder};
pub use record::{MorphologyRecord, NeuriteRecord, SectionRecord};
pub use section::{Section, SectionId};
pub use soma::Soma;
pub use traversal::{IterOrder, SectionRef, Sections, Segments, Upstream};
pub use types::{BranchType, Point, Segment, TypeFilter, UnknownBranchType};
