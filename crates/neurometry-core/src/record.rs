//! Flat, serialisable descriptions of a morphology.
//!
//! Readers emit these records; [`Neurite::from_records`](crate::Neurite::from_records)
//! and `Morphology::try_from` turn them into validated trees. The JSON form
//! is a direct serde image of the records.

use serde::{Deserialize, Serialize};

use crate::soma::Soma;
use crate::types::{BranchType, Point};

/// One section as produced by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Reader-assigned identifier, unique within the neurite.
    pub id: i64,
    /// Identifier of the parent section; `None` for the neurite root.
    #[serde(default)]
    pub parent: Option<i64>,
    pub branch_type: BranchType,
    pub points: Vec<Point>,
}

/// The sections of a single neurite, in reader order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuriteRecord {
    pub sections: Vec<SectionRecord>,
}

/// A whole morphology as produced by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphologyRecord {
    #[serde(default)]
    pub name: String,
    pub soma: Soma,
    #[serde(default)]
    pub neurites: Vec<NeuriteRecord>,
}
