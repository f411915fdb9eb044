//! Core value types shared across the Neurometry framework.
//!
//! Points and segments are the atomic geometric units of a morphology;
//! branch types tag sections and neurites and double as filter keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A sample of a morphology: a 3D position plus the local radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Local radius of the neurite at this position (µm).
    pub radius: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self { x, y, z, radius }
    }

    /// Position as a plain array, the form the geometry crate consumes.
    #[inline]
    pub const fn xyz(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// All four components finite and the radius non-negative.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
            && self.radius.is_finite()
            && self.radius >= 0.0
    }
}

impl From<[f64; 4]> for Point {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Two consecutive points of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Structural classification of a section or neurite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchType {
    Soma,
    Axon,
    BasalDendrite,
    ApicalDendrite,
    Undefined,
}

impl BranchType {
    /// Every tag, in SWC code order.
    pub const ALL: [BranchType; 5] = [
        BranchType::Soma,
        BranchType::Axon,
        BranchType::BasalDendrite,
        BranchType::ApicalDendrite,
        BranchType::Undefined,
    ];

    /// Map a standard SWC structure identifier to a branch type.
    ///
    /// Codes outside 1..=4 (custom or unspecified) become `Undefined`.
    pub const fn from_swc_code(code: i64) -> Self {
        match code {
            1 => BranchType::Soma,
            2 => BranchType::Axon,
            3 => BranchType::BasalDendrite,
            4 => BranchType::ApicalDendrite,
            _ => BranchType::Undefined,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            BranchType::Soma => "soma",
            BranchType::Axon => "axon",
            BranchType::BasalDendrite => "basal_dendrite",
            BranchType::ApicalDendrite => "apical_dendrite",
            BranchType::Undefined => "undefined",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchType {
    type Err = UnknownBranchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBranchType(s.to_string()))
    }
}

/// Returned when a string names no branch type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown branch type '{0}'")]
pub struct UnknownBranchType(pub String);

/// Branch-type selector used by feature extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    /// Matches every branch type.
    #[default]
    All,
    Only(BranchType),
}

impl TypeFilter {
    #[inline]
    pub fn matches(&self, branch_type: BranchType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == branch_type,
        }
    }
}

impl From<BranchType> for TypeFilter {
    fn from(t: BranchType) -> Self {
        TypeFilter::Only(t)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => t.fmt(f),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownBranchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swc_codes() {
        assert_eq!(BranchType::from_swc_code(1), BranchType::Soma);
        assert_eq!(BranchType::from_swc_code(2), BranchType::Axon);
        assert_eq!(BranchType::from_swc_code(3), BranchType::BasalDendrite);
        assert_eq!(BranchType::from_swc_code(4), BranchType::ApicalDendrite);
        assert_eq!(BranchType::from_swc_code(7), BranchType::Undefined);
        assert_eq!(BranchType::from_swc_code(0), BranchType::Undefined);
    }

    #[test]
    fn test_filter_matching() {
        assert!(TypeFilter::All.matches(BranchType::Axon));
        assert!(TypeFilter::All.matches(BranchType::Undefined));
        assert!(TypeFilter::from(BranchType::Axon).matches(BranchType::Axon));
        assert!(!TypeFilter::from(BranchType::Axon).matches(BranchType::BasalDendrite));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "apical_dendrite".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(BranchType::ApicalDendrite)
        );
        assert!("dendrite".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_filter_serde_as_string() {
        let json = serde_json::to_string(&TypeFilter::Only(BranchType::BasalDendrite)).unwrap();
        assert_eq!(json, "\"basal_dendrite\"");
        let back: TypeFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, TypeFilter::All);
    }

    #[test]
    fn test_point_validity() {
        assert!(Point::new(0.0, 1.0, 2.0, 0.5).is_valid());
        assert!(!Point::new(f64::NAN, 1.0, 2.0, 0.5).is_valid());
        assert!(!Point::new(0.0, 1.0, 2.0, -0.1).is_valid());
    }
}
