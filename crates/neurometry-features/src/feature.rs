//! The closed set of built-in features.

use std::fmt;
use std::str::FromStr;

use crate::error::FeatureError;

/// Whether a feature runs once per morphology or once per selected neurite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureLevel {
    Morphology,
    Neurite,
}

impl fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureLevel::Morphology => f.write_str("morphology"),
            FeatureLevel::Neurite => f.write_str("neurite"),
        }
    }
}

macro_rules! features {
    ($( $variant:ident => $name:literal, $level:ident, $doc:literal; )+) => {
        /// Built-in feature identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Feature {
            $( #[doc = $doc] $variant, )+
        }

        impl Feature {
            /// Every built-in, in declaration order.
            pub const ALL: &'static [Feature] = &[ $( Feature::$variant, )+ ];

            /// String key used by [`get`](crate::get).
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Feature::$variant => $name, )+
                }
            }

            pub const fn level(&self) -> FeatureLevel {
                match self {
                    $( Feature::$variant => FeatureLevel::$level, )+
                }
            }

            pub const fn description(&self) -> &'static str {
                match self {
                    $( Feature::$variant => $doc, )+
                }
            }
        }
    };
}

features! {
    NumberOfSections => "number_of_sections", Neurite,
        "Number of sections in each neurite.";
    NumberOfSegments => "number_of_segments", Neurite,
        "Number of segments in each neurite.";
    NumberOfBifurcations => "number_of_bifurcations", Neurite,
        "Number of sections with two or more children in each neurite.";
    NumberOfLeaves => "number_of_leaves", Neurite,
        "Number of terminal sections in each neurite.";
    SectionLengths => "section_lengths", Neurite,
        "Length of every section.";
    SegmentLengths => "segment_lengths", Neurite,
        "Length of every segment, section by section.";
    LocalBifurcationAngles => "local_bifurcation_angles", Neurite,
        "Angle between the first segments of the children at each two-way fork.";
    RemoteBifurcationAngles => "remote_bifurcation_angles", Neurite,
        "Angle between the child subtrees' terminal points at each two-way fork.";
    SectionPathDistances => "section_path_distances", Neurite,
        "Path length from the neurite root to the end of every section.";
    SectionRadialDistances => "section_radial_distances", Neurite,
        "Distance from the soma centre to the end of every section.";
    SegmentRadialDistances => "segment_radial_distances", Neurite,
        "Distance from the soma centre to every segment midpoint.";
    SectionBranchOrders => "section_branch_orders", Neurite,
        "Number of ancestors of every section.";
    SectionStrahlerOrders => "section_strahler_orders", Neurite,
        "Strahler order of every section.";
    SectionEndDistances => "section_end_distances", Neurite,
        "Distance between the end points of every section.";
    SectionTortuosity => "section_tortuosity", Neurite,
        "Path length over end-to-end distance of every section.";
    SectionAreas => "section_areas", Neurite,
        "Lateral surface area of every section.";
    SectionVolumes => "section_volumes", Neurite,
        "Volume of every section.";
    SectionMeanRadii => "section_mean_radii", Neurite,
        "Length-weighted mean radius of every section.";
    SectionMeanderAngles => "section_meander_angles", Neurite,
        "Angle at every interior point of every section.";
    SegmentTaperRates => "segment_taper_rates", Neurite,
        "Diameter change per unit length of every segment.";
    SectionTaperRates => "section_taper_rates", Neurite,
        "Slope of a linear fit of diameter against path distance along every section.";
    SegmentMeanRadii => "segment_mean_radii", Neurite,
        "Mean of the end radii of every segment.";
    SegmentAreas => "segment_areas", Neurite,
        "Lateral surface area of every segment.";
    SegmentVolumes => "segment_volumes", Neurite,
        "Volume of every segment.";
    TotalLength => "total_length", Neurite,
        "Summed section length of each neurite.";
    TotalArea => "total_area", Neurite,
        "Summed section area of each neurite.";
    TotalVolume => "total_volume", Neurite,
        "Summed section volume of each neurite.";
    NumberOfNeurites => "number_of_neurites", Morphology,
        "Number of neurites passing the type filter.";
    NumberOfSectionsPerNeurite => "number_of_sections_per_neurite", Morphology,
        "Section count of every neurite passing the type filter.";
    TotalLengthPerNeurite => "total_length_per_neurite", Morphology,
        "Total length of every neurite passing the type filter.";
    SomaRadius => "soma_radius", Morphology,
        "Radius of the soma.";
    SomaSurfaceArea => "soma_surface_area", Morphology,
        "Surface area of the soma sphere.";
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| FeatureError::UnknownFeature(s.to_string()))
    }
}
