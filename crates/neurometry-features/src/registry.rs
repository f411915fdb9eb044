//! Name-keyed dispatch from feature names to extractors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use neurometry_core::{Morphology, Neurite, TypeFilter};

use crate::error::FeatureError;
use crate::feature::{Feature, FeatureLevel};
use crate::options::{Context, ExtractOptions};
use crate::{morphology, neurite};

pub type NeuriteFn =
    Arc<dyn Fn(&Neurite, &Context<'_>) -> Result<Vec<f64>, FeatureError> + Send + Sync>;

pub type MorphologyFn = Arc<
    dyn Fn(&Morphology, TypeFilter, &Context<'_>) -> Result<Vec<f64>, FeatureError> + Send + Sync,
>;

/// A feature implementation, tagged with the level it runs at.
#[derive(Clone)]
pub enum Extractor {
    /// Called once per morphology with the caller's filter.
    Morphology(MorphologyFn),
    /// Called once per neurite passing the filter.
    Neurite(NeuriteFn),
}

impl Extractor {
    pub fn neurite<F>(f: F) -> Self
    where
        F: Fn(&Neurite, &Context<'_>) -> Result<Vec<f64>, FeatureError> + Send + Sync + 'static,
    {
        Extractor::Neurite(Arc::new(f))
    }

    pub fn morphology<F>(f: F) -> Self
    where
        F: Fn(&Morphology, TypeFilter, &Context<'_>) -> Result<Vec<f64>, FeatureError>
            + Send
            + Sync
            + 'static,
    {
        Extractor::Morphology(Arc::new(f))
    }

    pub fn level(&self) -> FeatureLevel {
        match self {
            Extractor::Morphology(_) => FeatureLevel::Morphology,
            Extractor::Neurite(_) => FeatureLevel::Neurite,
        }
    }

    /// Run against `m`, honouring the level's dispatch rule.
    pub fn extract(
        &self,
        m: &Morphology,
        filter: TypeFilter,
        options: &ExtractOptions,
    ) -> Result<Vec<f64>, FeatureError> {
        let ctx = Context::new(m.soma(), options);
        match self {
            Extractor::Morphology(f) => f(m, filter, &ctx),
            Extractor::Neurite(f) => {
                let mut values = Vec::new();
                for n in m.neurites_of(filter) {
                    values.extend(f(n, &ctx)?);
                }
                Ok(values)
            }
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extractor::{:?}", self.level())
    }
}

impl Feature {
    /// The built-in implementation of this feature.
    pub fn extractor(self) -> Extractor {
        use Feature::*;
        match self {
            NumberOfSections => Extractor::neurite(neurite::number_of_sections),
            NumberOfSegments => Extractor::neurite(neurite::number_of_segments),
            NumberOfBifurcations => Extractor::neurite(neurite::number_of_bifurcations),
            NumberOfLeaves => Extractor::neurite(neurite::number_of_leaves),
            SectionLengths => Extractor::neurite(neurite::section_lengths),
            SegmentLengths => Extractor::neurite(neurite::segment_lengths),
            LocalBifurcationAngles => Extractor::neurite(neurite::local_bifurcation_angles),
            RemoteBifurcationAngles => Extractor::neurite(neurite::remote_bifurcation_angles),
            SectionPathDistances => Extractor::neurite(neurite::section_path_distances),
            SectionRadialDistances => Extractor::neurite(neurite::section_radial_distances),
            SegmentRadialDistances => Extractor::neurite(neurite::segment_radial_distances),
            SectionBranchOrders => Extractor::neurite(neurite::section_branch_orders),
            SectionStrahlerOrders => Extractor::neurite(neurite::section_strahler_orders),
            SectionEndDistances => Extractor::neurite(neurite::section_end_distances),
            SectionTortuosity => Extractor::neurite(neurite::section_tortuosity),
            SectionAreas => Extractor::neurite(neurite::section_areas),
            SectionVolumes => Extractor::neurite(neurite::section_volumes),
            SectionMeanRadii => Extractor::neurite(neurite::section_mean_radii),
            SectionMeanderAngles => Extractor::neurite(neurite::section_meander_angles),
            SegmentTaperRates => Extractor::neurite(neurite::segment_taper_rates),
            SectionTaperRates => Extractor::neurite(neurite::section_taper_rates),
            SegmentMeanRadii => Extractor::neurite(neurite::segment_mean_radii),
            SegmentAreas => Extractor::neurite(neurite::segment_areas),
            SegmentVolumes => Extractor::neurite(neurite::segment_volumes),
            TotalLength => Extractor::neurite(neurite::total_length),
            TotalArea => Extractor::neurite(neurite::total_area),
            TotalVolume => Extractor::neurite(neurite::total_volume),
            NumberOfNeurites => Extractor::morphology(morphology::number_of_neurites),
            NumberOfSectionsPerNeurite => {
                Extractor::morphology(morphology::number_of_sections_per_neurite)
            }
            TotalLengthPerNeurite => Extractor::morphology(morphology::total_length_per_neurite),
            SomaRadius => Extractor::morphology(morphology::soma_radius),
            SomaSurfaceArea => Extractor::morphology(morphology::soma_surface_area),
        }
    }
}

/// Built-in features plus any extensions registered on this instance.
///
/// The process-wide instance behind [`registry`](crate::registry) only ever
/// holds the built-ins; build an owned registry to add extensions.
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    builtin: Vec<Extractor>,
    extensions: BTreeMap<String, Extractor>,
}

impl FeatureRegistry {
    pub fn builtin() -> Self {
        Self {
            builtin: Feature::ALL.iter().map(|f| f.extractor()).collect(),
            extensions: BTreeMap::new(),
        }
    }

    /// Add an extension under `name`. Built-in and already registered names
    /// are rejected.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        extractor: Extractor,
    ) -> Result<(), FeatureError> {
        let name = name.into();
        if name.parse::<Feature>().is_ok() || self.extensions.contains_key(&name) {
            return Err(FeatureError::DuplicateFeature(name));
        }
        log::debug!("Registered {} feature '{}'", extractor.level(), name);
        self.extensions.insert(name, extractor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Extractor, FeatureError> {
        if let Ok(feature) = name.parse::<Feature>() {
            return Ok(&self.builtin[feature as usize]);
        }
        self.extensions
            .get(name)
            .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Built-in names in declaration order, then extensions sorted by name.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        Feature::ALL
            .iter()
            .map(|f| f.name())
            .chain(self.extensions.keys().map(String::as_str))
    }

    pub fn get(
        &self,
        name: &str,
        m: &Morphology,
        filter: impl Into<TypeFilter>,
    ) -> Result<Vec<f64>, FeatureError> {
        self.get_with(name, m, filter, &ExtractOptions::default())
    }

    pub fn get_with(
        &self,
        name: &str,
        m: &Morphology,
        filter: impl Into<TypeFilter>,
        options: &ExtractOptions,
    ) -> Result<Vec<f64>, FeatureError> {
        let filter = filter.into();
        let extractor = self.lookup(name)?;
        log::debug!("Extracting '{}' from '{}' ({})", name, m.name(), filter);
        extractor.extract(m, filter, options)
    }

    pub fn get_feature(
        &self,
        feature: Feature,
        m: &Morphology,
        filter: impl Into<TypeFilter>,
        options: &ExtractOptions,
    ) -> Result<Vec<f64>, FeatureError> {
        self.builtin[feature as usize].extract(m, filter.into(), options)
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
