//! # Neurometry Features
//!
//! Named morphometric features over whole morphologies.
//!
//! Every feature has a level. Morphology-level extractors run once and see
//! the caller's [`TypeFilter`]; neurite-level extractors run once per neurite
//! passing the filter, and their results are concatenated in morphology
//! order. Results are always a flat `Vec<f64>`.
//!
//! ```no_run
//! use neurometry_core::{BranchType, Morphology};
//!
//! # fn demo(m: &Morphology) -> Result<(), neurometry_features::FeatureError> {
//! let lengths = neurometry_features::get("section_lengths", m, BranchType::Axon)?;
//! let n = neurometry_features::get("number_of_neurites", m, neurometry_core::TypeFilter::All)?;
//! # Ok(())
//! # }
//! ```
//!
//! Batched extractors that meet degenerate geometry (a zero-length segment
//! in an angle, say) skip the element and log a warning by default; pass
//! [`ExtractOptions::abort_on_degenerate`] to [`get_with`] to fail instead.

pub mod error;
pub mod feature;
pub mod morphology;
pub mod neurite;
pub mod options;
pub mod registry;

use neurometry_core::{Morphology, TypeFilter};
use once_cell::sync::Lazy;

pub use error::FeatureError;
pub use feature::{Feature, FeatureLevel};
pub use options::{Context, DegeneratePolicy, ExtractOptions};
pub use registry::{Extractor, FeatureRegistry, MorphologyFn, NeuriteFn};

static REGISTRY: Lazy<FeatureRegistry> = Lazy::new(FeatureRegistry::builtin);

/// The process-wide registry of built-in features.
pub fn registry() -> &'static FeatureRegistry {
    &REGISTRY
}

/// Extract feature `name` with the default options.
pub fn get(
    name: &str,
    m: &Morphology,
    neurite_type: impl Into<TypeFilter>,
) -> Result<Vec<f64>, FeatureError> {
    registry().get(name, m, neurite_type)
}

pub fn get_with(
    name: &str,
    m: &Morphology,
    neurite_type: impl Into<TypeFilter>,
    options: &ExtractOptions,
) -> Result<Vec<f64>, FeatureError> {
    registry().get_with(name, m, neurite_type, options)
}

pub fn get_feature(
    feature: Feature,
    m: &Morphology,
    neurite_type: impl Into<TypeFilter>,
    options: &ExtractOptions,
) -> Result<Vec<f64>, FeatureError> {
    registry().get_feature(feature, m, neurite_type, options)
}
