//! Morphology-level extractors.
//!
//! These see the whole morphology and the caller's type filter, and decide
//! for themselves how the filter applies.

use neurometry_core::{Morphology, TypeFilter};

use crate::error::FeatureError;
use crate::neurite;
use crate::options::Context;

type FeatureResult = Result<Vec<f64>, FeatureError>;

pub fn number_of_neurites(m: &Morphology, filter: TypeFilter, _: &Context<'_>) -> FeatureResult {
    Ok(vec![m.neurites_of(filter).count() as f64])
}

pub fn number_of_sections_per_neurite(
    m: &Morphology,
    filter: TypeFilter,
    _: &Context<'_>,
) -> FeatureResult {
    Ok(m.neurites_of(filter).map(|n| n.len() as f64).collect())
}

pub fn total_length_per_neurite(
    m: &Morphology,
    filter: TypeFilter,
    ctx: &Context<'_>,
) -> FeatureResult {
    let mut values = Vec::new();
    for n in m.neurites_of(filter) {
        values.extend(neurite::total_length(n, ctx)?);
    }
    Ok(values)
}

pub fn soma_radius(m: &Morphology, _: TypeFilter, _: &Context<'_>) -> FeatureResult {
    Ok(vec![m.soma().radius()])
}

pub fn soma_surface_area(m: &Morphology, _: TypeFilter, _: &Context<'_>) -> FeatureResult {
    Ok(vec![m.soma().surface_area()])
}
