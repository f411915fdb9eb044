//! Extraction options and the per-call context handed to extractors.

use neurometry_core::Soma;
use neurometry_geometry::GeometryError;
use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// What a batched extraction does when one element's geometry is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Drop the offending element, log it, and keep going.
    #[default]
    Skip,
    /// Fail the whole extraction with the element's error.
    Abort,
}

/// Knobs for a single extraction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    #[serde(default)]
    pub degenerate_geometry: DegeneratePolicy,
}

impl ExtractOptions {
    pub fn abort_on_degenerate() -> Self {
        Self { degenerate_geometry: DegeneratePolicy::Abort }
    }
}

/// Everything an extractor may consult besides the entity it measures.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Origin of radial distances.
    pub soma: &'a Soma,
    pub options: &'a ExtractOptions,
}

impl<'a> Context<'a> {
    pub fn new(soma: &'a Soma, options: &'a ExtractOptions) -> Self {
        Self { soma, options }
    }

    /// Collect per-element results, applying the degenerate-geometry policy.
    pub fn resolve<I>(&self, items: I) -> Result<Vec<f64>, FeatureError>
    where
        I: IntoIterator<Item = Result<f64, GeometryError>>,
    {
        let mut values = Vec::new();
        for item in items {
            match item {
                Ok(v) => values.push(v),
                Err(e) => match self.options.degenerate_geometry {
                    DegeneratePolicy::Skip => log::warn!("Skipping element: {}", e),
                    DegeneratePolicy::Abort => return Err(e.into()),
                },
            }
        }
        Ok(values)
    }
}
