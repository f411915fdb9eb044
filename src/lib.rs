//! # Neurometry
//!
//! Neuron morphologies and the morphometrics computed over them.
//!
//! This crate re-exports the workspace libraries under one roof:
//!
//! - [`core`]: the data model and traversal engine.
//! - [`geometry`]: measurements, transformations and the SWC reader.
//! - [`features`]: named, type-filtered feature extraction.
//!
//! ```no_run
//! use neurometry::{get, BranchType};
//! use neurometry::geometry::parsers::swc::read_swc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cell = read_swc("cell.swc".as_ref())?;
//! let angles = get("local_bifurcation_angles", &cell, BranchType::BasalDendrite)?;
//! println!("{} bifurcations", angles.len());
//! # Ok(())
//! # }
//! ```

pub use neurometry_core as core;
pub use neurometry_features as features;
pub use neurometry_geometry as geometry;

pub use neurometry_core::{BranchType, Morphology, Neurite, Point, Soma, TypeFilter};
pub use neurometry_features::{get, get_with, ExtractOptions, Feature, FeatureError};
