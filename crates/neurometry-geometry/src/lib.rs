//! # Neurometry Geometry
//!
//! Geometric measurements over the Neurometry data model. This crate provides:
//!
//! - **Point math** ([`morphmath`]): distances, angles, frustum areas and
//!   volumes on plain points and segments.
//! - **Section measurements** ([`section`]): section length, path distance
//!   to the neurite root, radial distance to the soma, tortuosity and friends.
//! - **Bifurcation angles** ([`bifurcation`]): local and remote angles at
//!   two-way forks.
//! - **Transformations** ([`transform`]): scale, rotate and translate whole
//!   morphologies.
//! - **File parsers** ([`parsers`]): build morphologies from `.swc` files.
//!
//! All measurements are pure functions of immutable input. Angles are
//! computed with the arccos of normalised dot products; a zero-length
//! direction is a [`GeometryError::DegenerateGeometry`], never a NaN.

pub mod bifurcation;
pub mod error;
pub mod morphmath;
pub mod parsers;
pub mod section;
pub mod transform;

pub use bifurcation::{local_bifurcation_angle, remote_bifurcation_angle};
pub use error::GeometryError;
pub use morphmath::segment_length;
pub use section::{path_distance, radial_distance, section_length, section_radial_distance};
