//! File format readers producing validated morphologies.
//!
//! Supported formats:
//! - [`.swc`](swc): the standard SWC sample table

pub mod swc;

use neurometry_core::MorphologyError;
use thiserror::Error;

/// Errors during morphology file parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    FormatError { line: usize, message: String },

    #[error("No soma samples found")]
    MissingSoma,

    #[error(transparent)]
    Morphology(#[from] MorphologyError),
}
