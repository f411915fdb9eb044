use neurometry_geometry::GeometryError;
use thiserror::Error;

/// Errors from feature lookup and extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("Feature '{0}' is already registered")]
    DuplicateFeature(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
