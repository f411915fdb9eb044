use neurometry_core::SectionId;
use thiserror::Error;

/// Failures of geometric measurements on well-formed trees.
///
/// Lengths and distances are total; only quantities that divide by a length
/// or normalise a direction can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Degenerate geometry in section {section}: {what}")]
    DegenerateGeometry {
        section: SectionId,
        what: &'static str,
    },
}

impl GeometryError {
    pub(crate) fn degenerate(section: SectionId, what: &'static str) -> Self {
        GeometryError::DegenerateGeometry { section, what }
    }

    /// Section the failing measurement was taken on.
    pub fn section(&self) -> SectionId {
        match self {
            GeometryError::DegenerateGeometry { section, .. } => *section,
        }
    }
}
