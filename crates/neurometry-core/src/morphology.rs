//! Whole morphologies: a soma plus an ordered collection of neurites.

use crate::error::MorphologyError;
use crate::neurite::Neurite;
use crate::record::{MorphologyRecord, NeuriteRecord, SectionRecord};
use crate::soma::Soma;
use crate::types::{Point, TypeFilter};

/// A soma and its neurites; neurite order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Morphology {
    name: String,
    soma: Soma,
    neurites: Vec<Neurite>,
}

impl Morphology {
    pub fn new(name: impl Into<String>, soma: Soma, neurites: Vec<Neurite>) -> Self {
        Self { name: name.into(), soma, neurites }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn soma(&self) -> &Soma {
        &self.soma
    }

    pub fn neurites(&self) -> &[Neurite] {
        &self.neurites
    }

    /// Neurites whose aggregate type passes `filter`, in morphology order.
    pub fn neurites_of(&self, filter: TypeFilter) -> impl Iterator<Item = &Neurite> + '_ {
        self.neurites.iter().filter(move |n| filter.matches(n.branch_type()))
    }

    /// Total number of sections across all neurites.
    pub fn section_count(&self) -> usize {
        self.neurites.iter().map(Neurite::len).sum()
    }

    /// A copy with every soma and section point passed through `f`.
    pub fn map_points<F>(&self, mut f: F) -> Morphology
    where
        F: FnMut(&Point) -> Point,
    {
        Morphology {
            name: self.name.clone(),
            soma: self.soma.map_points(&mut f),
            neurites: self.neurites.iter().map(|n| n.map_points(&mut f)).collect(),
        }
    }

    /// Flatten back into reader records; arena indices become identifiers.
    pub fn to_record(&self) -> MorphologyRecord {
        let neurites = self
            .neurites
            .iter()
            .map(|n| NeuriteRecord {
                sections: n
                    .sections
                    .iter()
                    .map(|s| SectionRecord {
                        id: s.id.index() as i64,
                        parent: s.parent.map(|p| p.index() as i64),
                        branch_type: s.branch_type,
                        points: s.points.clone(),
                    })
                    .collect(),
            })
            .collect();
        MorphologyRecord { name: self.name.clone(), soma: self.soma.clone(), neurites }
    }
}

impl TryFrom<MorphologyRecord> for Morphology {
    type Error = MorphologyError;

    fn try_from(record: MorphologyRecord) -> Result<Self, Self::Error> {
        record.soma.validate()?;
        let neurites = record
            .neurites
            .into_iter()
            .map(|n| Neurite::from_records(n.sections))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "Loaded morphology '{}' with {} neurite(s)",
            record.name,
            neurites.len()
        );
        Ok(Morphology::new(record.name, record.soma, neurites))
    }
}
