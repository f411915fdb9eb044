//! Parser for `.swc` morphology files.
//!
//! The SWC format is a plain-text sample table:
//! ```text
//! # comment
//! <id> <type> <x> <y> <z> <radius> <parent>
//! ```
//!
//! Samples of type 1 form the soma. Every other sample whose parent is a
//! soma sample or `-1` starts a neurite. Sections break at samples with no
//! child or more than one child, and each child section repeats its parent
//! section's last point as its first point.

use std::collections::HashMap;
use std::path::Path;

use neurometry_core::{
    BranchType, Morphology, Neurite, Point, SectionRecord, Soma,
};

use super::ParseError;

const NO_PARENT: i64 = -1;

#[derive(Debug, Clone)]
struct Sample {
    id: i64,
    branch_type: BranchType,
    point: Point,
    parent: i64,
    line: usize,
}

impl Sample {
    fn is_soma(&self) -> bool {
        self.branch_type == BranchType::Soma
    }
}

/// Read and parse an SWC file; the morphology is named after the file stem.
pub fn read_swc(path: &Path) -> Result<Morphology, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_swc(&content, &name)
}

/// Parse SWC content from a string.
pub fn parse_swc(content: &str, name: &str) -> Result<Morphology, ParseError> {
    let samples = parse_samples(content)?;

    let mut index_of: HashMap<i64, usize> = HashMap::with_capacity(samples.len());
    for (idx, s) in samples.iter().enumerate() {
        if index_of.insert(s.id, idx).is_some() {
            return Err(ParseError::FormatError {
                line: s.line,
                message: format!("Duplicate sample id {}", s.id),
            });
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); samples.len()];
    let mut roots = Vec::new();
    for (idx, s) in samples.iter().enumerate() {
        if s.is_soma() {
            continue;
        }
        let parent = if s.parent == NO_PARENT {
            None
        } else {
            let pidx = *index_of.get(&s.parent).ok_or_else(|| ParseError::FormatError {
                line: s.line,
                message: format!("Sample {} has unknown parent {}", s.id, s.parent),
            })?;
            Some(pidx)
        };
        match parent {
            Some(p) if !samples[p].is_soma() => children[p].push(idx),
            _ => roots.push(idx),
        }
    }

    let soma_points: Vec<Point> =
        samples.iter().filter(|s| s.is_soma()).map(|s| s.point).collect();
    if soma_points.is_empty() {
        return Err(ParseError::MissingSoma);
    }
    let soma = Soma::from_outline(soma_points)?;

    let mut visited = 0;
    let mut neurites = Vec::with_capacity(roots.len());
    for &root in &roots {
        let (records, count) = neurite_records(&samples, &index_of, &children, root);
        visited += count;
        neurites.push(Neurite::from_records(records)?);
    }

    let non_soma = samples.iter().filter(|s| !s.is_soma()).count();
    if visited != non_soma {
        // Samples on a parent cycle never hang below a root.
        let reached = reachable(&children, &roots, samples.len());
        if let Some(s) = samples.iter().zip(&reached).find(|(s, r)| !s.is_soma() && !**r) {
            return Err(ParseError::FormatError {
                line: s.0.line,
                message: format!("Sample {} is not connected to the soma or a root", s.0.id),
            });
        }
    }

    log::debug!(
        "Parsed SWC '{}': {} samples, {} neurite(s)",
        name,
        samples.len(),
        neurites.len()
    );
    Ok(Morphology::new(name, soma, neurites))
}

fn parse_samples(content: &str) -> Result<Vec<Sample>, ParseError> {
    let mut samples = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 7 {
            return Err(ParseError::FormatError {
                line: line_no,
                message: format!("Expected 'id type x y z radius parent', got '{}'", line),
            });
        }

        let int = |i: usize, what: &str| -> Result<i64, ParseError> {
            parts[i].parse().map_err(|_| ParseError::FormatError {
                line: line_no,
                message: format!("Invalid {}: {}", what, parts[i]),
            })
        };
        let float = |i: usize, what: &str| -> Result<f64, ParseError> {
            parts[i].parse().map_err(|_| ParseError::FormatError {
                line: line_no,
                message: format!("Invalid {}: {}", what, parts[i]),
            })
        };

        samples.push(Sample {
            id: int(0, "sample id")?,
            branch_type: BranchType::from_swc_code(int(1, "structure type")?),
            point: Point::new(
                float(2, "x coordinate")?,
                float(3, "y coordinate")?,
                float(4, "z coordinate")?,
                float(5, "radius")?,
            ),
            parent: int(6, "parent id")?,
            line: line_no,
        });
    }
    Ok(samples)
}

/// Split the sample tree under `root` into sections.
///
/// Returns the section records and the number of samples consumed.
fn neurite_records(
    samples: &[Sample],
    index_of: &HashMap<i64, usize>,
    children: &[Vec<usize>],
    root: usize,
) -> (Vec<SectionRecord>, usize) {
    let mut records = Vec::new();
    let mut consumed = 0;
    // (first sample, parent section id, leading point copied from the parent)
    let mut stack: Vec<(usize, Option<i64>, Option<Point>)> = vec![(root, None, None)];

    while let Some((start, parent, lead)) = stack.pop() {
        let mut points: Vec<Point> = lead.into_iter().collect();
        let mut current = start;
        loop {
            points.push(samples[current].point);
            consumed += 1;
            match children[current].as_slice() {
                [only] => current = *only,
                _ => break,
            }
        }

        // A root section made of one sample is anchored at its soma sample.
        if parent.is_none() && points.len() == 1 {
            let s = &samples[start];
            if let Some(&pidx) = index_of.get(&s.parent) {
                let anchor = samples[pidx].point;
                points.insert(0, Point::new(anchor.x, anchor.y, anchor.z, s.point.radius));
            }
        }

        let id = records.len() as i64;
        let last = points[points.len() - 1];
        records.push(SectionRecord {
            id,
            parent,
            branch_type: samples[start].branch_type,
            points,
        });
        for &child in children[current].iter().rev() {
            stack.push((child, Some(id), Some(last)));
        }
    }

    (records, consumed)
}

fn reachable(children: &[Vec<usize>], roots: &[usize], n: usize) -> Vec<bool> {
    let mut seen = vec![false; n];
    let mut stack = roots.to_vec();
    while let Some(i) = stack.pop() {
        if !std::mem::replace(&mut seen[i], true) {
            stack.extend(&children[i]);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurometry_core::{IterOrder, MorphologyError, TreeDefect};

    const FORK: &str = "\
# simple fork
1 1 0 0 0 1.0 -1
2 2 0 1 0 0.5 1
3 2 0 2 0 0.5 2
4 2 1 3 0 0.4 3
5 2 -1 3 0 0.4 3
6 3 0 -1 0 0.3 1
7 3 0 -2 0 0.3 6
";

    #[test]
    fn test_parse_fork() {
        let morph = parse_swc(FORK, "fork").unwrap();
        assert_eq!(morph.name(), "fork");
        assert_eq!(morph.soma().center(), [0.0, 0.0, 0.0]);
        assert_eq!(morph.soma().radius(), 1.0);
        assert_eq!(morph.neurites().len(), 2);

        let axon = &morph.neurites()[0];
        assert_eq!(axon.branch_type(), BranchType::Axon);
        assert_eq!(axon.len(), 3);
        let root = axon.root();
        assert_eq!(root.points().len(), 2);
        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 2);
        // Children start at the fork sample
        assert_eq!(children[0].points()[0], Point::new(0.0, 2.0, 0.0, 0.5));
        assert_eq!(children[0].points()[1], Point::new(1.0, 3.0, 0.0, 0.4));
        assert_eq!(children[1].points()[1], Point::new(-1.0, 3.0, 0.0, 0.4));

        let dendrite = &morph.neurites()[1];
        assert_eq!(dendrite.branch_type(), BranchType::BasalDendrite);
        assert_eq!(dendrite.iter_sections(IterOrder::PreOrder).count(), 1);
    }

    #[test]
    fn test_single_sample_root_is_anchored_at_soma() {
        let content = "1 1 0 0 0 2.0 -1\n2 4 0 0 5 1.0 1\n3 4 1 0 6 1.0 2\n4 4 -1 0 6 1.0 2\n";
        let morph = parse_swc(content, "apical").unwrap();
        let apical = &morph.neurites()[0];
        assert_eq!(apical.branch_type(), BranchType::ApicalDendrite);
        assert_eq!(apical.root().points()[0], Point::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(apical.len(), 3);
    }

    #[test]
    fn test_rejects_short_line() {
        let err = parse_swc("1 1 0 0 0 1.0\n", "x").unwrap_err();
        assert!(matches!(err, ParseError::FormatError { line: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_number() {
        let err = parse_swc("1 1 0 zero 0 1.0 -1\n", "x").unwrap_err();
        assert!(matches!(err, ParseError::FormatError { line: 1, .. }));
    }

    #[test]
    fn test_rejects_unknown_parent() {
        let err = parse_swc("1 1 0 0 0 1.0 -1\n2 2 0 1 0 1.0 9\n", "x").unwrap_err();
        assert!(matches!(err, ParseError::FormatError { line: 2, .. }));
    }

    #[test]
    fn test_rejects_missing_soma() {
        let err = parse_swc("1 2 0 0 0 1.0 -1\n2 2 0 1 0 1.0 1\n", "x").unwrap_err();
        assert!(matches!(err, ParseError::MissingSoma));
    }

    #[test]
    fn test_rejects_cycle() {
        let content = "1 1 0 0 0 1.0 -1\n2 2 0 1 0 1.0 3\n3 2 0 2 0 1.0 2\n";
        let err = parse_swc(content, "x").unwrap_err();
        assert!(matches!(err, ParseError::FormatError { line: 2, .. }));
    }

    #[test]
    fn test_isolated_single_sample_is_malformed() {
        let content = "1 1 0 0 0 1.0 -1\n2 2 5 5 5 1.0 -1\n";
        let err = parse_swc(content, "x").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Morphology(MorphologyError::MalformedTree {
                defect: TreeDefect::TooFewPoints { count: 1 },
                ..
            })
        ));
    }
}
