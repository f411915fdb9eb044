//! Bifurcation angles.
//!
//! Both angles are defined only at sections with exactly two children and
//! return `Ok(None)` elsewhere. A zero-length direction vector is reported
//! as [`GeometryError::DegenerateGeometry`] rather than a NaN.

use neurometry_core::{Point, SectionRef};

use crate::error::GeometryError;
use crate::morphmath;
use crate::section::downstream_path_lengths;

fn child_pair<'a>(section: SectionRef<'a>) -> Option<(SectionRef<'a>, SectionRef<'a>)> {
    if section.child_count() != 2 {
        return None;
    }
    let mut children = section.children();
    Some((children.next()?, children.next()?))
}

fn angle_towards(
    section: SectionRef<'_>,
    a: &Point,
    b: &Point,
) -> Result<f64, GeometryError> {
    let origin = section.section().last_point();
    morphmath::angle_3points(&origin, a, b)
        .ok_or_else(|| GeometryError::degenerate(section.id(), "zero-length bifurcation direction"))
}

/// Angle between the first segments of the two children.
///
/// Directions run from the bifurcation point (the section's last point) to
/// each child's second point.
pub fn local_bifurcation_angle(section: SectionRef<'_>) -> Result<Option<f64>, GeometryError> {
    let Some((left, right)) = child_pair(section) else {
        return Ok(None);
    };
    angle_towards(section, &left.points()[1], &right.points()[1]).map(Some)
}

/// Angle between the directions to the two child subtrees' terminal points.
///
/// Each terminal is found by descending from the child, at every fork taking
/// the child with the longest downstream path (the first one on ties), until
/// a leaf is reached; its last point is the terminal.
pub fn remote_bifurcation_angle(section: SectionRef<'_>) -> Result<Option<f64>, GeometryError> {
    if child_pair(section).is_none() {
        return Ok(None);
    }
    remote_bifurcation_angle_with(section, &downstream_path_lengths(section))
}

/// [`remote_bifurcation_angle`] with downstream lengths computed up front by
/// [`downstream_path_lengths`] over a subtree containing `section`.
pub fn remote_bifurcation_angle_with(
    section: SectionRef<'_>,
    downstream: &[f64],
) -> Result<Option<f64>, GeometryError> {
    let Some((left, right)) = child_pair(section) else {
        return Ok(None);
    };
    let (a, b) = (subtree_terminal(left, downstream), subtree_terminal(right, downstream));
    angle_towards(section, &a, &b).map(Some)
}

/// Last point of the leaf reached by following the longest downstream path.
///
/// `downstream` holds the downstream path length of every section below
/// `section`, indexed by section id.
pub fn subtree_terminal(section: SectionRef<'_>, downstream: &[f64]) -> Point {
    let mut current = section;
    loop {
        let mut best: Option<(SectionRef<'_>, f64)> = None;
        for child in current.children() {
            let length = downstream[child.id().index()];
            if best.map_or(true, |(_, l)| length > l) {
                best = Some((child, length));
            }
        }
        match best {
            Some((child, _)) => current = child,
            None => return current.section().last_point(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use neurometry_core::{BranchType, Neurite, SectionId};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn seg(a: [f64; 3], b: [f64; 3]) -> Vec<Point> {
        vec![Point::new(a[0], a[1], a[2], 0.5), Point::new(b[0], b[1], b[2], 0.5)]
    }

    #[test]
    fn test_perfect_bifurcation() {
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        b.child(root, seg([1.0, 0.0, 0.0], [2.0, 1.0, 0.0]), BranchType::Axon).unwrap();
        b.child(root, seg([1.0, 0.0, 0.0], [2.0, -1.0, 0.0]), BranchType::Axon).unwrap();
        let n = b.build();
        let local = local_bifurcation_angle(n.root()).unwrap().unwrap();
        let remote = remote_bifurcation_angle(n.root()).unwrap().unwrap();
        assert_abs_diff_eq!(local, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(remote, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_remote_follows_longest_path() {
        //      root ends at (1,0,0)
        //      left:  (1,0,0)->(2,1,0) then forks into a short and a long branch
        //      right: (1,0,0)->(2,-1,0)
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        let left = b.child(root, seg([1.0, 0.0, 0.0], [2.0, 1.0, 0.0]), BranchType::Axon).unwrap();
        b.child(root, seg([1.0, 0.0, 0.0], [2.0, -1.0, 0.0]), BranchType::Axon).unwrap();
        b.child(left, seg([2.0, 1.0, 0.0], [2.0, 1.5, 0.0]), BranchType::Axon).unwrap();
        b.child(left, seg([2.0, 1.0, 0.0], [5.0, 1.0, 0.0]), BranchType::Axon).unwrap();
        let n = b.build();

        let downstream = downstream_path_lengths(n.root());
        assert_eq!(
            subtree_terminal(n.section(left).unwrap(), &downstream),
            Point::new(5.0, 1.0, 0.0, 0.5)
        );
        let remote = remote_bifurcation_angle(n.root()).unwrap().unwrap();
        let expected = morphmath::angle_between(
            &nalgebra::Vector3::new(4.0, 1.0, 0.0),
            &nalgebra::Vector3::new(1.0, -1.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(remote, expected, epsilon = 1e-12);
        let local = local_bifurcation_angle(n.root()).unwrap().unwrap();
        assert_abs_diff_eq!(local, FRAC_PI_2, epsilon = 1e-12);
        // the inner fork is a bifurcation too: (0, 0.5) vs (3, 0)
        let inner = local_bifurcation_angle(n.section(left).unwrap()).unwrap().unwrap();
        assert_abs_diff_eq!(inner, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_on_a_comb() {
        // A spine along +x; at each joint a short side branch along +y and
        // the rest of the spine. The longest path runs down the spine.
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let mut joint = b.root_id();
        for i in 1..=6 {
            let x = i as f64;
            b.child(joint, seg([x, 0.0, 0.0], [x, 0.5, 0.0]), BranchType::Axon).unwrap();
            joint = b.child(joint, seg([x, 0.0, 0.0], [x + 1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        }
        let n = b.build();
        let downstream = downstream_path_lengths(n.root());

        assert_eq!(subtree_terminal(n.root(), &downstream), Point::new(7.0, 0.0, 0.0, 0.5));
        for s in n.bifurcations() {
            let precomputed = remote_bifurcation_angle_with(s, &downstream).unwrap();
            assert_eq!(precomputed, remote_bifurcation_angle(s).unwrap());
            // Side branch straight up, spine terminal straight ahead.
            assert_abs_diff_eq!(precomputed.unwrap(), FRAC_PI_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_terminal_takes_first_child_on_ties() {
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        b.child(root, seg([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]), BranchType::Axon).unwrap();
        b.child(root, seg([1.0, 0.0, 0.0], [1.0, -1.0, 0.0]), BranchType::Axon).unwrap();
        let n = b.build();
        let downstream = downstream_path_lengths(n.root());
        assert_eq!(subtree_terminal(n.root(), &downstream), Point::new(1.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_angles_stay_in_range() {
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        b.child(root, seg([1.0, 0.0, 0.0], [2.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        b.child(root, seg([1.0, 0.0, 0.0], [0.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let n = b.build();
        let local = local_bifurcation_angle(n.root()).unwrap().unwrap();
        assert_abs_diff_eq!(local, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_not_a_two_way_fork() {
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        let only = b.child(root, seg([1.0, 0.0, 0.0], [2.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        for y in [1.0, 0.0, -1.0] {
            b.child(only, seg([2.0, 0.0, 0.0], [3.0, y, 0.0]), BranchType::Axon).unwrap();
        }
        let n = b.build();
        assert_eq!(local_bifurcation_angle(n.root()).unwrap(), None);
        assert_eq!(remote_bifurcation_angle(n.root()).unwrap(), None);
        let trifurcation = n.section(only).unwrap();
        assert!(trifurcation.is_bifurcation());
        assert_eq!(local_bifurcation_angle(trifurcation).unwrap(), None);
        assert_eq!(local_bifurcation_angle(n.section(SectionId(2)).unwrap()).unwrap(), None);
    }

    #[test]
    fn test_coincident_child_point_is_degenerate() {
        let mut b = Neurite::builder(seg([0.0; 3], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        let root = b.root_id();
        b.child(root, seg([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]), BranchType::Axon).unwrap();
        b.child(root, seg([1.0, 0.0, 0.0], [2.0, 1.0, 0.0]), BranchType::Axon).unwrap();
        let n = b.build();
        let err = local_bifurcation_angle(n.root()).unwrap_err();
        assert_eq!(err.section(), root);
    }
}
