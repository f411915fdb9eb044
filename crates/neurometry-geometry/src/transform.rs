//! Affine transformations of morphologies.
//!
//! Provides scale, rotate and translate operations applied to points or to
//! whole morphologies. Morphologies are immutable, so applying a transform
//! builds a new one with the same topology. Radii are carried over as-is.

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use neurometry_core::{Morphology, Point};

/// An affine transformation: rotation/scale matrix + translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// 3x3 rotation/scale matrix.
    pub matrix: Matrix3<f64>,
    /// Translation vector (µm).
    pub translation: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::linear(Matrix3::identity())
    }
}

impl Transform {
    fn linear(matrix: Matrix3<f64>) -> Self {
        Self { matrix, translation: Vector3::zeros() }
    }

    /// Shift by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self { translation: Vector3::new(dx, dy, dz), ..Self::default() }
    }

    /// Scale every coordinate by `factor` about the origin.
    pub fn uniform_scale(factor: f64) -> Self {
        Self::linear(Matrix3::from_diagonal_element(factor))
    }

    /// Per-axis scale about the origin.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::linear(Matrix3::from_diagonal(&Vector3::new(sx, sy, sz)))
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    ///
    /// A zero axis yields the identity.
    pub fn rotation(axis: [f64; 3], angle: f64) -> Self {
        match Unit::try_new(Vector3::from(axis), f64::EPSILON) {
            Some(axis) => Self::linear(Rotation3::from_axis_angle(&axis, angle).into_inner()),
            None => Self::default(),
        }
    }

    /// Map a position.
    pub fn apply(&self, point: &[f64; 3]) -> [f64; 3] {
        (self.matrix * Vector3::from(*point) + self.translation).into()
    }

    /// Apply to a sample, keeping its radius.
    pub fn apply_point(&self, point: &Point) -> Point {
        let [x, y, z] = self.apply(&point.xyz());
        Point::new(x, y, z, point.radius)
    }

    /// A new morphology with the soma and every section point transformed.
    pub fn apply_to_morphology(&self, morphology: &Morphology) -> Morphology {
        morphology.map_points(|p| self.apply_point(p))
    }

    /// Compose two transforms: self followed by other.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
            translation: other.matrix * self.translation + other.translation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use neurometry_core::{BranchType, Neurite, Soma};

    #[test]
    fn test_identity_transform() {
        let t = Transform::default();
        let result = t.apply(&[1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(result[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_and_translate() {
        let t = Transform::uniform_scale(2.0).then(&Transform::translation(1.0, 0.0, 0.0));
        let result = t.apply(&[1.0, 1.0, 1.0]);
        assert_abs_diff_eq!(result[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let t = Transform::rotation([0.0, 0.0, 1.0], std::f64::consts::FRAC_PI_2);
        let p = t.apply_point(&Point::new(1.0, 0.0, 0.0, 0.7));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_eq!(p.radius, 0.7);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Transform::rotation([0.0; 3], 1.0), Transform::default());
    }

    #[test]
    fn test_morphology_translation_moves_soma_and_points() {
        let neurite = Neurite::builder(
            vec![Point::new(0.0, 0.0, 0.0, 1.0), Point::new(1.0, 0.0, 0.0, 1.0)],
            BranchType::Axon,
        )
        .unwrap()
        .build();
        let morph = Morphology::new("m", Soma::new([0.0; 3], 2.0).unwrap(), vec![neurite]);
        let moved = Transform::translation(0.0, 5.0, 0.0).apply_to_morphology(&morph);
        assert_eq!(moved.soma().center(), [0.0, 5.0, 0.0]);
        assert_eq!(moved.soma().radius(), 2.0);
        let root = moved.neurites()[0].root();
        assert_eq!(root.points()[1], Point::new(1.0, 5.0, 0.0, 1.0));
        assert_eq!(moved.name(), "m");
    }
}
