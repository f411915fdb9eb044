//! Point- and segment-level geometry.
//!
//! Everything here works on plain points; the tree-aware functions in
//! [`section`](crate::section) and [`bifurcation`](crate::bifurcation) are
//! built on top of it.

use nalgebra::Vector3;
use neurometry_core::{Point, Segment};

#[inline]
pub fn to_vector(p: &Point) -> Vector3<f64> {
    Vector3::new(p.x, p.y, p.z)
}

/// Vector from `from` to `to`.
#[inline]
pub fn vector(from: &Point, to: &Point) -> Vector3<f64> {
    to_vector(to) - to_vector(from)
}

/// Euclidean distance between two points, ignoring radii.
#[inline]
pub fn point_dist(a: &Point, b: &Point) -> f64 {
    vector(a, b).norm()
}

/// Distance from a point to an arbitrary position.
#[inline]
pub fn dist_to(p: &Point, origin: [f64; 3]) -> f64 {
    (to_vector(p) - Vector3::from(origin)).norm()
}

/// Angle in radians between two vectors, in [0, π].
///
/// `None` if either vector has zero length or the cosine is not finite.
/// Each vector is divided by its largest component before normalising, so
/// very large or very small coordinates neither overflow nor flush to zero.
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> Option<f64> {
    let (su, sv) = (u.amax(), v.amax());
    if su == 0.0 || sv == 0.0 {
        return None;
    }
    let cos = u.unscale(su).normalize().dot(&v.unscale(sv).normalize());
    cos.is_finite().then(|| cos.clamp(-1.0, 1.0).acos())
}

/// Angle at `p0` between the rays towards `p1` and `p2`.
pub fn angle_3points(p0: &Point, p1: &Point, p2: &Point) -> Option<f64> {
    angle_between(&vector(p0, p1), &vector(p0, p2))
}

pub fn segment_length(segment: &Segment) -> f64 {
    point_dist(&segment.start, &segment.end)
}

/// Midpoint of a segment; the radius is the mean of the two ends.
pub fn segment_midpoint(segment: &Segment) -> Point {
    let (a, b) = (&segment.start, &segment.end);
    Point::new(
        0.5 * (a.x + b.x),
        0.5 * (a.y + b.y),
        0.5 * (a.z + b.z),
        0.5 * (a.radius + b.radius),
    )
}

/// Lateral surface of the conical frustum spanned by a segment.
///
/// $A = \pi (r_0 + r_1) \sqrt{(r_0 - r_1)^2 + h^2}$
pub fn segment_area(segment: &Segment) -> f64 {
    let h = segment_length(segment);
    let (r0, r1) = (segment.start.radius, segment.end.radius);
    std::f64::consts::PI * (r0 + r1) * ((r0 - r1).powi(2) + h * h).sqrt()
}

/// Volume of the conical frustum spanned by a segment.
///
/// $V = \frac{\pi h}{3} (r_0^2 + r_0 r_1 + r_1^2)$
pub fn segment_volume(segment: &Segment) -> f64 {
    let h = segment_length(segment);
    let (r0, r1) = (segment.start.radius, segment.end.radius);
    std::f64::consts::PI * h * (r0 * r0 + r0 * r1 + r1 * r1) / 3.0
}

/// Diameter change per unit length, `2 (r1 - r0) / h`; `None` for zero length.
pub fn segment_taper_rate(segment: &Segment) -> Option<f64> {
    let h = segment_length(segment);
    (h > 0.0).then(|| 2.0 * (segment.end.radius - segment.start.radius) / h)
}
