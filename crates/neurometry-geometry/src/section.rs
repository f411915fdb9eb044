//! Section-level measurements.
//!
//! Lengths, distances, areas and volumes are total over well-formed
//! sections. Ratios and angles return [`GeometryError::DegenerateGeometry`]
//! when the geometry leaves them undefined.

use neurometry_core::{IterOrder, Point, SectionRef, Soma};

use crate::error::GeometryError;
use crate::morphmath;

/// Sum of segment lengths. Two coincident points give 0.
pub fn section_length(section: SectionRef<'_>) -> f64 {
    section.iter_segments().map(|s| morphmath::segment_length(&s)).sum()
}

/// Segment lengths in point order.
pub fn segment_lengths(section: SectionRef<'_>) -> impl Iterator<Item = f64> + '_ {
    section.iter_segments().map(|s| morphmath::segment_length(&s))
}

/// Arc length from the start of the neurite root to the end of `section`.
pub fn path_distance(section: SectionRef<'_>) -> f64 {
    section.path_to_root().map(section_length).sum()
}

/// Straight-line distance from `point` to the soma centre.
pub fn radial_distance(point: &Point, soma: &Soma) -> f64 {
    morphmath::dist_to(point, soma.center())
}

/// Radial distance of the section's last point.
pub fn section_radial_distance(section: SectionRef<'_>, soma: &Soma) -> f64 {
    radial_distance(&section.section().last_point(), soma)
}

/// Radial distance of every segment midpoint, in point order.
pub fn segment_midpoint_radial_distances<'a>(
    section: SectionRef<'a>,
    soma: &'a Soma,
) -> impl Iterator<Item = f64> + 'a {
    section
        .iter_segments()
        .map(move |s| radial_distance(&morphmath::segment_midpoint(&s), soma))
}

/// Distance between the first and last points.
pub fn section_end_distance(section: SectionRef<'_>) -> f64 {
    let s = section.section();
    morphmath::point_dist(&s.first_point(), &s.last_point())
}

/// Path length over end-to-end distance.
pub fn section_tortuosity(section: SectionRef<'_>) -> Result<f64, GeometryError> {
    let end = section_end_distance(section);
    if end == 0.0 {
        return Err(GeometryError::degenerate(section.id(), "section ends coincide"));
    }
    Ok(section_length(section) / end)
}

/// Lateral surface of each segment's frustum, in point order.
pub fn segment_areas(section: SectionRef<'_>) -> impl Iterator<Item = f64> + '_ {
    section.iter_segments().map(|s| morphmath::segment_area(&s))
}

/// Volume of each segment's frustum, in point order.
pub fn segment_volumes(section: SectionRef<'_>) -> impl Iterator<Item = f64> + '_ {
    section.iter_segments().map(|s| morphmath::segment_volume(&s))
}

/// Mean of the two end radii of each segment.
pub fn segment_mean_radii(section: SectionRef<'_>) -> impl Iterator<Item = f64> + '_ {
    section.iter_segments().map(|s| 0.5 * (s.start.radius + s.end.radius))
}

/// Lateral surface of the section's frusta.
pub fn section_area(section: SectionRef<'_>) -> f64 {
    segment_areas(section).sum()
}

pub fn section_volume(section: SectionRef<'_>) -> f64 {
    segment_volumes(section).sum()
}

/// Mean radius weighted by segment length.
pub fn section_mean_radius(section: SectionRef<'_>) -> Result<f64, GeometryError> {
    let (weighted, total) = section.iter_segments().fold((0.0, 0.0), |(w, t), s| {
        let h = morphmath::segment_length(&s);
        (w + 0.5 * (s.start.radius + s.end.radius) * h, t + h)
    });
    if total == 0.0 {
        return Err(GeometryError::degenerate(section.id(), "section has zero length"));
    }
    Ok(weighted / total)
}

/// Slope of the least-squares line through (path distance, diameter) at
/// every point of the section.
pub fn section_taper_rate(section: SectionRef<'_>) -> Result<f64, GeometryError> {
    let points = section.points();
    let mut distances = Vec::with_capacity(points.len());
    let mut walked = 0.0;
    distances.push(walked);
    for h in segment_lengths(section) {
        walked += h;
        distances.push(walked);
    }

    let n = points.len() as f64;
    let mean_x = distances.iter().sum::<f64>() / n;
    let mean_y = points.iter().map(|p| 2.0 * p.radius).sum::<f64>() / n;
    let (sxy, sxx) = distances.iter().zip(points).fold((0.0, 0.0), |(sxy, sxx), (x, p)| {
        let dx = x - mean_x;
        (sxy + dx * (2.0 * p.radius - mean_y), sxx + dx * dx)
    });
    if sxx == 0.0 {
        return Err(GeometryError::degenerate(section.id(), "section has zero length"));
    }
    Ok(sxy / sxx)
}

/// Segment index and the distance into that segment at `fraction` of the
/// section's length.
///
/// The segment is the first one whose far end reaches the target distance.
/// `None` unless `fraction` lies in [0, 1].
pub fn locate_segment_position(section: SectionRef<'_>, fraction: f64) -> Option<(usize, f64)> {
    if !(0.0..=1.0).contains(&fraction) {
        return None;
    }
    let lengths: Vec<f64> = segment_lengths(section).collect();
    let target = lengths.iter().sum::<f64>() * fraction;
    let mut start = 0.0;
    for (i, &h) in lengths.iter().enumerate() {
        if start + h >= target || i + 1 == lengths.len() {
            return Some((i, target - start));
        }
        start += h;
    }
    None
}

/// Taper rate of each segment, in point order.
pub fn segment_taper_rates(
    section: SectionRef<'_>,
) -> impl Iterator<Item = Result<f64, GeometryError>> + '_ {
    let id = section.id();
    section.iter_segments().map(move |s| {
        morphmath::segment_taper_rate(&s)
            .ok_or_else(|| GeometryError::degenerate(id, "zero-length segment"))
    })
}

/// Opening angle at every interior point, between the previous and next points.
pub fn section_meander_angles(
    section: SectionRef<'_>,
) -> impl Iterator<Item = Result<f64, GeometryError>> + '_ {
    let id = section.id();
    section.points().windows(3).map(move |w| {
        morphmath::angle_3points(&w[1], &w[0], &w[2])
            .ok_or_else(|| GeometryError::degenerate(id, "coincident points around a meander"))
    })
}

/// Total length of the subtree rooted at `section`.
pub fn downstream_path_length(section: SectionRef<'_>) -> f64 {
    section.iter_downstream(IterOrder::PreOrder).map(section_length).sum()
}

/// Downstream path length of every section in the subtree under `section`,
/// indexed by section id. Sections outside the subtree are left at 0.
pub fn downstream_path_lengths(section: SectionRef<'_>) -> Vec<f64> {
    let mut lengths = vec![0.0; section.neurite().len()];
    for s in section.iter_downstream(IterOrder::PostOrder) {
        let below: f64 = s.children().map(|c| lengths[c.id().index()]).sum();
        lengths[s.id().index()] = section_length(s) + below;
    }
    lengths
}
