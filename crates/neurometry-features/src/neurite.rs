//! Neurite-level extractors.
//!
//! Each function measures one neurite. Per-section results follow pre-order
//! section order; per-segment results follow section order, then point order.

use neurometry_core::{IterOrder, Neurite, SectionRef};
use neurometry_geometry::{bifurcation, morphmath, section as geom};

use crate::error::FeatureError;
use crate::options::Context;

type FeatureResult = Result<Vec<f64>, FeatureError>;

fn sections(neurite: &Neurite) -> impl Iterator<Item = SectionRef<'_>> + '_ {
    neurite.iter_sections(IterOrder::PreOrder)
}

fn per_section<F>(neurite: &Neurite, f: F) -> FeatureResult
where
    F: Fn(SectionRef<'_>) -> f64,
{
    Ok(sections(neurite).map(f).collect())
}

pub fn number_of_sections(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![sections(neurite).count() as f64])
}

pub fn number_of_segments(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![neurite.iter_segments().count() as f64])
}

pub fn number_of_bifurcations(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![neurite.bifurcations().count() as f64])
}

pub fn number_of_leaves(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![neurite.leaves().count() as f64])
}

pub fn section_lengths(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    per_section(neurite, geom::section_length)
}

pub fn segment_lengths(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(neurite.iter_segments().map(|s| morphmath::segment_length(&s)).collect())
}

pub fn local_bifurcation_angles(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(
        neurite
            .bifurcations()
            .filter_map(|s| bifurcation::local_bifurcation_angle(s).transpose()),
    )
}

pub fn remote_bifurcation_angles(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    let downstream = geom::downstream_path_lengths(neurite.root());
    ctx.resolve(neurite.bifurcations().filter_map(|s| {
        bifurcation::remote_bifurcation_angle_with(s, &downstream).transpose()
    }))
}

pub fn section_path_distances(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    // One pass: each section's distance is its parent's plus its own length.
    let mut distances = vec![0.0; neurite.len()];
    let mut values = Vec::with_capacity(neurite.len());
    for s in sections(neurite) {
        let upstream = s.parent().map_or(0.0, |p| distances[p.id().index()]);
        let d = upstream + geom::section_length(s);
        distances[s.id().index()] = d;
        values.push(d);
    }
    Ok(values)
}

pub fn section_radial_distances(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    per_section(neurite, |s| geom::section_radial_distance(s, ctx.soma))
}

pub fn segment_radial_distances(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    Ok(sections(neurite)
        .flat_map(|s| geom::segment_midpoint_radial_distances(s, ctx.soma))
        .collect())
}

pub fn section_branch_orders(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    per_section(neurite, |s| s.branch_order() as f64)
}

pub fn section_strahler_orders(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    let orders = neurite.strahler_orders();
    per_section(neurite, |s| orders[s.id().index()] as f64)
}

pub fn section_end_distances(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    per_section(neurite, geom::section_end_distance)
}

pub fn section_tortuosity(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(sections(neurite).map(geom::section_tortuosity))
}

pub fn section_areas(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    per_section(neurite, geom::section_area)
}

pub fn section_volumes(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    per_section(neurite, geom::section_volume)
}

pub fn section_mean_radii(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(sections(neurite).map(geom::section_mean_radius))
}

pub fn section_meander_angles(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(sections(neurite).flat_map(geom::section_meander_angles))
}

pub fn segment_taper_rates(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(sections(neurite).flat_map(geom::segment_taper_rates))
}

pub fn section_taper_rates(neurite: &Neurite, ctx: &Context<'_>) -> FeatureResult {
    ctx.resolve(sections(neurite).map(geom::section_taper_rate))
}

pub fn segment_mean_radii(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(sections(neurite).flat_map(geom::segment_mean_radii).collect())
}

pub fn segment_areas(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(sections(neurite).flat_map(geom::segment_areas).collect())
}

pub fn segment_volumes(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(sections(neurite).flat_map(geom::segment_volumes).collect())
}

pub fn total_length(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![sections(neurite).map(geom::section_length).sum()])
}

pub fn total_area(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![sections(neurite).map(geom::section_area).sum()])
}

pub fn total_volume(neurite: &Neurite, _: &Context<'_>) -> FeatureResult {
    Ok(vec![sections(neurite).map(geom::section_volume).sum()])
}
