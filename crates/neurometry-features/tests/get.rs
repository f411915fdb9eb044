//! End-to-end checks of `get` on small hand-built morphologies.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use approx::assert_relative_eq;
use neurometry_core::{BranchType, Morphology, Neurite, Point, Soma, TypeFilter};
use neurometry_features::{
    get, get_feature, get_with, ExtractOptions, Feature, FeatureError, FeatureLevel,
};
use neurometry_geometry::GeometryError;

fn p(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z, 0.5)
}

/// Axon: root (0,0,0)-(1,0,0) forking to (2,1,0) and (2,-1,0).
fn fork(kind: BranchType) -> Neurite {
    let mut b = Neurite::builder(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], kind).unwrap();
    let root = b.root_id();
    b.child(root, vec![p(1.0, 0.0, 0.0), p(2.0, 1.0, 0.0)], kind).unwrap();
    b.child(root, vec![p(1.0, 0.0, 0.0), p(2.0, -1.0, 0.0)], kind).unwrap();
    b.build()
}

fn single_axon() -> Morphology {
    Morphology::new("fork", Soma::default(), vec![fork(BranchType::Axon)])
}

/// Fork whose first child starts with a zero-length segment.
fn degenerate_fork() -> Morphology {
    let kind = BranchType::BasalDendrite;
    let mut b = Neurite::builder(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], kind).unwrap();
    let root = b.root_id();
    b.child(root, vec![p(1.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 1.0, 0.0)], kind)
        .unwrap();
    b.child(root, vec![p(1.0, 0.0, 0.0), p(2.0, -1.0, 0.0)], kind).unwrap();
    let healthy = fork(kind);
    Morphology::new("degenerate", Soma::default(), vec![b.build(), healthy])
}

#[test]
fn test_fork_scenario() {
    let m = single_axon();

    assert_eq!(get("number_of_sections", &m, TypeFilter::All).unwrap(), vec![3.0]);
    assert_eq!(get("number_of_neurites", &m, TypeFilter::All).unwrap(), vec![1.0]);

    let lengths = get("section_lengths", &m, TypeFilter::All).unwrap();
    assert_eq!(lengths.len(), 3);
    assert_relative_eq!(lengths[0], 1.0);
    assert_relative_eq!(lengths[1], SQRT_2);
    assert_relative_eq!(lengths[2], SQRT_2);

    let angles = get("local_bifurcation_angles", &m, TypeFilter::All).unwrap();
    assert_eq!(angles.len(), 1);
    assert_relative_eq!(angles[0], FRAC_PI_2, epsilon = 1e-12);

    let remote = get("remote_bifurcation_angles", &m, TypeFilter::All).unwrap();
    assert_relative_eq!(remote[0], FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_empty_selection_is_empty_not_error() {
    let m = single_axon();
    assert!(get("section_lengths", &m, BranchType::BasalDendrite).unwrap().is_empty());
    assert!(get("local_bifurcation_angles", &m, BranchType::ApicalDendrite)
        .unwrap()
        .is_empty());
}

#[test]
fn test_unknown_feature() {
    let err = get("unknown_feature_xyz", &single_axon(), TypeFilter::All).unwrap_err();
    assert_eq!(err, FeatureError::UnknownFeature("unknown_feature_xyz".into()));
}

#[test]
fn test_sections_per_neurite_respects_filter() {
    let m = Morphology::new(
        "mixed",
        Soma::default(),
        vec![
            fork(BranchType::Axon),
            fork(BranchType::BasalDendrite),
            fork(BranchType::Axon),
        ],
    );
    assert_eq!(
        get("number_of_sections_per_neurite", &m, BranchType::Axon).unwrap(),
        vec![3.0, 3.0]
    );
    assert_eq!(
        get("number_of_sections_per_neurite", &m, TypeFilter::All).unwrap(),
        vec![3.0, 3.0, 3.0]
    );
    assert_eq!(get("number_of_neurites", &m, BranchType::BasalDendrite).unwrap(), vec![1.0]);
}

#[test]
fn test_neurite_results_concatenate_in_morphology_order() {
    let straight = Neurite::builder(vec![p(0.0, 0.0, 0.0), p(0.0, 5.0, 0.0)], BranchType::Axon)
        .unwrap()
        .build();
    let m = Morphology::new(
        "two",
        Soma::default(),
        vec![fork(BranchType::Axon), straight],
    );
    let lengths = get("section_lengths", &m, BranchType::Axon).unwrap();
    assert_eq!(lengths.len(), 4);
    assert_relative_eq!(lengths[3], 5.0);
    assert_eq!(get("total_length", &m, TypeFilter::All).unwrap().len(), 2);
}

#[test]
fn test_path_distances_accumulate() {
    let d = get("section_path_distances", &single_axon(), TypeFilter::All).unwrap();
    assert_relative_eq!(d[0], 1.0);
    assert_relative_eq!(d[1], 1.0 + SQRT_2);
    assert_relative_eq!(d[2], 1.0 + SQRT_2);
}

#[test]
fn test_branch_and_strahler_orders() {
    let m = single_axon();
    assert_eq!(
        get("section_branch_orders", &m, TypeFilter::All).unwrap(),
        vec![0.0, 1.0, 1.0]
    );
    assert_eq!(
        get("section_strahler_orders", &m, TypeFilter::All).unwrap(),
        vec![2.0, 1.0, 1.0]
    );
}

#[test]
fn test_degenerate_angle_is_skipped_by_default() {
    let m = degenerate_fork();
    let angles = get("local_bifurcation_angles", &m, TypeFilter::All).unwrap();
    assert_eq!(angles.len(), 1);
    assert_relative_eq!(angles[0], FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_degenerate_angle_aborts_when_asked() {
    let m = degenerate_fork();
    let err = get_with(
        "local_bifurcation_angles",
        &m,
        TypeFilter::All,
        &ExtractOptions::abort_on_degenerate(),
    )
    .unwrap_err();
    assert!(matches!(err, FeatureError::Geometry(GeometryError::DegenerateGeometry { .. })));
}

#[test]
fn test_per_segment_features() {
    let m = single_axon();
    assert_eq!(get("segment_mean_radii", &m, TypeFilter::All).unwrap(), vec![0.5; 3]);

    // Cylinders of radius 0.5: area pi * h, volume pi * h / 4.
    let areas = get("segment_areas", &m, TypeFilter::All).unwrap();
    let volumes = get("segment_volumes", &m, TypeFilter::All).unwrap();
    for (values, scale) in [(&areas, 1.0), (&volumes, 0.25)] {
        assert_eq!(values.len(), 3);
        assert_relative_eq!(values[0], PI * scale, epsilon = 1e-12);
        assert_relative_eq!(values[1], PI * SQRT_2 * scale, epsilon = 1e-12);
        assert_relative_eq!(values[2], PI * SQRT_2 * scale, epsilon = 1e-12);
    }
    let total = get("total_area", &m, TypeFilter::All).unwrap()[0];
    assert_relative_eq!(total, areas.iter().sum::<f64>(), epsilon = 1e-12);
}

#[test]
fn test_section_taper_rates() {
    let kind = BranchType::Axon;
    let tapered = Neurite::builder(
        vec![Point::new(0.0, 0.0, 0.0, 1.0), Point::new(4.0, 0.0, 0.0, 0.5)],
        kind,
    )
    .unwrap()
    .build();
    let mut b = Neurite::builder(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], kind).unwrap();
    // Zero-length child: no fit exists.
    b.child(b.root_id(), vec![p(1.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], kind).unwrap();
    let m = Morphology::new("taper", Soma::default(), vec![tapered, b.build()]);

    let rates = get("section_taper_rates", &m, TypeFilter::All).unwrap();
    assert_eq!(rates.len(), 2);
    assert_relative_eq!(rates[0], -0.25, epsilon = 1e-12);
    assert_relative_eq!(rates[1], 0.0, epsilon = 1e-12);

    let err = get_with(
        "section_taper_rates",
        &m,
        TypeFilter::All,
        &ExtractOptions::abort_on_degenerate(),
    )
    .unwrap_err();
    assert!(matches!(err, FeatureError::Geometry(GeometryError::DegenerateGeometry { .. })));
}

#[test]
fn test_fork_angles_hold_at_extreme_scales() {
    for scale in [1e160, 1e-170] {
        let q = |x: f64, y: f64| Point::new(x * scale, y * scale, 0.0, 0.5);
        let kind = BranchType::Axon;
        let mut b = Neurite::builder(vec![q(0.0, 0.0), q(1.0, 0.0)], kind).unwrap();
        let root = b.root_id();
        b.child(root, vec![q(1.0, 0.0), q(2.0, 1.0)], kind).unwrap();
        b.child(root, vec![q(1.0, 0.0), q(2.0, -1.0)], kind).unwrap();
        let m = Morphology::new("scaled", Soma::default(), vec![b.build()]);

        for options in [ExtractOptions::default(), ExtractOptions::abort_on_degenerate()] {
            for name in ["local_bifurcation_angles", "remote_bifurcation_angles"] {
                let angles = get_with(name, &m, TypeFilter::All, &options).unwrap();
                assert_eq!(angles.len(), 1, "{} at {:e}", name, scale);
                assert_relative_eq!(angles[0], FRAC_PI_2, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_typed_entry_matches_string_entry() {
    let m = single_axon();
    let options = ExtractOptions::default();
    for &f in Feature::ALL {
        let typed = get_feature(f, &m, TypeFilter::All, &options).unwrap();
        let named = get(f.name(), &m, TypeFilter::All).unwrap();
        assert_eq!(typed, named, "{}", f);
    }
}

#[test]
fn test_counts_are_single_values_per_neurite() {
    let m = Morphology::new(
        "pair",
        Soma::default(),
        vec![fork(BranchType::Axon), fork(BranchType::ApicalDendrite)],
    );
    for &f in Feature::ALL.iter().filter(|f| f.level() == FeatureLevel::Neurite) {
        if f.name().starts_with("number_of_") || f.name().starts_with("total_") {
            assert_eq!(get(f.name(), &m, TypeFilter::All).unwrap().len(), 2, "{}", f);
        }
    }
}
