//! End-to-end segmentation of the shared SWC fixtures.
//!
//! The fixtures are owned by `swc-io`; this suite reads them from there.
//!
//! To run: cargo test -p neuron-paths --test pyramidal_paths

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use nalgebra::Point3;
use neuron_paths::{
    DegeneratePolicy, PathConfig, PathError, build_paths_from_file, build_paths_from_str,
};
use swc_io::{SampleType, SwcError};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("swc-io")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn pyramidal_segments_in_file_order() {
    let paths = build_paths_from_file(fixture("small_pyramidal.swc"), &PathConfig::default())
        .expect("fixture should build");

    let names: Vec<&str> = paths.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Basal Dendrite 0",
            "Basal Dendrite 1",
            "Basal Dendrite 2",
            "Apical Dendrite 3",
            "Apical Dendrite 4",
            "Axon 5",
        ]
    );
    let lengths: Vec<usize> = paths.segments.iter().map(|s| s.len()).collect();
    assert_eq!(lengths, vec![5, 3, 4, 6, 3, 4]);
    assert_eq!(paths.point_count(), 25);
    assert!(paths.skipped.is_empty());
    assert_eq!(paths.segments[5].kind, SampleType::Axon);
}

#[test]
fn pyramidal_anchors_are_shared_fork_points() {
    let paths =
        build_paths_from_file(fixture("small_pyramidal.swc"), &PathConfig::default().with_flip(false))
            .unwrap();
    let seg = &paths.segments;

    // both basal trunks leave soma sample 2
    assert_eq!(seg[0].path[0], Point3::new(0.0, -6.0, 0.0));
    assert_eq!(seg[2].path[0], Point3::new(0.0, -6.0, 0.0));
    // the side branch starts on sample 5 of the first trunk
    assert_eq!(seg[1].path[0], seg[0].path[2]);
    // the apical tuft forks at sample 15
    assert_eq!(seg[4].path[0], seg[3].path[3]);
    // the axon leaves the soma center
    assert_eq!(seg[5].path[0], Point3::origin());
    assert_relative_eq!(seg[5].radii[0], 6.0);
}

#[test]
fn pyramidal_soma_and_flip() {
    let paths = build_paths_from_file(fixture("small_pyramidal.swc"), &PathConfig::default())
        .unwrap();
    let soma = paths.soma.as_ref().expect("fixture has a soma");
    assert_eq!(soma.len(), 3);
    assert_relative_eq!(soma.profile_radius(), 6.0);

    // sample 22 sits at z = 5 in the file
    let axon = &paths.segments[5];
    assert_eq!(*axon.path.last().unwrap(), Point3::new(0.0, -40.0, -5.0));
    let rail = axon.rail.as_ref().unwrap();
    assert_eq!(*rail.last().unwrap(), Point3::new(0.5, -40.0, -5.0));
    assert_relative_eq!(axon.end_radius(), 0.5);
}

#[test]
fn glial_fragment_without_soma() {
    let paths = build_paths_from_file(fixture("astrocyte_fragment.swc"), &PathConfig::default())
        .unwrap();
    assert!(paths.soma.is_none());
    assert!(!paths.segments.is_empty());
    assert!(paths
        .segments
        .iter()
        .all(|s| s.kind == SampleType::GlialProcess && s.name.starts_with("Glial Process ")));
    assert!(paths.segments.iter().all(|s| s.path.len() >= 2));
}

#[test]
fn truncated_fixture_fails_with_line() {
    let err = build_paths_from_file(fixture("truncated.swc"), &PathConfig::default()).unwrap_err();
    assert!(matches!(err, PathError::Swc(SwcError::MalformedRecord { line: 4, .. })));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = build_paths_from_file(dir.path().join("absent.swc"), &PathConfig::default())
        .unwrap_err();
    assert!(matches!(err, PathError::Swc(SwcError::FileNotFound { .. })));
}

#[test]
fn file_and_string_agree() {
    let text = "1 1 0 0 0 4 -1\n2 2 0 0 3 1 1\n3 2 0 0 6 1 2\n4 3 2 0 0 1 1\n";
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiny.swc");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    drop(file);

    let config = PathConfig::default();
    let from_file = build_paths_from_file(&path, &config).unwrap();
    let from_str = build_paths_from_str(text, &config).unwrap();
    assert_eq!(from_file, from_str);
    assert_eq!(from_file.segments.len(), 2);
}

#[test]
fn strict_run_on_degenerate_root_fails_whole_file() {
    // 3 is a root whose child 5 starts its own segment
    let text = "1 1 0 0 0 4 -1\n2 2 0 0 3 1 1\n3 3 9 9 9 1 -1\n4 2 0 0 6 1 2\n5 3 9 9 8 1 3\n";
    let lenient = build_paths_from_str(text, &PathConfig::default()).unwrap();
    assert_eq!(lenient.segments.len(), 3);
    assert_eq!(lenient.skipped.len(), 1);
    assert_eq!(lenient.skipped[0].name, "Basal Dendrite 1");

    let strict = PathConfig::default().with_degenerate(DegeneratePolicy::Fail);
    assert!(matches!(
        build_paths_from_str(text, &strict),
        Err(PathError::DegenerateSegment { .. })
    ));
}

#[test]
fn isolated_points_never_fail_strict_runs() {
    let strict = PathConfig::default().with_degenerate(DegeneratePolicy::Fail);
    let soma_only = build_paths_from_str("1 1 0 0 0 4 -1\n", &strict).unwrap();
    assert_eq!(soma_only.soma.as_ref().map(|s| s.len()), Some(1));
    assert!(soma_only.segments.is_empty());

    let lone = build_paths_from_str("1 1 0 0 0 4 -1\n2 2 0 0 3 1 1\n3 3 9 9 9 1 -1\n", &strict)
        .unwrap();
    assert_eq!(lone.segments.len(), 1);
    assert!(lone.skipped.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn paths_serialize_to_json() {
    let paths = build_paths_from_file(fixture("small_pyramidal.swc"), &PathConfig::default())
        .unwrap();
    let json = serde_json::to_string(&paths).unwrap();
    let back: neuron_paths::NeuronPaths = serde_json::from_str(&json).unwrap();
    assert_eq!(back.segments.len(), paths.segments.len());
    assert_eq!(back.segments[3].name, "Apical Dendrite 3");
}
