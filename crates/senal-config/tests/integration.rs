//! Integration tests for senal-config.
//!
//! These tests go from patch text or files all the way to evaluated buffers.

use senal_analysis::dominant_frequency;
use senal_config::{ConfigError, Patch, factory_patches, get_factory_patch};
use senal_core::{BlockKind, FanInPolicy};
use senal_engine::run;
use tempfile::TempDir;

/// Every factory patch builds and runs with no stuck blocks.
#[test]
fn factory_patches_run_clean() {
    for patch in factory_patches() {
        let built = patch.build_graph().expect("factory patch builds");
        let output = run(&built.graph, &patch.run_settings()).expect("factory patch runs");
        assert!(output.report.stuck.is_empty(), "{}", patch.name);
        assert_eq!(output.buffers.len(), patch.blocks.len());
        let expected = (patch.run.sample_rate * patch.run.duration).round() as usize;
        assert!(output.buffers.values().all(|b| b.len() == expected));
    }
}

/// Saving then loading a patch from disk gives back the same patch.
#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("sampling.toml");

    let patch = get_factory_patch("sampling").unwrap();
    patch.save(&path).unwrap();
    assert!(path.exists());

    let loaded = Patch::load(&path).unwrap();
    assert_eq!(loaded, patch);
}

#[test]
fn loading_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Patch::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Patch::from_toml("name = \n").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn unknown_block_type_is_a_parse_error() {
    let err = Patch::from_toml(
        r#"
name = "bad"

[[blocks]]
name = "x"
type = "theremin"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

/// The reconstructed output of the sampling chain is dominated by the
/// lowest tone.
#[test]
fn sampling_chain_reconstructs_tone() {
    let mut patch = get_factory_patch("sampling").unwrap();
    patch.run.duration = 1.0;
    let built = patch.build_graph().unwrap();
    let output = run(&built.graph, &patch.run_settings()).unwrap();

    let fr = built.names["fr"];
    let sh = built.names["sh"];
    assert_eq!(built.graph.block(fr).unwrap().kind(), BlockKind::Fr);
    assert_eq!(dominant_frequency(&output.buffers[&fr], 44100.0), Some(100.0));
    assert_eq!(output.inputs[&sh], vec![output.buffers[&built.names["faa"]].clone()]);
}

/// Two wires into one input: the later one wins by default, both add under
/// the sum policy.
#[test]
fn fan_in_policy_from_patch() {
    let text = r#"
name = "fan-in"

[run]
sample_rate = 1000.0
duration = 0.1

[[blocks]]
name = "a"
type = "signal"
frequencies = [10.0]

[[blocks]]
name = "b"
type = "clock"
frequency = 50.0

[[blocks]]
name = "f"
type = "faa"
cutoff = 500.0

[[connections]]
from = "a"
to = "f"

[[connections]]
from = "b"
to = "f"
"#;
    let mut patch = Patch::from_toml(text).unwrap();
    let built = patch.build_graph().unwrap();
    let last = run(&built.graph, &patch.run_settings()).unwrap();
    let (a, b, f) = (built.names["a"], built.names["b"], built.names["f"]);
    let clock = &last.buffers[&b];
    for (x, y) in last.buffers[&f].iter().zip(clock) {
        assert!((x - y).abs() < 1e-9);
    }

    patch.run.fan_in = FanInPolicy::Sum;
    let built = patch.build_graph().unwrap();
    let summed = run(&built.graph, &patch.run_settings()).unwrap();
    for i in 0..100 {
        let expected = summed.buffers[&a][i] + summed.buffers[&b][i];
        assert!((summed.buffers[&f][i] - expected).abs() < 1e-9);
    }
}
