//! Integration tests for senal-io: exporting real runs and reading them back.

use senal_core::{BlockParams, ClockParams, Graph, LowPassParams, SignalParams};
use senal_engine::{RunSettings, run};
use senal_io::{WavFormat, export_run, read_wav, read_wav_info};
use tempfile::TempDir;

#[test]
fn exported_sampler_matches_buffers() {
    let mut graph = Graph::new();
    let sig = graph
        .add_block(BlockParams::Signal(SignalParams::tone(100.0, 1.0)))
        .unwrap();
    let clk = graph
        .add_block(BlockParams::Clock(ClockParams::new(1000.0, 0.5)))
        .unwrap();
    let sh = graph.add_block(BlockParams::SampleHold).unwrap();
    let fr = graph
        .add_block(BlockParams::Fr(LowPassParams::new(500.0)))
        .unwrap();
    let out = graph.output(sig).unwrap();
    let input = graph.input(sh, 0).unwrap();
    graph.connect(out, input).unwrap();
    let out = graph.output(clk).unwrap();
    let clock = graph.clock_input(sh).unwrap();
    graph.connect(out, clock).unwrap();
    let out = graph.output(sh).unwrap();
    let input = graph.input(fr, 0).unwrap();
    graph.connect(out, input).unwrap();

    let output = run(&graph, &RunSettings::new(44100.0, 0.05)).unwrap();
    let dir = TempDir::new().unwrap();
    let paths = export_run(dir.path(), &output).unwrap();

    let stems: Vec<String> = paths
        .iter()
        .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        stems,
        [
            "Signal_1freqs_100Hz",
            "Clock_1000Hz",
            "S&H_2",
            "FR_3"
        ]
    );

    let info = read_wav_info(&paths[2]).unwrap();
    assert_eq!(info.format, WavFormat::IeeeFloat);
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 44100);

    let (held, _) = read_wav(&paths[2]).unwrap();
    let expected = output.buffer(sh).unwrap();
    assert_eq!(held.len(), expected.len());
    for (a, b) in held.iter().zip(expected) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn empty_graph_exports_nothing() {
    let output = run(&Graph::new(), &RunSettings::new(1000.0, 0.1)).unwrap();
    let dir = TempDir::new().unwrap();
    assert!(export_run(dir.path(), &output).unwrap().is_empty());
}

#[test]
fn fractional_rate_is_rounded() {
    let mut graph = Graph::new();
    graph.add_default(senal_core::BlockKind::Signal);
    let output = run(&graph, &RunSettings::new(999.6, 0.01)).unwrap();
    let dir = TempDir::new().unwrap();
    let paths = export_run(dir.path(), &output).unwrap();
    assert_eq!(read_wav_info(&paths[0]).unwrap().sample_rate, 1000);
}
