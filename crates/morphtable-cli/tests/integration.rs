//! Integration tests for morphtable-cli.
//!
//! Runs the `morphtable` binary and checks its output and the files it writes.

use std::process::Command;

use morphtable_config::SynthConfig;
use morphtable_io::read_wav;
use tempfile::TempDir;

/// Helper to get the path to the `morphtable` binary built by cargo.
fn morphtable_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_morphtable"))
}

#[test]
fn cli_info_notes_lists_reference_pitch() {
    let output = morphtable_bin()
        .args(["info", "notes", "--from", "A4", "--to", "B4"])
        .output()
        .expect("failed to run morphtable info notes");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A4"));
    assert!(stdout.contains("440.00"));
    assert!(stdout.contains("B4"));
}

#[test]
fn cli_render_writes_expected_frames() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("note.wav");

    let output = morphtable_bin()
        .arg("render")
        .arg(&path)
        .args([
            "--note",
            "A4",
            "--segments",
            "2",
            "--duration",
            "0.05",
            "--sample-rate",
            "8000",
            "--last-start",
            "square",
        ])
        .output()
        .expect("failed to run morphtable render");

    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (samples, spec) = read_wav(&path).unwrap();
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.channels, 2);
    assert_eq!(samples.len(), 2 * 2 * 400);
    assert!(samples.iter().all(|s| s.abs() <= 1.0));
    assert!(samples.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn cli_render_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("engine.toml");
    let wav_path = dir.path().join("note.wav");

    let config = SynthConfig {
        sample_rate: 11025,
        channels: 1,
        waveform_duration_secs: 0.0625,
        max_waveform_count: 3,
        output_gain: 0.5,
        default_note: "C4".to_string(),
    };
    config.save(&config_path).unwrap();

    let output = morphtable_bin()
        .arg("render")
        .arg(&wav_path)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("failed to run morphtable render");
    assert!(output.status.success());

    let (samples, spec) = read_wav(&wav_path).unwrap();
    assert_eq!(spec.sample_rate, 11025);
    assert_eq!(spec.channels, 1);
    assert_eq!(samples.len(), 3 * 689);
}

#[test]
fn cli_render_rejects_invalid_note() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.wav");

    let output = morphtable_bin()
        .arg("render")
        .arg(&path)
        .args(["--note", "H9"])
        .output()
        .expect("failed to run morphtable render");

    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn cli_preview_plot_has_requested_size() {
    let output = morphtable_bin()
        .args([
            "preview",
            "--target",
            "first",
            "--first-start",
            "triangle",
            "--plot",
            "--width",
            "30",
            "--height",
            "7",
        ])
        .output()
        .expect("failed to run morphtable preview");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|l| l.chars().count() == 30));
    assert!(stdout.contains('*'));
}

#[test]
fn cli_preview_samples_are_normalized() {
    let output = morphtable_bin()
        .args(["preview", "--segments", "2"])
        .output()
        .expect("failed to run morphtable preview");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let samples: Vec<f32> = stdout.lines().map(|l| l.parse().unwrap()).collect();
    // Two wavetable segments of 16 cycles x 40 lines.
    assert_eq!(samples.len(), 2 * 640);
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!((peak - 1.0).abs() < 1e-5);
}

#[test]
fn cli_info_config_saves_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("engine.toml");

    let output = morphtable_bin()
        .args(["info", "config", "--save"])
        .arg(&path)
        .output()
        .expect("failed to run morphtable info config");

    assert!(output.status.success());
    assert_eq!(SynthConfig::load(&path).unwrap(), SynthConfig::default());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sample_rate"));
}
