//! Integration tests for perfora CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_perfora"))
}

#[test]
fn patterns_command_lists_patterns() {
    let output = binary()
        .arg("patterns")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("grid"), "Should list 'grid' pattern");
    assert!(stdout.contains("staggered"), "Should list 'staggered' pattern");
}

#[test]
fn modes_command_lists_modes() {
    let output = binary()
        .arg("modes")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("of"));
    assert!(stdout.contains("step"));
    assert!(stdout.contains("diameter"));
}

#[test]
fn render_produces_svg() {
    let output = binary()
        .args([
            "render", "-d", "0.5", "-x", "5", "-y", "5", "--pattern", "grid", "--mode", "of",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<circle"), "Should have circle elements");
    assert!(stdout.contains("previewWaveClip"), "Should clip behind the wave");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn render_without_wave_has_no_clip() {
    let output = binary()
        .args(["render", "--no-wave"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(!stdout.contains("clip-path"));
    assert!(stdout.contains("preview-rect"));
}

#[test]
fn render_produces_json() {
    let output = binary()
        .args(["render", "-f", "json", "--grid"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("\"holes\""));
    assert!(stdout.contains("\"grid_lines\""));
    assert!(stdout.contains("\"wave_path\""));
    assert!(stdout.contains("\"of_percent\""));
}

#[test]
fn solve_diameter_mode_derives_diameter() {
    // x=y=5 grid with a 10% target: d = sqrt(4*25*0.10/pi) ~= 1.78 mm
    let output = binary()
        .args([
            "solve", "--mode", "diameter", "-x", "5", "-y", "5", "--pattern", "grid", "-t", "10",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("1.78"), "Expected derived diameter in: {}", stdout);
}

#[test]
fn solve_json_reports_state() {
    let output = binary()
        .args(["solve", "--json", "--rows", "4", "--cols", "6"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("\"grid_locked\": true"));
    assert!(stdout.contains("\"rows\": 4"));
    assert!(stdout.contains("\"cols\": 6"));
}

#[test]
fn share_round_trips_through_decode() {
    let output = binary()
        .args(["share", "-d", "0.5", "-x", "5", "-y", "5", "--pattern", "grid"])
        .output()
        .expect("Failed to execute command");

    let encoded = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(output.status.success());
    assert!(encoded.starts_with("d=0.50&x=5.00&y=5.00"), "got: {}", encoded);
    assert!(encoded.contains("pattern=grid"));

    let output = binary()
        .args(["share", "--decode", &encoded])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("pattern:     grid"));
}

#[test]
fn bogus_share_string_fails() {
    let output = binary()
        .args(["share", "--decode", "foo=bar"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}

#[test]
fn preset_prints_example() {
    let output = binary()
        .arg("preset")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("pattern: staggered"));
    // The example must itself be a loadable preset.
    assert!(stdout.contains("d:"));
}

#[test]
fn unknown_command_exits_nonzero() {
    let output = binary()
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}
