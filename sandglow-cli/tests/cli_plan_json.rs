use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn plan_outputs_wrap_segments_at_theta_zero() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args(["plan", "--theta", "0", "--leds", "60", "--width", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"led_position\":0"))
        .stdout(predicate::str::contains("\"start\":0"))
        .stdout(predicate::str::contains("\"stop\":3"))
        .stdout(predicate::str::contains("\"start\":56"))
        .stdout(predicate::str::contains("\"stop\":59"));
}

#[test]
fn plan_rejects_width_wider_than_strip() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args(["plan", "--leds", "10", "--width", "11"])
        .assert()
        .failure();
}

#[test]
fn color_maps_theta_zero_to_red() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args(["color", "--theta", "0", "--rho", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hue\":0"))
        .stdout(predicate::str::contains("\"brightness\":255"))
        .stdout(predicate::str::contains("\"r\":255"));
}

#[test]
fn simulate_reports_outcome_counts() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args([
        "simulate",
        "--ticks",
        "10",
        "--interval-ms",
        "0",
        "--throttle-ms",
        "0",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"sent\":10"))
    .stdout(predicate::str::contains("\"failed\":0"));
}

#[test]
fn simulate_rejects_unknown_mode() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args(["simulate", "--mode", "rainbow", "--ticks", "1"])
        .assert()
        .failure();
}

#[test]
fn state_prints_defaults_when_the_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandglow"));
    cmd.args(["state", "--file", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"speed\": 130"))
        .stdout(predicate::str::contains("\"playlist_mode\": \"loop\""));
}
