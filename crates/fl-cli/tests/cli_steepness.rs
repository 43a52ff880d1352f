use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_flowlab"))
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    repo_root().join("tests/fixtures").join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn steepness(args: &[&str]) -> Output {
    let mut full = vec!["steepness"];
    full.extend_from_slice(args);
    run(&full)
}

#[test]
fn steepness_sigmoid_through_point() {
    // sigmoid(2) = 0.8807970779778823
    let out = steepness(&["--family", "sigmoid", "--x", "1.0", "--y", "0.8807970779778823"]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["family"], "sigmoid");
    assert_eq!(v["indeterminate"], false);
    let k = v["k"].as_f64().unwrap();
    assert!((k - 2.0).abs() < 1e-9, "k={}", k);
}

#[test]
fn steepness_logit_with_negative_center() {
    // logit(0.25) = -ln 3; y - x0 = -1 - (-2) = 1
    let out = steepness(&["--family", "logit", "--x", "0.25", "--y", "-1.0", "--x0", "-2.0"]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let k = v["k"].as_f64().unwrap();
    assert!((k + 3f64.ln()).abs() < 1e-12, "k={}", k);
}

#[test]
fn steepness_near_center_is_indeterminate() {
    let out = steepness(&["--family", "sigmoid", "--x", "0.005", "--y", "0.7"]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["indeterminate"], true);
    assert!(v["k"].is_null());
    assert!(v["reason"].as_str().unwrap().contains("center"));
}

#[test]
fn steepness_rejects_probability_outside_unit_interval() {
    let out = steepness(&["--family", "sigmoid", "--x", "1.0", "--y", "1.5"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("(0,1)"), "stderr={}", stderr);
}
