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

#[test]
fn samples_histogram_matches_density() {
    let input = fixture_path("logistic_scenario.yaml");
    let out = run(&["samples", "--input", input.to_string_lossy().as_ref()]);
    assert!(
        out.status.success(),
        "samples should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout should be valid JSON");

    assert_eq!(v["seed"].as_u64(), Some(42));
    assert_eq!(v["n_total"].as_u64(), Some(100_000));
    let counts = v["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 20);
    assert_eq!(v["edges"].as_array().unwrap().len(), 21);
    let binned: u64 = counts.iter().filter_map(|c| c.as_u64()).sum();
    let dropped = v["dropped"].as_u64().unwrap();
    assert_eq!(binned + dropped, 100_000);

    let hist = v["density"].as_array().unwrap();
    let pdf = v["pdf_at_centers"].as_array().unwrap();
    assert_eq!(pdf.len(), 20);
    for i in 2..18 {
        let h = hist[i].as_f64().unwrap();
        let p = pdf[i].as_f64().unwrap();
        assert!((h - p).abs() < 0.1 * p, "bin {}: hist={} pdf={}", i, h, p);
    }
}

#[test]
fn samples_is_deterministic_for_a_seed() {
    let input = fixture_path("logistic_scenario.yaml");
    let a = run(&["samples", "--input", input.to_string_lossy().as_ref()]);
    let b = run(&["samples", "--input", input.to_string_lossy().as_ref()]);
    assert!(a.status.success() && b.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn samples_requires_a_samples_section() {
    let input = fixture_path("spline_chain.yaml");
    let out = run(&["samples", "--input", input.to_string_lossy().as_ref()]);
    assert!(!out.status.success(), "samples without a section should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("samples"), "stderr={}", stderr);
}
