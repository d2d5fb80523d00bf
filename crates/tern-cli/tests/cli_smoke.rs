use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn config(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(name)
}

fn tern(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tern"))
        .args(args)
        .output()
        .expect("run tern")
}

#[test]
fn genus_report_lists_both_classes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("reports/genus.json");
    let cfg = config("disc11.yaml");
    let output = tern(&[
        "genus",
        "--config",
        cfg.to_str().expect("utf8 path"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let body = std::fs::read_to_string(&out).expect("report written");
    let value: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(value["discriminant"], "11");
    assert_eq!(value["mass_x24"], "10");
    assert_eq!(value["representatives"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["provenance"]["seed"], 17);
    assert_eq!(value["provenance"]["precision"], "i64");
}

#[test]
fn seed_flag_overrides_config() {
    let cfg = config("disc11.yaml");
    let output = tern(&[
        "genus",
        "--config",
        cfg.to_str().expect("utf8 path"),
        "--seed",
        "99",
    ]);
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["provenance"]["seed"], 99);
}

#[test]
fn hecke_report_on_stdout() {
    let cfg = config("disc11.yaml");
    let output = tern(&[
        "hecke",
        "--config",
        cfg.to_str().expect("utf8 path"),
        "--primes",
        "2,3",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let entries = value["entries"].as_array().expect("entries");

    let trivial: Vec<&Value> = entries.iter().filter(|e| e["conductor"] == "1").collect();
    assert_eq!(trivial.len(), 2);
    let t2 = &trivial[0]["matrix"];
    assert_eq!(trivial[0]["prime"], 2);
    assert_eq!(t2["format"], "dense");
    assert_eq!(t2["dim"], 2);
    let data: Vec<i64> = t2["data"]
        .as_array()
        .expect("data")
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    assert_eq!(data[0] + data[3], 1);
    assert_eq!(data[0] + data[1], 3);
    assert_eq!(data[2] + data[3], 3);
}

#[test]
fn sparse_format_from_config() {
    let cfg = config("a3.yaml");
    let output = tern(&["hecke", "--config", cfg.to_str().expect("utf8 path")]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["provenance"]["precision"], "bigint");
    let first = &value["entries"][0];
    assert_eq!(first["prime"], 3);
    assert_eq!(first["conductor"], "1");
    assert_eq!(first["matrix"]["format"], "sparse");
    assert_eq!(first["matrix"]["data"][0], 4);
}

#[test]
fn prime_dividing_discriminant_fails() {
    let cfg = config("disc11.yaml");
    let output = tern(&[
        "hecke",
        "--config",
        cfg.to_str().expect("utf8 path"),
        "--primes",
        "11",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("prime-divides-discriminant"), "{stderr}");
}

#[test]
fn missing_config_is_reported() {
    let output = tern(&["genus", "--config", "/nonexistent/tern.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config-read"));
}
