use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("netlog"))
}

/// NotifyMsg payload holding exactly one event record.
fn notify_payload(event: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    // Sender key: no clone ids, no load mask.
    payload.push(0x00);
    payload.extend_from_slice(&0x0000_0021u32.to_le_bytes());
    payload.extend_from_slice(&0x0000u16.to_le_bytes());
    payload.extend_from_slice(&0x0001u16.to_le_bytes());
    payload.extend_from_slice(&42u32.to_le_bytes());
    payload.extend_from_slice(&6u16.to_le_bytes());
    payload.extend_from_slice(b"Sender");
    payload.extend_from_slice(&0u32.to_le_bytes()); // receivers
    payload.extend_from_slice(&0f64.to_le_bytes()); // timestamp
    payload.extend_from_slice(&0u32.to_le_bytes()); // cast flags
    payload.extend_from_slice(&0i32.to_le_bytes()); // notify type
    payload.extend_from_slice(&0f32.to_le_bytes()); // state
    payload.extend_from_slice(&0i32.to_le_bytes()); // id
    payload.extend_from_slice(&1u32.to_le_bytes()); // event count
    payload.extend_from_slice(event);
    payload
}

/// Capture log with a clean NotifyMsg, a record with an unregistered
/// type code, and a NotifyMsg carrying an out-of-range event code.
fn sample_log(dir: &TempDir) -> PathBuf {
    let mut bytes = b"NLOG".to_vec();
    bytes.extend_from_slice(&1u16.to_le_bytes());
    // Record 0: NotifyMsg with a single None event.
    let payload = notify_payload(&17u32.to_le_bytes());
    bytes.extend_from_slice(&1_700_000_000_000u64.to_le_bytes());
    bytes.extend_from_slice(&0x02EDu16.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&payload);
    // Record 1: unregistered type code, empty payload.
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&0x0063u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    // Record 2: NotifyMsg with an unknown event code.
    let payload = notify_payload(&99u32.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&0x02EDu16.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&payload);

    let path = dir.path().join("capture.nlog");
    fs::write(&path, bytes).expect("write sample log");
    path
}

#[test]
fn help_supports_inspect_and_dissect() {
    cmd()
        .arg("log")
        .arg("inspect")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("log")
        .arg("dissect")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.nlog");
    let report = temp.path().join("report.json");

    cmd()
        .arg("log")
        .arg("inspect")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn wrong_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.pcap");
    fs::write(&input, b"whatever").expect("write input");

    cmd()
        .arg("log")
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_json_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_log(&temp);

    let assert = cmd()
        .arg("log")
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();

    let output = assert.get_output();
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    assert_eq!(value["report_version"], 1);
    assert_eq!(value["messages_total"], 3);
    assert_eq!(value["messages"][0]["tree"]["label"], "NotifyMsg");
    assert_eq!(value["messages"][0]["ts"], "2023-11-14T22:13:20Z");
    assert!(value["messages"][1]["tree"]["anomalous"].as_bool().unwrap());
    // The out-of-range event code flags the whole NotifyMsg tree.
    assert_eq!(value["messages"][2]["tree"]["label"], "NotifyMsg");
    assert!(value["messages"][2]["tree"]["anomalous"].as_bool().unwrap());
}

#[test]
fn report_file_and_strict_exit() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_log(&temp);
    let report = temp.path().join("report.json");

    // The unregistered record and the unknown event code both make the
    // log anomalous, so --strict fails after still writing the report.
    cmd()
        .arg("log")
        .arg("inspect")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .arg("--strict")
        .arg("--list-anomalies")
        .assert()
        .failure()
        .stderr(
            contains("Anomalous messages:")
                .and(contains("type 0x0063"))
                .and(contains("type 0x02ED")),
        );

    let value: Value =
        serde_json::from_slice(&fs::read(&report).expect("report file")).expect("report json");
    assert_eq!(value["messages_total"], 3);
}

#[test]
fn inspect_is_deterministic() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_log(&temp);

    let first = cmd()
        .arg("log")
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let second = cmd()
        .arg("log")
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);
}
