use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const VALID_FRAME: [u8; 32] = [
    0x42, 0x4D, 0x00, 0x1C, 0x00, 0x32, 0x00, 0x64, 0x00, 0x96, 0x00, 0x32, 0x00, 0x64, 0x00,
    0x96, 0x00, 0x32, 0x00, 0x64, 0x00, 0x96, 0x00, 0x96, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00,
    0x04, 0xC8,
];

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("airlens"))
}

fn write_capture(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write capture");
    path
}

#[test]
fn decode_help_works() {
    cmd()
        .arg("capture")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_reports_decoded_reading() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(&temp, "serial.bin", &VALID_FRAME);

    let assert = cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["frames_decoded"], 1);
    assert_eq!(report["bytes_discarded"], 0);
    assert_eq!(report["readings"][0]["pm25_env"], 100);
    assert_eq!(report["readings"][0]["temperature"], 1);
    assert_eq!(report["readings"][0]["humidity"], 2);
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(&temp, "serial.bin", &VALID_FRAME);
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let contents = std::fs::read_to_string(&report).expect("report file");
    let value: Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(value["tool"]["name"], "airlens");
}

#[test]
fn strict_fails_on_undecodable_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let mut bytes = vec![0xAA, 0xBB, 0xCC];
    bytes.extend_from_slice(&VALID_FRAME);
    let input = write_capture(&temp, "serial.bin", &bytes);

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("failed to decode"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(&temp, "serial.bin", &VALID_FRAME);

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure();
}
