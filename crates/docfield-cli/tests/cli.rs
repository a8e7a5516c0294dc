//! End-to-end tests for the `docfield` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LICENSE: &str = "Name John Smith S/O Robert Smith\nDL NO ABC1234567 DOI 01-01-2020\n\
                       Valid Till 01-01-2030\nDOB 05-05-1990\n";

const PASSPORT: &str = "REPUBLIC OF INDIA Passport No A1234567\n\
                        P<INDSMITH<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<";

/// Tests always pass an explicit config so a user's config file is never read.
fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, contents).unwrap();
    path
}

fn docfield(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docfield").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn extract_driving_license_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let input = dir.path().join("license.txt");
    fs::write(&input, LICENSE).unwrap();

    docfield(&config)
        .args(["extract", "-t", "driving_license"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"name":"John Smith","documentNumber":"ABC1234567","expirationDate":"01-01-2030","dateOfBirth":"05-05-1990"}"#,
        ));
}

#[test]
fn extract_passport_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["extract", "-t", "passport", "-"])
        .write_stdin(PASSPORT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"SMITH JOHN""#))
        .stdout(predicate::str::contains(r#""documentNumber":"A1234567""#))
        .stdout(predicate::str::contains(r#""dateOfBirth":"Not found""#));
}

#[test]
fn extract_json_wrapped_input() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let wrapped = serde_json::json!({ "extractedText": LICENSE }).to_string();

    docfield(&config)
        .args(["extract", "-"])
        .write_stdin(wrapped)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""documentNumber":"ABC1234567""#));
}

#[test]
fn extract_request_declares_type() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let request = serde_json::json!({ "text": PASSPORT, "documentType": "passport" }).to_string();

    docfield(&config)
        .args(["extract", "--request", "-"])
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"SMITH JOHN""#));
}

#[test]
fn extract_request_rejects_non_string_text() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["extract", "--request", "-"])
        .write_stdin(r#"{"text": 42, "documentType": "passport"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a string"));
}

#[test]
fn extract_unknown_type_reports_nothing_found() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["extract", "-t", "national_id", "-"])
        .write_stdin(LICENSE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"name":"Not found","documentNumber":"Not found","expirationDate":"Not found","dateOfBirth":"Not found"}"#,
        ));
}

#[test]
fn extract_csv_format() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["extract", "-f", "csv", "-"])
        .write_stdin(LICENSE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "name,documentNumber,expirationDate,dateOfBirth\nJohn Smith,ABC1234567,01-01-2030,05-05-1990",
        ));
}

#[test]
fn extract_text_format_to_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let output = dir.path().join("out.txt");

    docfield(&config)
        .args(["extract", "-f", "text", "-o"])
        .arg(&output)
        .arg("-")
        .write_stdin(LICENSE)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Name: John Smith\n"));
    assert!(written.contains("Date of birth: 05-05-1990\n"));
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["extract"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_default_document_type_applies() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"{"extraction": {"default_document_type": "passport"}}"#,
    );

    docfield(&config)
        .args(["extract", "-"])
        .write_stdin(PASSPORT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"SMITH JOHN""#));
}

#[test]
fn config_debug_dump_wraps_raw_text() {
    let dir = TempDir::new().unwrap();
    let dump = dir.path().join("data.json");
    let config = write_config(
        dir.path(),
        &serde_json::json!({ "output": { "debug_dump": dump } }).to_string(),
    );

    docfield(&config)
        .args(["extract", "-"])
        .write_stdin(LICENSE)
        .assert()
        .success();

    let dumped: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&dump).unwrap()).unwrap();
    assert_eq!(dumped["extractedText"], LICENSE);
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("first.txt"), LICENSE).unwrap();
    fs::write(scans.join("second.txt"), "nothing useful here").unwrap();

    docfield(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", scans.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"));

    let first = fs::read_to_string(out.join("first.json")).unwrap();
    assert!(first.contains(r#""documentNumber":"ABC1234567""#));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,name,documentNumber"));
    assert!(summary.contains("first.txt,success,John Smith,ABC1234567,01-01-2030,05-05-1990,"));
    assert!(summary.contains("second.txt,success,Not found,Not found,Not found,Not found,"));
}

#[test]
fn batch_continue_on_error_records_failures() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("good.json"), r#"{"text": "DOB 05-05-1990"}"#).unwrap();
    fs::write(scans.join("bad.json"), r#"{"text": ["DOB"]}"#).unwrap();

    docfield(&config)
        .arg("batch")
        .arg(format!("{}/*.json", scans.display()))
        .args(["--request", "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("bad.json,error"));
    assert!(summary.contains("good.json,success"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_get_reads_the_given_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"{"extraction": {"default_document_type": "passport"}}"#,
    );

    docfield(&config)
        .args(["config", "get", "extraction.default_document_type"])
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passport\""));
}

#[test]
fn config_set_writes_the_given_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");

    docfield(&config)
        .args(["config", "set", "output.pretty", "true"])
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(written["output"]["pretty"], true);
    assert!(!dir.path().join("xdg").exists());
}

#[test]
fn config_show_and_path_use_the_given_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), r#"{"output": {"pretty": true}}"#);

    docfield(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pretty\": true"));

    docfield(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn batch_keeps_inputs_sharing_a_stem_apart() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "{}");
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("scan.txt"), LICENSE).unwrap();
    fs::write(scans.join("scan.json"), r#"{"extractedText": "DOB 01-02-1985"}"#).unwrap();

    docfield(&config)
        .arg("batch")
        .arg(format!("{}/scan.*", scans.display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let from_txt = fs::read_to_string(out.join("scan.txt.json")).unwrap();
    assert!(from_txt.contains(r#""dateOfBirth":"05-05-1990""#));

    let from_json = fs::read_to_string(out.join("scan.json.json")).unwrap();
    assert!(from_json.contains(r#""dateOfBirth":"01-02-1985""#));
}
