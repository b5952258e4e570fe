use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_cli_reports_file_statistics() {
    let file = input_file("Hello world! Hello universe. Cats, dogs, and birds.");

    cargo_bin_cmd!("wordstats")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Stream Statistics ---"))
        .stdout(predicate::str::contains("Total Characters: 51"))
        .stdout(predicate::str::contains("Total Words: 8"))
        .stdout(predicate::str::contains("hello: 2"));
}

#[test]
fn test_cli_reads_stdin() {
    cargo_bin_cmd!("wordstats")
        .write_stdin("a an ant")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 5 Smallest Words:\na (1)\nan (2)\nant (3)"));
}

#[test]
fn test_cli_interval_flag_emits_multiple_reports() {
    let output = cargo_bin_cmd!("wordstats")
        .args(["--interval", "10", "--chunk-size", "5", "--format", "json"])
        .write_stdin("aaaa bbbb cccc dddd ")
        .output()
        .expect("Failed to run wordstats");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let kinds: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["interval", "interval", "final"]);
}

#[test]
fn test_cli_config_file() {
    let config = input_file("top_k = 1\n");

    cargo_bin_cmd!("wordstats")
        .arg("--config")
        .arg(config.path())
        .write_stdin("tiny enormous")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 1 Largest Words:\nenormous (8)\n"));
}

#[test]
fn test_cli_rejects_zero_top_k() {
    cargo_bin_cmd!("wordstats")
        .args(["--top-k", "0"])
        .write_stdin("words")
        .assert()
        .failure()
        .stderr(predicate::str::contains("top-k"));
}

#[test]
fn test_cli_with_nonexistent_file() {
    cargo_bin_cmd!("wordstats")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}
