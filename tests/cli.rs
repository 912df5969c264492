mod common;

use assert_cmd::Command;
use common::{FULL_HEADER, TestWorkspace, csv, full_row};
use predicates::str::contains;

#[test]
fn split_writes_three_tables() {
    let ws = TestWorkspace::new();
    ws.write_source(
        "bank_0",
        &csv(FULL_HEADER, &[full_row(7, "blue-collar", "basic.4y", "3", "nov")]),
    );

    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .args([
            "split",
            "-i",
            ws.input().to_str().unwrap(),
            "-o",
            ws.output().to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        ws.read_output("client.csv"),
        "client_id,age,job,marital,education,credit_default,mortage\n\
         7,37,blue_collar,married,basic_4y,0,1\n"
    );
    assert!(ws.read_output("campaign.csv").ends_with("7,1,120,0,0,0,2022-11-03\n"));
    assert!(ws.read_output("economics.csv").ends_with("7,93.994,4.857\n"));
}

#[test]
fn split_defaults_to_files_directories() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(ws.path().join("files").join("input")).unwrap();
    let archive = ws.write_source("bank", &csv(FULL_HEADER, &[full_row(1, "admin.", "unknown", "1", "jan")]));
    std::fs::rename(&archive, ws.path().join("files").join("input").join("bank.csv.zip")).unwrap();

    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .current_dir(ws.path())
        .arg("split")
        .assert()
        .success();

    let client = std::fs::read_to_string(ws.path().join("files/output/client.csv")).unwrap();
    assert!(client.ends_with("1,31,admin,married,,0,1\n"));
}

#[test]
fn split_prints_summary_with_semicolon_sources() {
    let ws = TestWorkspace::new();
    ws.write_source(
        "semi",
        "client_id;age;job;day;month\n5;29;entrepreneur;12;jul\n5;30;entrepreneur;13;jul\n",
    );
    ws.write_zip("empty.zip", &[("notes.md", "# nothing")]);

    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .args([
            "split",
            "-i",
            ws.input().to_str().unwrap(),
            "-o",
            ws.output().to_str().unwrap(),
            "--delimiter",
            ";",
            "--summary",
        ])
        .assert()
        .success()
        .stdout(contains("semi.csv.zip"))
        .stdout(contains("skipped: no csv entry"))
        .stdout(contains("total (deduplicated)"));

    assert_eq!(ws.read_output("client.csv").lines().count(), 2);
    assert!(ws.read_output("campaign.csv").ends_with("5,,,,0,0,2022-07-12\n"));
}

#[test]
fn split_fails_when_no_archive_is_readable() {
    let ws = TestWorkspace::new();
    ws.write_input_file("broken.zip", "not a zip");

    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .args([
            "split",
            "-i",
            ws.input().to_str().unwrap(),
            "-o",
            ws.output().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("no readable source archives"));
}

#[test]
fn split_fails_for_missing_input_directory() {
    let ws = TestWorkspace::new();
    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .args([
            "split",
            "-i",
            ws.path().join("absent").to_str().unwrap(),
            "-o",
            ws.output().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("Reading input directory"));
}

#[test]
fn split_rejects_unknown_encoding() {
    let ws = TestWorkspace::new();
    Command::cargo_bin("campaign-split")
        .expect("binary exists")
        .args([
            "split",
            "-i",
            ws.input().to_str().unwrap(),
            "--input-encoding",
            "klingon",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown encoding 'klingon'"));
}
