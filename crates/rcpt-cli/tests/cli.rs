use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const COSTCO: &str = "Costco Wholesale
Paper Towels $12.99
Promotion -$2.00
Subtotal $10.99
Grand Total $10.99
";

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.env("RCPT_CONFIG", home.path().join("config.json"));
    cmd
}

#[test]
fn interpret_stdin_json() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("interpret")
        .write_stdin(COSTCO)
        .assert()
        .success()
        .stdout(contains(r#""store_name":"Costco Wholesale""#))
        .stdout(contains(r#""total_amount":"10.99""#))
        .stdout(contains(r#""category":"Groceries""#))
        .stdout(contains(r#"{"name":"Promotion for Paper Towels","amount":"-2.00"}"#));
}

#[test]
fn interpret_file_csv() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("costco.txt");
    fs::write(&input, COSTCO).unwrap();

    cmd(&home)
        .args(["interpret", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("store_name,receipt_date,category,total_amount,item_name,item_amount"))
        .stdout(contains("Costco Wholesale,,Groceries,10.99,Paper Towels,12.99"));
}

#[test]
fn interpret_submission() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "--submission", "-"])
        .write_stdin("Corner Cafe\nLatte $4.50\nWater 0.00\nScone $3.25\nCash $10.00")
        .assert()
        .success()
        .stdout(contains(r#""total":"7.75""#))
        .stdout(contains("Water").not());
}

#[test]
fn interpret_upload_text_and_file_output() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.json");

    cmd(&home)
        .args(["interpret", "--upload", "--output"])
        .arg(&out)
        .write_stdin(COSTCO)
        .assert()
        .success()
        .stderr(contains("Output written to"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains(r#""message":"OCR extraction successful""#));
    assert!(!written.contains("raw_text"));
}

#[test]
fn upload_and_submission_conflict() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "--upload", "--submission"])
        .write_stdin(COSTCO)
        .assert()
        .failure();
}

#[test]
fn interpret_missing_file() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["interpret", "no-such-receipt.txt"])
        .assert()
        .failure()
        .stderr(contains("Input file not found"));
}

#[test]
fn scan_unreadable_image() {
    let home = TempDir::new().unwrap();
    let image = home.path().join("receipt.png");
    fs::write(&image, "definitely not a png").unwrap();

    cmd(&home)
        .arg("scan")
        .arg(&image)
        .assert()
        .failure()
        .stderr(contains("could not read the image"));
}

#[test]
fn batch_summary_of_text_files() {
    let home = TempDir::new().unwrap();
    let inbox = home.path().join("inbox");
    fs::create_dir(&inbox).unwrap();
    fs::write(inbox.join("costco.txt"), COSTCO).unwrap();
    fs::write(inbox.join("lyft.txt"), "Lyft\n03/01/2024\nRide $18.40\n").unwrap();

    let pattern = format!("{}/*.txt", inbox.display());
    let out_dir = home.path().join("out");

    cmd(&home)
        .args(["batch", &pattern, "--summary", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(contains("2 succeeded, 0 failed"));

    assert!(out_dir.join("costco.json").exists());
    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains(",ok,Costco Wholesale,,Groceries,10.99,2,,"));
    assert!(summary.contains(",ok,Lyft,03/01/2024,Transportation,18.40,1,,"));
}

#[test]
fn batch_continue_on_error() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("a.txt"), "Uber\nTrip $9.00").unwrap();
    fs::write(home.path().join("b.png"), "not an image").unwrap();

    let pattern = format!("{}/*", home.path().display());

    cmd(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(contains(",ok,Uber,"))
        .stdout(contains(",error,"))
        .stderr(contains("1 succeeded, 1 failed"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("b.png"), "not an image").unwrap();

    let pattern = format!("{}/*.png", home.path().display());

    cmd(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(contains("could not read the image"));
}

#[test]
fn config_init_set_get() {
    let home = TempDir::new().unwrap();

    cmd(&home).args(["config", "init"]).assert().success();
    cmd(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    cmd(&home)
        .args(["config", "set", "output.format", "text"])
        .assert()
        .success();
    cmd(&home)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(contains("\"text\""));

    cmd(&home)
        .arg("interpret")
        .write_stdin(COSTCO)
        .assert()
        .success()
        .stdout(contains("Store: Costco Wholesale"))
        .stdout(contains("Total: 10.99"));
}

#[test]
fn config_set_rejects_unknown_and_ill_typed_keys() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["config", "set", "output.colour", "red"])
        .assert()
        .failure()
        .stderr(contains("Configuration key not found"));

    cmd(&home)
        .args(["config", "set", "output.pretty", "sometimes"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for output.pretty"));
}
