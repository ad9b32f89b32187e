//! End-to-end smoke tests for the intake binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn intake() -> Command {
    Command::cargo_bin("intake").unwrap()
}

#[test]
fn test_extract_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.txt");
    fs::write(
        &input,
        "Invoice No: INV-100\nDate: 15/03/2024\nTotal: QAR 1,234.56\n",
    )
    .unwrap();

    intake()
        .arg("extract")
        .arg(&input)
        .arg("--reference-date")
        .arg("2024-04-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-100"))
        .stdout(predicate::str::contains("20240315"))
        .stdout(predicate::str::contains("1234.56"))
        .stdout(predicate::str::contains("QAR"));
}

#[test]
fn test_extract_rejects_unsupported_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, "Total: 10.00\n").unwrap();

    intake()
        .arg("extract")
        .arg(&input)
        .arg("--source")
        .arg("invoice.docx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn test_sheet_csv_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("items.csv");
    fs::write(
        &input,
        "Decathlon SKU,QTY,Unit Cost without VAT\n8569472,10,50.5\n",
    )
    .unwrap();

    intake()
        .arg("sheet")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("8569472"));
}

#[test]
fn test_merge_with_manual_entries() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("items.csv");
    fs::write(&sheet, "Decathlon SKU,QTY\n8569472,10\n").unwrap();
    let manual = dir.path().join("manual.json");
    fs::write(&manual, r#"[{"barcode": "123456789", "model": ""}]"#).unwrap();

    intake()
        .arg("merge")
        .arg(&sheet)
        .arg("--manual")
        .arg(&manual)
        .arg("--supplier-code")
        .arg("5432")
        .assert()
        .success()
        .stdout(predicate::str::contains("00054328569472"))
        .stdout(predicate::str::contains("123456789"));
}

#[test]
fn test_config_show_defaults() {
    intake()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("decathlon_sku"));
}
