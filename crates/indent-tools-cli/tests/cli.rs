use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const ADDRESS_XML: &str = "<address type=\"Residential\">
  <street>123 Main St</street>
  <city>Bremerton</city>
  <state>WA</state>
  <zip_code>98310</zip_code>
</address>
";

fn cli() -> Command {
    Command::cargo_bin("indent-tools").unwrap()
}

#[test]
fn test_reformats_stdin() {
    cli()
        .write_stdin(
            "<address type='Residential'><street>123 Main St</street><city>Bremerton</city>\
             <state>WA</state><zip_code>98310</zip_code></address>",
        )
        .assert()
        .success()
        .stdout(ADDRESS_XML);
}

#[test]
fn test_html_flavor_from_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("out.html");
    fs::write(
        &input,
        "<!DOCTYPE html><HTML><head><meta charset=\"utf-8\"><title>Example</title></head></HTML>",
    )
    .unwrap();

    cli()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>Example</title>\n  </head>\n</html>\n"
    );
}

#[test]
fn test_custom_indent() {
    cli()
        .args(["--flavor", "xml", "--indent", "4"])
        .write_stdin("<a><b/></a>")
        .assert()
        .success()
        .stdout("<a>\n    <b />\n</a>\n");
}

#[test]
fn test_check_mode_writes_nothing() {
    cli()
        .arg("--check")
        .write_stdin(ADDRESS_XML)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_parse_error_is_reported() {
    cli()
        .write_stdin("<a><b></a>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mismatched closing tag"));
}

#[test]
fn test_missing_input_file() {
    cli()
        .arg("does-not-exist.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn test_empty_stdin() {
    cli()
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input provided"));
}

#[test]
fn test_flavor_names() {
    cli()
        .args(["--flavor", "HTM"])
        .write_stdin("<DIV><BR></DIV>")
        .assert()
        .success()
        .stdout("<div>\n  <br />\n</div>\n");

    cli()
        .args(["--flavor", "json"])
        .write_stdin("<a/>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown markup flavor `json`"));
}
