use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("zim-babel")
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture to exist")
}

#[test]
fn convert_wiki_to_html() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.arg("wiki").arg("html").write_stdin("====== Title ======\n**bold**\n");

    cmd.assert().success().stdout(
        predicate::str::contains("<h1 id=\"title\">Title</h1>")
            .and(predicate::str::contains("<strong>bold</strong>")),
    );
}

#[test]
fn wiki_round_trip_is_exact() {
    let source = fixture("kitchensink.txt");
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["zim", "zim", "--file-input", "--file-output"])
        .write_stdin(source.clone());

    cmd.assert().success().stdout(source);
}

#[test]
fn print_tree_without_target_format() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.arg("wiki").write_stdin("== Small ==\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"blocks\"").and(predicate::str::contains("\"heading\"")),
    );
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("markdown")
            .and(predicate::str::contains("aliases: md"))
            .and(predicate::str::contains("parse, dump")),
    );
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["wiki", "docx"]).write_stdin("text\n");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("format not found: docx"));
}

#[test]
fn dump_only_format_cannot_be_read() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["html", "wiki"]).write_stdin("<p>text</p>\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("format not found: html"));
}

#[test]
fn resources_go_to_stderr() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["wiki", "html", "--resources"])
        .write_stdin("{{./pics/a.png}}\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<img src=\"./pics/a.png\""))
        .stderr(predicate::str::contains("./pics/a.png"));
}

#[test]
fn flags_override_config() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["wiki", "latex", "--document-type", "article", "--standalone"])
        .write_stdin("====== Title ======\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\\documentclass{article}")
            .and(predicate::str::contains("\\section{Title}")),
    );
}

#[test]
fn config_file_is_layered() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[export]\nbase_dir = \"/notes\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["wiki", "html", "--config"])
        .arg(file.path())
        .write_stdin("{{./a.png}}\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("src=\"/notes/a.png\""));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("zim");
    cmd.args(["wiki", "html", "--config", "/nonexistent/zim.toml"])
        .write_stdin("text\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
