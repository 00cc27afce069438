use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn mesostic() -> Command {
    Command::cargo_bin("mesostic").expect("binary")
}

#[test]
fn compose_plain_echoes_selected_lines() {
    mesostic()
        .args(["compose", "--spine", "rp", "--plain"])
        .write_stdin("river\nplain")
        .assert()
        .success()
        .stdout("river\nplain\n");
}

#[test]
fn compose_aligns_and_marks_the_spine() {
    mesostic()
        .args(["compose", "--spine", "RIP"])
        .write_stdin("road\nmist\nplain")
        .assert()
        .success()
        .stdout(" Road\nmIst\n Plain\n");
}

#[test]
fn compose_reads_from_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("source.txt");
    fs::write(&path, "parallel").unwrap();

    mesostic()
        .args(["compose", "--spine", "PA"])
        .arg(&path)
        .assert()
        .success()
        .stdout("PArallel\n");
}

#[test]
fn unplaceable_spine_fails_with_message() {
    mesostic()
        .args(["compose", "--spine", "z"])
        .write_stdin("ab\ncd")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn empty_spine_fails_with_message() {
    mesostic()
        .args(["compose", "--spine", "1234"])
        .write_stdin("some text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alphabetic"));
}

#[test]
fn missing_file_reports_path() {
    mesostic()
        .args(["compose", "--spine", "a", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-file.txt"));
}
