#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cvfs_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("cvfs"));
    cmd.arg("--home").arg(home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_capacity_and_naming_errors() {
    let home = TempDir::new().unwrap();
    let script = format!(
        "newDisk 200\n\
         newDoc a txt hello\n\
         newDir d\n\
         newDoc b txt {}\n\
         newDoc b txt z\n\
         rename a b\n\
         changeDir ..\n\
         rList\n\
         quit\n",
        "y".repeat(100)
    );

    cvfs_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("New virtual disk created with size 200"))
        .stdout(predicate::str::contains("Document Name: a, Type: txt, Size: 50"))
        .stdout(predicate::str::contains("Directory Name: d, Size: 40"))
        .stdout(predicate::str::contains("Document Name: b, Type: txt, Size: 42"))
        .stdout(predicate::str::contains("Total files: 3, Total size: 132"))
        .stdout(predicate::str::contains("Terminating the CVFS system."))
        .stderr(predicate::str::contains("Disk space exceeded"))
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("Already at the root directory"));
}

#[test]
fn test_undo_redo_round() {
    let home = TempDir::new().unwrap();
    cvfs_cmd(&home)
        .write_stdin(
            "newDisk 1000\n\
             newDir d\n\
             changeDir d\n\
             newDoc x java \"class X\"\n\
             undo\n\
             undo\n\
             list\n\
             redo\n\
             redo\n\
             redo\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Undo successful"))
        .stdout(predicate::str::contains("Redo successful"))
        .stdout(predicate::str::contains("Total files: 1, Total size: 40"))
        .stderr(predicate::str::contains("Nothing to redo"));
}

#[test]
fn test_criteria_and_search() {
    let home = TempDir::new().unwrap();
    cvfs_cmd(&home)
        .write_stdin(
            "newDisk 1000\n\
             newDoc notes txt hello\n\
             newDoc page html \"<p>hi</p>\"\n\
             newDir d\n\
             newSimpleCri ty type equals \"txt\"\n\
             newSimpleCri ty type equals \"txt\"\n\
             newNegation nt ty\n\
             newBinaryCri bc nt && IsDocument\n\
             printAllCriteria\n\
             search bc\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Binary criterion bc created."))
        .stdout(predicate::str::contains("IsDocument"))
        .stdout(predicate::str::contains("Document Name: page, Type: html"))
        .stdout(predicate::str::contains("Document Name: notes").not())
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_save_and_load_across_sessions() {
    let home = TempDir::new().unwrap();
    cvfs_cmd(&home)
        .write_stdin("newDisk 500\nnewDir keep\nnewSimpleCri sz size > 10\nsave backup\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Virtual disk saved to"));

    assert!(home.path().join("backup.cvfs").exists());

    cvfs_cmd(&home)
        .args(["--load", "backup"])
        .write_stdin("list\nprintAllCriteria\nundo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory Name: keep, Size: 40"))
        .stdout(predicate::str::contains("sz:"))
        .stderr(predicate::str::contains("Nothing to undo"));
}

#[test]
fn test_commands_before_a_disk_exists() {
    let home = TempDir::new().unwrap();
    cvfs_cmd(&home)
        .write_stdin("list\nfrobnicate\nnewDir\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: frobnicate"))
        .stderr(predicate::str::contains("No virtual disk loaded"))
        .stderr(predicate::str::contains("Usage: newDir dirName"));
}

#[test]
fn test_capacity_flag_creates_disk() {
    let home = TempDir::new().unwrap();
    cvfs_cmd(&home)
        .args(["--capacity", "100"])
        .write_stdin("newDoc a css x\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document Name: a, Type: css, Size: 42"));
}

#[test]
fn test_deep_tree_survives_save_and_load() {
    let home = TempDir::new().unwrap();
    let mut script = String::from("newDisk 10000\n");
    for level in 0..80 {
        script.push_str(&format!("newDir d{0}\nchangeDir d{0}\n", level));
    }
    script.push_str("save deep\n");

    cvfs_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Error").not());

    // A directory at level k holds the 79 - k directories below it.
    cvfs_cmd(&home)
        .args(["--load", "deep"])
        .write_stdin("rList\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 80, Total size: 129600"))
        .stderr(predicate::str::contains("Error").not());
}

#[test]
fn test_unreadable_config_falls_back_to_defaults() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.json"), "{ not json").unwrap();

    cvfs_cmd(&home)
        .args(["--capacity", "100"])
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring unreadable config"))
        .stdout(predicate::str::contains("Total files: 0, Total size: 0"));
}
