use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_lists_operator_commands() {
    let mut cmd = Command::cargo_bin("localcoin-ops").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("register-token"))
        .stdout(predicate::str::contains("request-settlement"));
}

#[test]
fn test_missing_config_store_fails_loudly() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no-such.env");

    let mut cmd = Command::cargo_bin("localcoin-ops").unwrap();
    cmd.arg("--env-file")
        .arg(&missing)
        .arg("remove-recipient")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config store"));
}

#[test]
fn test_subcommand_requires_package_id() {
    // A bootstrapped but not yet published store: keys exist, empty.
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join(".env");
    std::fs::write(&env_path, "PACKAGE_ID=''\nTOKEN_POLICY=''\n").unwrap();

    let mut cmd = Command::cargo_bin("localcoin-ops").unwrap();
    cmd.arg("--env-file")
        .arg(&env_path)
        .arg("remove-recipient")
        .arg("--address")
        .arg("0xaa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PACKAGE_ID"));
}
