//! CLI integration tests.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COMPOSE: &str = r#"
services:
  web:
    image: myapp:latest
  api:
    image: acme/api:${TAG:-dev}
    build:
      context: ./api
      dockerfile: Dockerfile.api
      args:
        VERSION:
"#;

fn project(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("compose.yaml"), contents).unwrap();
    dir
}

fn bake(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bake").unwrap();
    cmd.current_dir(dir)
        .env_remove("BAKE_FILE")
        .env_remove("TAG")
        .env_remove("VERSION")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn print_emits_json_definition() {
    let dir = project(COMPOSE);
    let output = bake(dir.path())
        .env("VERSION", "1.2.3")
        .arg("print")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["group"]["default"]["targets"], serde_json::json!(["api"]));
    assert_eq!(value["target"]["api"]["args"]["VERSION"], "1.2.3");
    assert_eq!(value["target"]["api"]["tags"], serde_json::json!(["acme/api:dev"]));
    assert!(value["target"].get("web").is_none());
}

#[test]
fn print_yaml() {
    let dir = project(COMPOSE);
    bake(dir.path())
        .args(["print", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dockerfile: Dockerfile.api"))
        .stdout(predicate::str::contains("VERSION").not());
}

#[test]
fn explicit_file_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack.yml");
    std::fs::write(&path, COMPOSE).unwrap();

    bake(dir.path())
        .arg("list")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("./api"))
        .stdout(predicate::str::contains("web").not());
}

#[test]
fn file_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack.yml");
    std::fs::write(&path, COMPOSE).unwrap();

    bake(dir.path())
        .env("BAKE_FILE", &path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 build target(s)"));
}

#[test]
fn invalid_service_fails() {
    let dir = project("services:\n  bad:\n    ports: ['80:80']\n");
    bake(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("service bad has neither an image nor a build context"));
}

#[test]
fn list_without_targets() {
    let dir = project("services:\n  web:\n    image: nginx\n");
    bake(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No build targets"));
}

#[test]
fn missing_compose_file() {
    let dir = tempfile::tempdir().unwrap();
    bake(dir.path())
        .arg("print")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No compose file found"));
}
