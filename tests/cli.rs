use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn forkly(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("forkly").unwrap();
    cmd.env("FORKLY_DATA_DIR", data_dir.path())
        .env_remove("FORKLY_BACKEND_URL")
        .env_remove("FORKLY_ANON_KEY")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("onboard"))
        .stdout(predicate::str::contains("lists"))
        .stdout(predicate::str::contains("nearby"));
}

#[test]
fn test_config_shows_defaults() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forkly Configuration"))
        .stdout(predicate::str::contains("not set"))
        .stdout(predicate::str::contains("3 to 6"));
}

#[test]
fn test_backend_url_override_is_shown() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .args(["config", "--backend-url", "https://demo.example.co/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://demo.example.co"));
}

#[test]
fn test_session_when_signed_out() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .arg("session")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_history_starts_empty() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded yet"));
}

#[test]
fn test_lists_need_backend_configuration() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .args(["lists", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backend URL and anon key must be set"));
}

#[test]
fn test_nearby_rejects_bad_coordinates_before_calling_backend() {
    let temp = TempDir::new().unwrap();
    forkly(&temp)
        .args([
            "nearby",
            "--lat",
            "123",
            "--lng",
            "-46.6",
            "--backend-url",
            "http://127.0.0.1:9",
            "--anon-key",
            "anon",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinates"));
}
