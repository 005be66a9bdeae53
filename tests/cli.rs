use assert_cmd::Command;
use predicates::prelude::*;

fn larder() -> Command {
    let mut cmd = Command::cargo_bin("larder").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("LARDER_CONFIG")
        .env_remove("LARDER_API_URL")
        .env_remove("LARDER_TOKEN")
        .env_remove("LARDER_TIMEOUT_SECS");
    cmd
}

#[test]
fn help_lists_resources() {
    larder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reviews").and(predicate::str::contains("ingredients")));
}

#[test]
fn bad_id_is_a_usage_error() {
    larder()
        .args(["reviews", "get", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn unreachable_server_fails_with_message() {
    larder()
        .args(["--api-url", "http://127.0.0.1:1/", "reviews", "get", "1"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn missing_config_file_fails() {
    larder()
        .args(["--config", "/nonexistent/larder.toml", "users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
