use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

/// A `theia` invocation pointed at `server`, isolated from any real user
/// config (fresh HOME, no THEIA_CONFIG).
fn theia(server: &str, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("theia").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("THEIA_CONFIG")
        .env("THEIA_SERVER", server);
    cmd
}

// ---------------------------------------------------------------------------
// theia ping
// ---------------------------------------------------------------------------

#[test]
fn ping_prints_backend_message() {
    let mut server = Server::new();
    server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body(r#"{"message": "pong"}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .arg("ping")
        .assert()
        .success()
        .stdout(predicate::str::contains("pong"));
}

#[test]
fn ping_unreachable_backend_fails() {
    // Nothing listens here
    let home = TempDir::new().unwrap();
    theia("http://127.0.0.1:1", &home)
        .arg("ping")
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend unreachable"));
}

// ---------------------------------------------------------------------------
// theia alert trigger
// ---------------------------------------------------------------------------

#[test]
fn alert_counts_down_and_sends() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/alerts/fall")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "user_id": 1,
            "source": "theia-cli"
        })))
        .with_status(200)
        .with_body(r#"{"status": "ok", "message": "Fall alert received. Contacts notified."}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["alert", "trigger", "--countdown", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sending fall alert in 1 s"))
        .stdout(predicate::str::contains(
            "Success: Fall alert received. Contacts notified.",
        ));
    mock.assert();
}

#[test]
fn alert_enter_cancels_before_dispatch() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/alerts/fall")
        .expect(0)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["alert", "trigger", "--countdown", "5"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    mock.assert();
}

#[test]
fn alert_rejection_is_reported_and_fails() {
    let mut server = Server::new();
    server
        .mock("POST", "/alerts/fall")
        .with_status(500)
        .with_body("")
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["alert", "trigger", "--countdown", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error 500: Internal Server Error"));
}

#[test]
fn alert_json_reports_outcome() {
    let mut server = Server::new();
    server
        .mock("POST", "/alerts/fall")
        .with_status(200)
        .with_body(r#"{"message": "Fall alert received. Contacts notified."}"#)
        .create();
    let home = TempDir::new().unwrap();

    let assert = theia(&server.url(), &home)
        .args(["--json", "alert", "trigger", "--countdown", "1"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["outcome"], "sent");
    assert_eq!(report["message"], "Fall alert received. Contacts notified.");
    assert!(report["at"].is_string());
}

#[test]
fn alert_zero_countdown_is_rejected() {
    let home = TempDir::new().unwrap();
    theia("http://127.0.0.1:1", &home)
        .args(["alert", "trigger", "--countdown", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("countdown"));
}

// ---------------------------------------------------------------------------
// theia guidance
// ---------------------------------------------------------------------------

#[test]
fn guidance_renders_summary_and_steps() {
    let mut server = Server::new();
    server
        .mock("POST", "/guidance/route")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "current_location": "Room 12",
            "destination": "Atrium"
        })))
        .with_status(200)
        .with_body(
            r#"{"summary": "Head to the Atrium",
                "steps": [{"order": 1, "instruction": "Proceed forward 10 meters"},
                          {"order": 2, "instruction": "Turn right"}]}"#,
        )
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["guidance", "--from", "Room 12", "--to", "Atrium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Head to the Atrium"))
        .stdout(predicate::str::contains("1. Proceed forward 10 meters"))
        .stdout(predicate::str::contains("2. Turn right"));
}

#[test]
fn guidance_defaults_blank_locations() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/guidance/route")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "current_location": "Current hallway",
            "destination": "Next classroom"
        })))
        .with_status(200)
        .with_body(r#"{"summary": "ok", "steps": []}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .arg("guidance")
        .assert()
        .success();
    mock.assert();
}

// ---------------------------------------------------------------------------
// theia manager login
// ---------------------------------------------------------------------------

#[test]
fn manager_login_success() {
    let mut server = Server::new();
    server
        .mock("POST", "/manager/login")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "login", "--username", "managername", "--password", "111111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful"));
}

#[test]
fn manager_login_bad_credentials() {
    let mut server = Server::new();
    server
        .mock("POST", "/manager/login")
        .with_status(404)
        .with_body(r#"{"detail": "account not found"}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "login", "--username", "managername", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

// ---------------------------------------------------------------------------
// theia manager hallways
// ---------------------------------------------------------------------------

const HALLWAYS_BODY: &str = r#"[
    {"id": 1, "name": "North Connector", "status": "available"},
    {"id": 2, "name": "Atrium Passage", "status": "under_construction",
     "description": "Second floor link"},
    {"id": 3, "name": "South Wing Link", "status": "available"}]"#;

#[test]
fn hallways_list_renders_table() {
    let mut server = Server::new();
    server
        .mock("GET", "/building-map/hallways")
        .with_status(200)
        .with_body(HALLWAYS_BODY)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "hallways", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("North Connector"))
        .stdout(predicate::str::contains("under construction"))
        .stdout(predicate::str::contains("Second floor link"));
}

#[test]
fn hallways_set_reports_reconciled_state() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/building-map/hallways/2")
        .match_body(Matcher::PartialJson(serde_json::json!({"status": "available"})))
        .with_status(200)
        .with_body(r#"{"id": 2, "name": "Atrium Passage", "status": "available"}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "hallways", "set", "2", "available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set Atrium Passage to available"));
    mock.assert();
}

#[test]
fn hallways_set_invalid_status_fails() {
    let home = TempDir::new().unwrap();
    theia("http://127.0.0.1:1", &home)
        .args(["manager", "hallways", "set", "2", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hallway status"));
}

#[test]
fn hallways_toggle_flips_current_status() {
    let mut server = Server::new();
    server
        .mock("GET", "/building-map/hallways")
        .with_status(200)
        .with_body(HALLWAYS_BODY)
        .create();
    // Hallway 1 is available, so the toggle must PUT under_construction
    let put = server
        .mock("PUT", "/building-map/hallways/1")
        .match_body(Matcher::PartialJson(
            serde_json::json!({"status": "under_construction"}),
        ))
        .with_status(200)
        .with_body(r#"{"id": 1, "name": "North Connector", "status": "under_construction"}"#)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "hallways", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set North Connector to under construction",
        ));
    put.assert();
}

#[test]
fn hallways_toggle_unknown_id_fails() {
    let mut server = Server::new();
    server
        .mock("GET", "/building-map/hallways")
        .with_status(200)
        .with_body(HALLWAYS_BODY)
        .create();
    let home = TempDir::new().unwrap();

    theia(&server.url(), &home)
        .args(["manager", "hallways", "toggle", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hallway 99 not found"));
}

#[test]
fn hallways_list_json_is_parseable() {
    let mut server = Server::new();
    server
        .mock("GET", "/building-map/hallways")
        .with_status(200)
        .with_body(HALLWAYS_BODY)
        .create();
    let home = TempDir::new().unwrap();

    let assert = theia(&server.url(), &home)
        .args(["--json", "manager", "hallways", "list"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let hallways: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(hallways.as_array().unwrap().len(), 3);
    assert_eq!(hallways[1]["status"], "under_construction");
}

// ---------------------------------------------------------------------------
// Config file handling
// ---------------------------------------------------------------------------

#[test]
fn config_file_supplies_server_and_subject() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/alerts/fall")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "user_id": 42,
            "source": "wearable"
        })))
        .with_status(200)
        .with_body(r#"{"message": "Fall alert sent."}"#)
        .create();

    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "server: {}\nsubject_id: 42\nsource: wearable\ncountdown_seconds: 1\n",
            server.url()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("theia").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("THEIA_SERVER")
        .env("THEIA_CONFIG", &config_path)
        .args(["alert", "trigger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Fall alert sent."));
    mock.assert();
}

#[test]
fn missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("theia").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("THEIA_SERVER")
        .env("THEIA_CONFIG", home.path().join("nope.yaml"))
        .arg("ping")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
