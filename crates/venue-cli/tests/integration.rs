#![allow(deprecated)]
use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

fn venue(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("venue").unwrap();
    cmd.current_dir(dir.path()).env("VENUE_ROOT", dir.path());
    cmd
}

fn write_config(dir: &TempDir, base_url: &str) {
    std::fs::create_dir_all(dir.path().join(".venue")).unwrap();
    let yaml = format!(
        "version: 1\n\
         api:\n  base_url: {base_url}\n  timeout_secs: 5\n\
         vip:\n  - operator: op@x.com\n    names: [\"João Silva\", \"Ana Costa\"]\n"
    );
    std::fs::write(dir.path().join(".venue/config.yaml"), yaml).unwrap();
}

fn write_snapshot(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    path
}

const RESERVATIONS: &str = r#"{
    "guest_lists": [
        {"id": 1, "owner_name": "Bia", "owner_checked_in": 1},
        {"id": 2, "owner_name": "Rui", "owner_checked_in": 0}
    ],
    "restaurant_reservations": [
        {"id": 10, "guest_list_id": 1},
        {"id": 11, "guest_list_id": "2"},
        {"id": 12, "name": "Ana", "guest_list_id": null, "checked_in": true}
    ],
    "loaded_guests": {
        "1": [
            {"id": 1, "checked_in": 1},
            {"id": 2, "checked_in": true},
            {"id": 3, "checked_in": 0}
        ]
    },
    "status_cache": {
        "2": {"totalGuests": 4, "guestsCheckedIn": "1"}
    }
}"#;

// ---------------------------------------------------------------------------
// venue init / config
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    venue(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .venue/config.yaml"));
    assert!(dir.path().join(".venue/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "https://api.example.com");
    venue(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .venue/config.yaml"));

    let content = std::fs::read_to_string(dir.path().join(".venue/config.yaml")).unwrap();
    assert!(content.contains("https://api.example.com"));
}

#[test]
fn default_config_validates() {
    let dir = TempDir::new().unwrap();
    venue(&dir).arg("init").assert().success();
    venue(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_bad_base_url() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "api.example.com");
    venue(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stderr(predicate::str::contains("config validation found errors"));
}

#[test]
fn config_show_json() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "https://api.example.com");
    let output = venue(&dir).args(["config", "show", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["api"]["base_url"], "https://api.example.com");
    assert_eq!(json["vip"][0]["operator"], "op@x.com");
}

#[test]
fn commands_needing_config_fail_before_init() {
    let dir = TempDir::new().unwrap();
    venue(&dir)
        .args(["vip", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// venue metrics
// ---------------------------------------------------------------------------

#[test]
fn metrics_reservations_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "reservations.json", RESERVATIONS);
    let output = venue(&dir)
        .args(["metrics", "reservations", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 10);
    assert_eq!(json["checkins"], 5);
    assert_eq!(json["num_reservas"], 3);
    assert_eq!(json["source"], "loaded_lists");
}

#[test]
fn metrics_summary_from_stdin() {
    let dir = TempDir::new().unwrap();
    let snapshot = format!(
        r#"{{
            "reservations": {RESERVATIONS},
            "promoter_entries": [{{"name": "A", "status": "Check-in"}}, {{"name": "B", "status": "Pending"}}],
            "lounge_entries": [{{"name": "Box 1", "capacity": 8, "checked_in_count": 5}}]
        }}"#
    );
    venue(&dir)
        .args(["metrics", "summary", "-"])
        .write_stdin(snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("total         20"))
        .stdout(predicate::str::contains("loaded_lists"));
}

#[test]
fn metrics_reject_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "broken.json", "{ not json");
    venue(&dir)
        .args(["metrics", "reservations"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot is not valid JSON"));
}

// ---------------------------------------------------------------------------
// venue vip
// ---------------------------------------------------------------------------

#[test]
fn vip_check_is_case_and_whitespace_insensitive() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "https://api.example.com");
    venue(&dir)
        .args(["vip", "check", "OP@X.COM", "  joão silva "])
        .assert()
        .success()
        .stdout(predicate::str::contains("VIP for"));
}

#[test]
fn vip_check_has_no_partial_matches() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "https://api.example.com");
    let output = venue(&dir)
        .args(["vip", "check", "op@x.com", "João", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["vip"], false);
}

#[test]
fn vip_list_shows_every_name() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "https://api.example.com");
    venue(&dir)
        .args(["vip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("João Silva"))
        .stdout(predicate::str::contains("Ana Costa"));
}

#[test]
fn vip_list_without_lists_says_so() {
    let dir = TempDir::new().unwrap();
    venue(&dir).arg("init").assert().success();
    venue(&dir)
        .args(["vip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No VIP lists configured."));
}

// ---------------------------------------------------------------------------
// venue conduction
// ---------------------------------------------------------------------------

#[test]
fn conduction_parse_guest_id() {
    let dir = TempDir::new().unwrap();
    let output = venue(&dir)
        .args(["conduction", "parse", "guest-12-40", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["entity_type"], "guest");
    assert_eq!(json["entity_id"], 40);
    assert_eq!(json["guest_list_id"], 12);
}

#[test]
fn conduction_parse_unknown_shape_never_fails() {
    let dir = TempDir::new().unwrap();
    let output = venue(&dir)
        .args(["conduction", "parse", "table-x", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["entity_type"], "reservation_owner");
    assert_eq!(json["entity_id"], 0);
}

#[test]
fn conduction_list_treats_404_as_empty() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/conduction")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let dir = TempDir::new().unwrap();
    write_config(&dir, &server.url());
    venue(&dir)
        .args(["conduction", "list", "--establishment", "3", "--date", "2026-10-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing conduced on 2026-10-17"));
}

#[test]
fn conduction_confirm_sends_derived_payload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/conduction")
        .match_body(Matcher::Json(serde_json::json!({
            "establishment_id": 3,
            "flow_date": "2026-10-17",
            "queue_item_id": "owner-5",
            "entity_type": "owner",
            "entity_id": 5,
            "guest_list_id": 5,
            "reservation_id": 40
        })))
        .with_status(200)
        .create();

    let dir = TempDir::new().unwrap();
    write_config(&dir, &server.url());
    venue(&dir)
        .args([
            "conduction",
            "confirm",
            "owner-5",
            "--establishment",
            "3",
            "--date",
            "2026-10-17",
            "--reservation-id",
            "40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conduced: owner-5"));
    mock.assert();
}

#[test]
fn conduction_confirm_surfaces_upstream_message() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/conduction")
        .with_status(422)
        .with_body(r#"{"message":"flow_date is closed"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    write_config(&dir, &server.url());
    venue(&dir)
        .args([
            "conduction",
            "confirm",
            "reservation-9",
            "--establishment",
            "3",
            "--date",
            "2026-10-17",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flow_date is closed"));
}
