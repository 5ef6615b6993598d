#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOW: &str = "2026-10-16T09:00:00Z";

fn importance(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("importance").expect("binary should compile");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn reference_document(stored: Option<f64>) -> Value {
    json!({
        "photo_urls": ["https://cdn.example/a.jpg"],
        "summary": "streetlight out",
        "upvotes": 3,
        "last_updated": NOW,
        "importance_score": stored,
    })
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).expect("json should render"))
        .expect("json file should write");
}

fn seed_store(dir: &Path, stored: Option<f64>) -> PathBuf {
    let path = dir.join("issues.json");
    write_json(
        &path,
        &json!({ "issues": { "issue-1": reference_document(stored) } }),
    );
    path
}

fn stored_score(store: &Path) -> Value {
    let raw = fs::read_to_string(store).expect("store should read");
    let root: Value = serde_json::from_str(&raw).expect("store should be json");
    root["issues"]["issue-1"]["importance_score"].clone()
}

#[test]
fn help_describes_the_tool() {
    let home = TempDir::new().expect("temp dir should be created");
    importance(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("importance scoring"));
}

#[test]
fn score_prints_markdown_breakdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = dir.path().join("snapshot.json");
    write_json(&snapshot, &reference_document(None));

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("score")
        .arg(&snapshot)
        .arg("--now")
        .arg(NOW)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Final score: 28.000"))
        .stdout(predicate::str::contains("decay_factor: 1.0000"));
}

#[test]
fn score_reads_stdin_and_renders_json() {
    let dir = TempDir::new().expect("temp dir should be created");
    let mut document = reference_document(None);
    document["ai_generated_severity"] = json!("HIGH");

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "-", "--now", NOW, "--format", "json"])
        .write_stdin(document.to_string())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"final_score\": 56.0"));
}

#[test]
fn score_rejects_missing_last_updated() {
    let dir = TempDir::new().expect("temp dir should be created");

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "-", "--now", NOW])
        .write_stdin(r#"{"upvotes": 3}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn handle_writes_then_settles() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = seed_store(dir.path(), None);

    let first = dir.path().join("first.json");
    write_json(
        &first,
        &json!({ "issue_id": "issue-1", "after": reference_document(None) }),
    );
    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("handle")
        .arg(&first)
        .args(["--now", NOW])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("write 28.000 (previously unset)"));
    assert_eq!(stored_score(&store), json!(28.0));

    let second = dir.path().join("second.json");
    write_json(
        &second,
        &json!({ "issue_id": "issue-1", "after": reference_document(Some(28.0)) }),
    );
    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("handle")
        .arg(&second)
        .args(["--now", NOW])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("unchanged at 28.000"));
    assert_eq!(stored_score(&store), json!(28.0));
}

#[test]
fn handle_dry_run_leaves_store_untouched() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = seed_store(dir.path(), Some(3.0));

    let event = dir.path().join("event.json");
    write_json(
        &event,
        &json!({ "issue_id": "issue-1", "after": reference_document(Some(3.0)) }),
    );
    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("handle")
        .arg(&event)
        .args(["--now", NOW, "--dry-run", "--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"decision\": \"write\""))
        .stderr(predicate::str::contains("dry run"));
    assert_eq!(stored_score(&store), json!(3.0));
}

#[test]
fn handle_malformed_event_exits_two_without_writing() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = seed_store(dir.path(), Some(3.0));

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["handle", "-", "--now", NOW])
        .write_stdin(r#"{"issue_id": "issue-1", "after": {"last_updated": "soon"}}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed input"));
    assert_eq!(stored_score(&store), json!(3.0));
}

#[test]
fn handle_missing_document_exits_three() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_store(dir.path(), None);

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["handle", "-", "--now", NOW])
        .write_stdin(
            json!({ "issue_id": "issue-404", "after": reference_document(None) }).to_string(),
        )
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store unavailable"));
}

#[test]
fn handle_honours_store_settings_from_config() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("importance.toml"),
        r#"
[store]
path = "data/reports.json"
collection = "reports"
"#,
    )
    .expect("config should write");
    fs::create_dir_all(dir.path().join("data")).expect("data dir should create");
    let store = dir.path().join("data/reports.json");
    write_json(
        &store,
        &json!({ "reports": { "issue-1": reference_document(None) } }),
    );

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["handle", "-", "--now", NOW])
        .write_stdin(json!({ "issue_id": "issue-1", "after": reference_document(None) }).to_string())
        .assert()
        .code(0);

    let root: Value =
        serde_json::from_str(&fs::read_to_string(&store).expect("store should read"))
            .expect("store should be json");
    assert_eq!(root["reports"]["issue-1"]["importance_score"], json!(28.0));
}

#[test]
fn zero_epsilon_config_is_refused() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("importance.toml"),
        r#"
[guard]
epsilon = 0.0
"#,
    )
    .expect("config should write");

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "-", "--now", NOW])
        .write_stdin(reference_document(None).to_string())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("guard.epsilon"));
}

#[test]
fn invalid_now_is_rejected_by_argument_parsing() {
    let dir = TempDir::new().expect("temp dir should be created");
    importance(dir.path())
        .args(["score", "-", "--now", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

#[test]
fn score_refuses_far_future_timestamp() {
    let dir = TempDir::new().expect("temp dir should be created");
    let mut document = reference_document(None);
    document["last_updated"] = json!("2500-01-01T00:00:00Z");

    importance(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "-", "--now", NOW, "--format", "json"])
        .write_stdin(document.to_string())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("final_score").not())
        .stderr(predicate::str::contains("non-finite"));
}

#[test]
fn verbose_dry_run_logs_the_invocation() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_store(dir.path(), None);

    importance(dir.path())
        .arg("-v")
        .arg("--root")
        .arg(dir.path())
        .args(["handle", "-", "--now", NOW, "--dry-run"])
        .write_stdin(json!({ "issue_id": "issue-1", "after": reference_document(None) }).to_string())
        .assert()
        .code(0)
        .stderr(predicate::str::contains("written=false"))
        .stderr(predicate::str::contains("dry_run=true"))
        .stderr(predicate::str::contains("new_score=Some(28.0)"));
}

#[test]
fn verbose_store_failure_logs_the_invocation() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_store(dir.path(), None);

    importance(dir.path())
        .arg("-v")
        .arg("--root")
        .arg(dir.path())
        .args(["handle", "-", "--now", NOW])
        .write_stdin(
            json!({ "issue_id": "issue-404", "after": reference_document(None) }).to_string(),
        )
        .assert()
        .code(3)
        .stderr(predicate::str::contains("importance score not written"))
        .stderr(predicate::str::contains("written=false"));
}
