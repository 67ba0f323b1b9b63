//! E2E CLI tests covering:
//! - Directory views (`mn users`, `mn candidates`)
//! - Pure text operations (`mn render`, `mn validate`)
//! - Session replay from `--type` and from JSON-lines scripts
//! - Config and directory file loading, error reporting
//!
//! Each test runs `mn` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `mn` binary, rooted in `dir`.
fn mn_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mn"));
    cmd.current_dir(dir);
    cmd.env("MENTIONS_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

/// Run `mn` with `--json` and parse stdout.
fn mn_json(dir: &Path, args: &[&str]) -> Value {
    let output = mn_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("mn should not crash");
    assert!(
        output.status.success(),
        "mn {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|u| u["name"].as_str().expect("name").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Directory views
// ---------------------------------------------------------------------------

#[test]
fn users_lists_demo_directory() {
    let dir = TempDir::new().expect("temp dir");
    let users = mn_json(dir.path(), &["users"]);
    assert_eq!(names(&users), ["Kevin", "Jeff", "Bryan", "Gabbey"]);
    assert_eq!(users[1]["user_id"], 2);
}

#[test]
fn users_text_mode_has_header() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["users", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("user_id\tname\n1\tKevin\n"));
}

#[test]
fn candidates_without_query_lists_everyone() {
    let dir = TempDir::new().expect("temp dir");
    let all = mn_json(dir.path(), &["candidates"]);
    assert_eq!(all.as_array().map(Vec::len), Some(4));
}

#[test]
fn candidates_prefix_match_ignores_case() {
    let dir = TempDir::new().expect("temp dir");
    assert_eq!(names(&mn_json(dir.path(), &["candidates", "JE"])), ["Jeff"]);
    assert!(names(&mn_json(dir.path(), &["candidates", "eff"])).is_empty());
}

#[test]
fn candidates_with_no_match_reports_on_stderr() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["candidates", "zz", "--format", "text"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no users match 'zz'"));
}

#[test]
fn directory_file_replaces_demo_users() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("team.toml");
    std::fs::write(
        &path,
        "[[users]]\nuser_id = 7\nname = \"Zoë\"\n\n[[users]]\nuser_id = 8\nname = \"Zed\"\n",
    )
    .expect("write directory");

    let matches = mn_json(dir.path(), &["--directory", "team.toml", "candidates", "zoe"]);
    assert_eq!(names(&matches), ["Zoë"]);
}

#[test]
fn duplicate_ids_in_directory_fail_with_code() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("team.json"),
        r#"[{"user_id": 1, "name": "A"}, {"user_id": 1, "name": "B"}]"#,
    )
    .expect("write directory");

    let output = mn_cmd(dir.path())
        .args(["--directory", "team.json", "users", "--json"])
        .output()
        .expect("mn should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error_code\": \"E2001\""), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// Render / validate
// ---------------------------------------------------------------------------

#[test]
fn render_emphasizes_tagged_mentions() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["render", "@jeff, and @BRYAN", "--tag", "2", "--tag", "3", "--format", "text"])
        .assert()
        .success()
        .stdout("<b>@jeff</b>, and <b>@BRYAN</b>\n");
}

#[test]
fn render_json_reports_markup_and_tags() {
    let dir = TempDir::new().expect("temp dir");
    let out = mn_json(dir.path(), &["render", "hi @Kevin @Jeff", "--tag", "1"]);
    assert_eq!(out["markup"], "hi <b>@Kevin</b> @Jeff");
    assert_eq!(out["highlighted"], 1);
    assert_eq!(names(&out["tags"]), ["Kevin"]);
}

#[test]
fn render_rejects_unknown_tag() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["render", "@x", "--tag", "9", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown user id(s): 9"))
        .stderr(predicate::str::contains("mn users"));
}

#[test]
fn config_file_changes_emphasis() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("mentions.toml"),
        "[render]\nemphasis_open = \"<em>\"\nemphasis_close = \"</em>\"\n",
    )
    .expect("write config");

    mn_cmd(dir.path())
        .args(["render", "@Jeff", "--tag", "2", "--format", "text"])
        .assert()
        .success()
        .stdout("<em>@Jeff</em>\n");
}

#[test]
fn malformed_config_fails_with_code() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("mentions.toml"), "[render\n").expect("write config");

    mn_cmd(dir.path())
        .args(["users", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"));
}

#[test]
fn validate_drops_tags_without_trigger() {
    let dir = TempDir::new().expect("temp dir");
    let out = mn_json(dir.path(), &["validate", "Hi Jeff", "--tag", "2"]);
    assert!(out["kept"].as_array().expect("kept").is_empty());
    assert_eq!(names(&out["dropped"]), ["Jeff"]);
}

#[test]
fn validate_keeps_case_insensitive_mentions() {
    let dir = TempDir::new().expect("temp dir");
    let out = mn_json(
        dir.path(),
        &["validate", "ping @BRYAN and @jeffrey", "--tag", "2", "--tag", "3"],
    );
    assert_eq!(names(&out["kept"]), ["Bryan"]);
    assert_eq!(names(&out["dropped"]), ["Jeff"]);
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[test]
fn replay_typed_mention_posts_and_notifies() {
    let dir = TempDir::new().expect("temp dir");
    let out = mn_json(
        dir.path(),
        &["replay", "--type", "Hi @je", "--select", "2", "--submit"],
    );

    assert_eq!(out["events"], 8);
    assert_eq!(out["outcomes"][3]["action"], "start_search");
    assert_eq!(out["outcomes"][6]["outcome"], "committed");
    assert_eq!(out["outcomes"][6]["markup"], "Hi <b>@Jeff</b>");
    assert_eq!(out["comments"][0]["text"], "Hi @Jeff");
    assert_eq!(out["notifications"][0]["message"], "Sending alerts to:\nJeff\n");
    assert_eq!(out["notifications"][0]["dismiss_after_ms"], 2000);
    assert_eq!(out["markup"], "");
}

#[test]
fn replay_script_from_stdin() {
    let dir = TempDir::new().expect("temp dir");
    let script = r#"# type "@b", pick Bryan, then delete the trigger
{"kind":"character_inserted","ch":"@"}
{"kind":"character_inserted","ch":"b"}
{"kind":"candidate_selected","user_id":3}
{"kind":"text_changed","text":"Bryan"}
{"kind":"enter_pressed"}
"#;

    let output = mn_cmd(dir.path())
        .args(["replay", "-", "--json"])
        .write_stdin(script)
        .output()
        .expect("mn should not crash");
    assert!(output.status.success());
    let out: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(out["events"], 5);
    assert_eq!(out["comments"][0]["text"], "Bryan");
    assert!(out["comments"][0]["tags"].as_array().expect("tags").is_empty());
    assert!(out["notifications"].as_array().expect("notifications").is_empty());
}

#[test]
fn replay_script_file_with_ignored_selection() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("session.jsonl"),
        "{\"kind\":\"candidate_selected\",\"user_id\":1}\n",
    )
    .expect("write script");

    let out = mn_json(dir.path(), &["replay", "session.jsonl"]);
    assert_eq!(out["outcomes"][0]["outcome"], "ignored");
    assert!(out["comments"].as_array().expect("comments").is_empty());
}

#[test]
fn replay_reports_bad_script_line() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["replay", "-", "--json"])
        .write_stdin("{\"kind\":\"enter_pressed\"}\nnot json\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn replay_needs_script_or_typed_text() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path()).args(["replay"]).assert().failure();
}

#[test]
fn replay_pretty_lists_posted_comment() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args([
            "replay", "--type", "ok @g", "--select", "4", "--submit", "--format", "pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted comments"))
        .stdout(predicate::str::contains("ok @Gabbey"))
        .stdout(predicate::str::contains("Gabbey"));
}

// ---------------------------------------------------------------------------
// Comments / completions
// ---------------------------------------------------------------------------

#[test]
fn comments_render_seeded_log() {
    let dir = TempDir::new().expect("temp dir");
    let out = mn_json(dir.path(), &["comments"]);
    assert_eq!(
        out[0]["markup"],
        "This is comment to <b>@jeff</b>, where I mention <b>@BRYAN</b>"
    );
    assert_eq!(out[1]["author_id"], 1);
    assert_eq!(out[1]["markup"], "This is tagging <b>@Kevin</b>");
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().expect("temp dir");
    mn_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_mn"));
}
