//! Integration tests for the `nd` CLI.
//!
//! Each test creates a temp notebook, runs `nd` as a subprocess, and checks
//! stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `nd` binary.
fn nd_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("nd");
    path
}

/// Create a small notebook in the given directory.
fn create_test_notebook(root: &Path) {
    let meta_dir = root.join(".notedeck");
    fs::create_dir_all(&meta_dir).unwrap();
    fs::write(
        meta_dir.join("config.toml"),
        r#"# test notebook
[notebook]
name = "test-notes"

[ui]
default_tags = ["todo"]

[abbreviations]
btw = "by the way"   # keep this comment
"#,
    )
    .unwrap();

    fs::write(root.join("projects.md"), "# Projects\n\nPlans #work #project\n").unwrap();
    fs::write(
        root.join("web.md"),
        "# Web\nparent: projects\ncreated: 2026-10-01\n\nSite #work\n",
    )
    .unwrap();
    fs::write(root.join("journal.md"), "# Journal\n\nRain today #personal\n").unwrap();
}

fn run_nd(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(nd_bin())
        .args(args)
        .args(["--today", "2026-10-14"])
        .current_dir(dir)
        .env_remove("NOTEDECK_LOG")
        .output()
        .expect("failed to run nd");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `nd` expecting success, return stdout.
fn run_nd_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_nd(dir, args);
    if !success {
        panic!(
            "nd {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn complete_lists_candidates() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(tmp.path(), &["complete", "search #pro", "--surface", "search"]);
    assert_eq!(out, "> #project  1 note\n");
}

#[test]
fn complete_accept_prints_new_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(
        tmp.path(),
        &["complete", "search #pro", "--surface", "search", "--accept"],
    );
    assert_eq!(out, "search #project \n");
}

#[test]
fn complete_json_with_cursor() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    // cursor right after ">Pro", before the trailing words
    let out = run_nd_ok(
        tmp.path(),
        &["complete", ">Pro later", "--cursor", "4", "--surface", "parent", "--json"],
    );
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["active"], true);
    assert_eq!(json["trigger"], ">");
    assert_eq!(json["filter"], "Pro");
    assert_eq!(json["items"][0]["label"], "Projects");
    assert_eq!(json["items"][0]["value"], "projects");
    assert_eq!(json["items"][0]["drillable"], true);
}

#[test]
fn complete_nothing_to_offer() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let (stdout, stderr, success) = run_nd(tmp.path(), &["complete", "plain words"]);
    assert!(success);
    assert_eq!(stdout, "");
    assert!(stderr.contains("no completions"));

    let (_, stderr, success) = run_nd(tmp.path(), &["complete", "plain", "--accept"]);
    assert!(!success);
    assert!(stderr.contains("nothing to accept"));
}

#[test]
fn complete_rejects_unknown_surface() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let (_, stderr, success) = run_nd(tmp.path(), &["complete", "#", "--surface", "sidebar"]);
    assert!(!success);
    assert!(stderr.contains("unknown surface"));
}

#[test]
fn tags_with_counts() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(tmp.path(), &["tags"]);
    assert_eq!(
        out,
        "#work      2\n#personal  1\n#project   1\n#todo      0\n"
    );
}

#[test]
fn notes_filtered_by_query() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(tmp.path(), &["notes", "#work"]);
    assert_eq!(
        out,
        "projects  Projects  #work #project\nweb       Web  (Projects)  #work\n"
    );

    let out = run_nd_ok(tmp.path(), &["notes", "created:2026-10-01", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "web");
    assert_eq!(json[0]["parent_path"], "Projects");
}

#[test]
fn runs_from_subdirectory_and_with_dash_c() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());
    let sub = tmp.path().join("attachments");
    fs::create_dir_all(&sub).unwrap();

    let out = run_nd_ok(&sub, &["notes", "journal"]);
    assert!(out.starts_with("journal  Journal"));

    let elsewhere = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().to_string_lossy().to_string();
    let out = run_nd_ok(elsewhere.path(), &["-C", &dir, "notes", "journal"]);
    assert!(out.starts_with("journal  Journal"));
}

#[test]
fn outside_a_notebook_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_nd(tmp.path(), &["tags"]);
    assert!(!success);
    assert!(stderr.starts_with("error: not a notedeck notebook"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn abbrev_add_keeps_config_comments() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(tmp.path(), &["abbrev", "add", "sig", r"Best,\nSam"]);
    assert_eq!(out, "@sig added\n");

    let config = fs::read_to_string(tmp.path().join(".notedeck/config.toml")).unwrap();
    assert!(config.starts_with("# test notebook\n"));
    assert!(config.contains("btw = \"by the way\"   # keep this comment"));

    let out = run_nd_ok(tmp.path(), &["abbrev", "list"]);
    assert_eq!(out, "@btw  by the way\n@sig  Best,\n");

    let out = run_nd_ok(tmp.path(), &["complete", "Thanks @si", "--accept"]);
    assert_eq!(out, "Thanks Best,\nSam \n");

    let out = run_nd_ok(tmp.path(), &["abbrev", "add", "@btw", "by the by"]);
    assert_eq!(out, "@btw replaced\n");
}

#[test]
fn new_note_under_parent() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notebook(tmp.path());

    let out = run_nd_ok(tmp.path(), &["new", "Launch plan", "--parent", "web"]);
    assert_eq!(out, "launch-plan\n");
    let text = fs::read_to_string(tmp.path().join("launch-plan.md")).unwrap();
    assert_eq!(
        text,
        "# Launch plan\nparent: web\ncreated: 2026-10-14\nmodified: 2026-10-14\n"
    );

    let (_, stderr, success) = run_nd(tmp.path(), &["new", "Orphan", "--parent", "nope"]);
    assert!(!success);
    assert!(stderr.contains("nope"));
}

#[test]
fn init_creates_config_once() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("work-notes");
    fs::create_dir_all(&dir).unwrap();

    let out = run_nd_ok(&dir, &["init"]);
    assert_eq!(out, "Initialized notebook: Work Notes\n");
    assert!(dir.join(".notedeck/config.toml").is_file());

    let (_, stderr, success) = run_nd(&dir, &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));

    let out = run_nd_ok(&dir, &["init", "--force", "--name", "Work"]);
    assert_eq!(out, "Initialized notebook: Work\n");
    let out = run_nd_ok(&dir, &["tags"]);
    assert_eq!(out, "");
}
