//! End-to-end CLI tests for chatgraph.
//!
//! These tests run the actual binary against fixture exports and check the
//! ranked table output, warnings, chart files, and error exits.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates an extracted export: Alice (3 messages, one exactly "hmm"),
/// Bob (1 message, "hello"), plus a guild channel that must be ignored.
fn setup_export() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let messages_root = dir.path().join("messages");
    fs::create_dir_all(&messages_root).unwrap();

    fs::write(
        messages_root.join("index.json"),
        r#"{"100": "Direct Message with Alice", "200": "Direct Message with Bob", "300": "general"}"#,
    )
    .unwrap();

    write_channel(
        &messages_root,
        "c100",
        r#"{"type": 1}"#,
        "ID,Timestamp,Contents,Attachments\n\
         3,2024-01-15T10:32:00+00:00,see you,\n\
         2,2024-01-15T10:31:00+00:00,hmm,\n\
         1,2024-01-15T10:30:00+00:00,hi bob,\n",
    );
    write_channel(
        &messages_root,
        "c200",
        r#"{"type": 1}"#,
        "ID,Timestamp,Contents,Attachments\n1,2024-01-10T09:00:00+00:00,hello,\n",
    );
    write_channel(
        &messages_root,
        "c300",
        r#"{"type": 0}"#,
        "ID,Timestamp,Contents,Attachments\n1,2024-01-01T00:00:00+00:00,guild noise,\n",
    );

    dir
}

fn write_channel(messages_root: &Path, id: &str, descriptor: &str, log: &str) {
    let dir = messages_root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("channel.json"), descriptor).unwrap();
    fs::write(dir.join("messages.csv"), log).unwrap();
}

/// Zips the fixture export the way the exporter delivers it.
fn zip_export(export: &TempDir) -> TempDir {
    let zip_dir = tempfile::tempdir().unwrap();
    let file = fs::File::create(zip_dir.path().join("package.zip")).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    let mut stack = vec![export.path().to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path
                    .strip_prefix(export.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned();
                writer.start_file(relative, options).unwrap();
                writer.write_all(&fs::read(&path).unwrap()).unwrap();
            }
        }
    }
    writer.finish().unwrap();
    zip_dir
}

fn chatgraph() -> Command {
    Command::cargo_bin("chatgraph").expect("binary builds")
}

// ============================================================================
// List mode
// ============================================================================

#[test]
fn test_list_ranks_by_descending_total() {
    let export = setup_export();

    let output = chatgraph()
        .arg(export.path())
        .arg("--list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let alice = stdout.find("Alice").expect("Alice listed");
    let bob = stdout.find("Bob").expect("Bob listed");
    assert!(alice < bob, "Alice (3 messages) must precede Bob (1)");
    assert!(stdout.contains('3'));
    assert!(stdout.contains("Total"));
    assert!(stdout.contains('4'));
}

#[test]
fn test_list_excludes_guild_channels() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("general").not());
}

#[test]
fn test_list_from_zip_archive() {
    let export = setup_export();
    let zip_dir = zip_export(&export);

    chatgraph()
        .arg(zip_dir.path().join("package.zip"))
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn test_list_with_pattern_mode_counts_matches() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .arg("--fillers")
        .assert()
        .success()
        .stdout(predicate::str::contains("pattern matches"))
        .stdout(predicate::str::contains("Alice"));
}

// ============================================================================
// Warnings (recoverable conditions)
// ============================================================================

#[test]
fn test_nonmatching_user_filter_warns_and_falls_back() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .args(["--user", "zzz-nonexistent"])
        .assert()
        .success()
        .stderr(predicate::str::contains("zzz-nonexistent"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn test_skip_beyond_population_warns_and_resets() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .args(["--skip", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--skip 5"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_user_filter_narrows_selection() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .args(["--user", "ali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob").not());
}

// ============================================================================
// Chart rendering
// ============================================================================

#[test]
fn test_renders_message_chart() {
    let export = setup_export();
    let out_dir = tempfile::tempdir().unwrap();
    let chart = out_dir.path().join("activity.svg");

    chatgraph()
        .arg(export.path())
        .args(["--output", chart.to_str().unwrap()])
        .assert()
        .success();

    let contents = fs::read_to_string(&chart).unwrap();
    assert!(contents.contains("<svg"));
    assert!(contents.contains("Alice"));
    assert!(contents.contains("Bob"));
}

#[test]
fn test_renders_filler_chart_for_single_conversation() {
    let export = setup_export();
    let out_dir = tempfile::tempdir().unwrap();
    let chart = out_dir.path().join("fillers.svg");

    chatgraph()
        .arg(export.path())
        .args(["--fillers", "--top", "1", "--output", chart.to_str().unwrap()])
        .assert()
        .success();

    let contents = fs::read_to_string(&chart).unwrap();
    assert!(contents.contains("hmm"));
}

#[test]
fn test_renders_phrase_chart() {
    let export = setup_export();
    let out_dir = tempfile::tempdir().unwrap();
    let chart = out_dir.path().join("phrases.svg");

    chatgraph()
        .arg(export.path())
        .args([
            "--phrase",
            "hi",
            "--top",
            "1",
            "--output",
            chart.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(chart.is_file());
}

// ============================================================================
// Fatal conditions
// ============================================================================

#[test]
fn test_zero_top_is_config_error() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .args(["--top", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_fillers_and_phrase_conflict() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--fillers")
        .args(["--phrase", "brb"])
        .assert()
        .failure();
}

#[test]
fn test_missing_export_path_fails() {
    chatgraph()
        .arg("/nonexistent/package.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_export_without_messages_entry_fails() {
    let dir = tempfile::tempdir().unwrap();

    chatgraph()
        .arg(dir.path())
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("messages/"));
}

#[test]
fn test_bad_phrase_rejected_before_reading() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .args(["--phrase", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("(unclosed"));
}

#[test]
fn test_pattern_chart_with_many_conversations_is_refused() {
    let export = setup_export();

    chatgraph()
        .arg(export.path())
        .arg("--fillers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one conversation"));
}

#[test]
fn test_bad_timestamp_aborts_run() {
    let export = setup_export();
    write_channel(
        &export.path().join("messages"),
        "c400",
        r#"{"type": 1}"#,
        "ID,Timestamp,Contents,Attachments\n1,not-a-date,broken,\n",
    );
    fs::write(
        export.path().join("messages/index.json"),
        r#"{"100": "Direct Message with Alice", "200": "Direct Message with Bob", "400": "Direct Message with Mallory"}"#,
    )
    .unwrap();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-date"));
}

// ============================================================================
// Skipped channels are logged, not silent
// ============================================================================

#[test]
fn test_missing_descriptor_logged_and_skipped() {
    let export = setup_export();
    fs::create_dir_all(export.path().join("messages/c999")).unwrap();

    chatgraph()
        .arg(export.path())
        .arg("--list")
        .assert()
        .success()
        .stderr(predicate::str::contains("c999"))
        .stderr(predicate::str::contains("channel.json"));
}
