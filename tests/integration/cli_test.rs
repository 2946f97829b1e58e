//! Integration tests for the CLI surface.

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_vor, write_sample_session};

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn help_lists_all_subcommands() {
    let (stdout, _stderr, exit_code) = run_vor(&["--help"]);

    assert_eq!(exit_code, 0);
    for subcommand in ["review", "new", "markers", "ls", "config", "completions"] {
        assert!(
            stdout.contains(subcommand),
            "help should mention '{}', got: {}",
            subcommand,
            stdout
        );
    }
}

#[test]
fn version_prints_package_version() {
    let (stdout, _stderr, exit_code) = run_vor(&["--version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// New Session Tests
// ============================================================================

#[test]
fn new_creates_a_parseable_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scrim.marks");

    let (stdout, _stderr, exit_code) = run_vor(&[
        "new",
        path.to_str().unwrap(),
        "--title",
        "Scrim vs Northern Lights",
        "--duration",
        "45:00",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Created"));

    let file = vor::SessionFile::parse(&path).unwrap();
    assert_eq!(file.header.video.title, "Scrim vs Northern Lights");
    assert_eq!(file.header.video.duration, 2700.0);
    assert!(file.markers.is_empty());
}

#[test]
fn new_accepts_plain_seconds_and_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vod.marks");

    let (_stdout, _stderr, exit_code) = run_vor(&[
        "new",
        path.to_str().unwrap(),
        "--title",
        "Finals game 2",
        "--duration",
        "330",
        "--source",
        "https://vods.example/finals-g2",
    ]);

    assert_eq!(exit_code, 0);
    let file = vor::SessionFile::parse(&path).unwrap();
    assert_eq!(file.header.video.duration, 330.0);
    assert_eq!(
        file.header.video.source.as_deref(),
        Some("https://vods.example/finals-g2")
    );
}

#[test]
fn new_rejects_malformed_duration() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.marks");

    let (_stdout, stderr, exit_code) =
        run_vor(&["new", path.to_str().unwrap(), "--title", "t", "--duration", "abc"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid duration"));
    assert!(!path.exists());
}

#[test]
fn new_rejects_empty_title() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.marks");

    let (_stdout, stderr, exit_code) =
        run_vor(&["new", path.to_str().unwrap(), "--title", "  ", "--duration", "100"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("title must not be empty"));
}

#[test]
fn new_refuses_to_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scrim.marks");
    let path_str = path.to_str().unwrap();

    let (_stdout, _stderr, exit_code) =
        run_vor(&["new", path_str, "--title", "First", "--duration", "100"]);
    assert_eq!(exit_code, 0);

    let (_stdout, stderr, exit_code) =
        run_vor(&["new", path_str, "--title", "Second", "--duration", "200"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("already exists"));

    let (_stdout, _stderr, exit_code) = run_vor(&[
        "new", path_str, "--title", "Second", "--duration", "200", "--force",
    ]);
    assert_eq!(exit_code, 0);

    let file = vor::SessionFile::parse(&path).unwrap();
    assert_eq!(file.header.video.title, "Second");
}

// ============================================================================
// Markers Table Tests
// ============================================================================

#[test]
fn markers_prints_rows_in_time_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample_session(temp_dir.path());

    let (stdout, _stderr, exit_code) = run_vor(&["markers", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("2 markers"));
    assert!(stdout.contains("01:04"));
    assert!(stdout.contains("02:05"));

    // 64s comes before 125s
    let rotation = stdout.find("Great rotation").unwrap();
    let smoke = stdout.find("Missed smoke").unwrap();
    assert!(rotation < smoke);
}

#[test]
fn markers_sort_created_keeps_file_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample_session(temp_dir.path());

    let (stdout, _stderr, exit_code) =
        run_vor(&["markers", path.to_str().unwrap(), "--sort", "created"]);

    assert_eq!(exit_code, 0);
    let smoke = stdout.find("Missed smoke").unwrap();
    let rotation = stdout.find("Great rotation").unwrap();
    assert!(smoke < rotation);
}

#[test]
fn markers_kind_filter_narrows_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample_session(temp_dir.path());

    let (stdout, _stderr, exit_code) =
        run_vor(&["markers", path.to_str().unwrap(), "--kind", "success"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Great rotation"));
    assert!(!stdout.contains("Missed smoke"));
}

#[test]
fn markers_unknown_kind_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample_session(temp_dir.path());

    let (_stdout, stderr, exit_code) =
        run_vor(&["markers", path.to_str().unwrap(), "--kind", "clutch"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Unknown marker kind"));
}

#[test]
fn markers_missing_file_fails_with_the_path() {
    AssertCommand::cargo_bin("vor")
        .unwrap()
        .args(["markers", "missing.marks"])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.marks"));
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn ls_lists_only_marks_files() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_session(temp_dir.path());
    std::fs::write(temp_dir.path().join("notes.txt"), "not a session").unwrap();

    let (stdout, _stderr, exit_code) = run_vor(&["ls", temp_dir.path().to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("scrim.marks"));
    assert!(stdout.contains("45:00"));
    assert!(stdout.contains("2 markers"));
    assert!(!stdout.contains("notes.txt"));
}

#[test]
fn ls_marks_unreadable_sessions() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_session(temp_dir.path());
    std::fs::write(temp_dir.path().join("broken.marks"), "not json\n").unwrap();

    let (stdout, _stderr, exit_code) = run_vor(&["ls", temp_dir.path().to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("scrim.marks"));
    assert!(stdout.contains("broken.marks"));
    assert!(stdout.contains("unreadable"));
}

#[test]
fn ls_reports_an_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_vor(&["ls", temp_dir.path().to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No .marks files"));
}

// ============================================================================
// Review Entry Tests
// ============================================================================

#[test]
fn review_requires_an_interactive_terminal() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample_session(temp_dir.path());

    // Captured output is not a TTY, so the session must refuse to start
    AssertCommand::cargo_bin("vor")
        .unwrap()
        .args(["review", path.to_str().unwrap()])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

// ============================================================================
// Misc Surface Tests
// ============================================================================

#[test]
fn completions_emit_a_bash_script() {
    let (stdout, _stderr, exit_code) = run_vor(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("vor"));
}

#[test]
fn config_path_prints_a_toml_location() {
    let (stdout, _stderr, exit_code) = run_vor(&["config", "path"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}
