//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the vor CLI and capture (stdout, stderr, exit code).
pub fn run_vor(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_vor"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute vor");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// A hand-written two-marker session in the on-disk format.
///
/// Written out literally so these tests pin the wire format, not just
/// whatever the current writer produces.
pub fn sample_session_text() -> String {
    let header = r#"{"version":1,"video":{"title":"Scrim vs Northern Lights","duration":2700.0},"created_at":"2026-08-01T10:00:00Z"}"#;
    let first = r#"{"id":"5b1ad155-19d5-4467-9968-4e23e63c2f9d","time":125.0,"title":"Missed smoke","description":"Mid smoke landed short","kind":"error","created_at":"2026-08-01T10:02:05Z"}"#;
    let second = r#"{"id":"9e107d9d-372b-4551-bc3b-5c2f0b1f5a44","time":64.0,"title":"Great rotation","description":"Early B stack paid off","kind":"success","player":"jax","category":"macro","created_at":"2026-08-01T10:03:40Z"}"#;
    format!("{}\n{}\n{}\n", header, first, second)
}

/// Write the sample session into `dir` and return its path.
pub fn write_sample_session(dir: &Path) -> PathBuf {
    let path = dir.join("scrim.marks");
    std::fs::write(&path, sample_session_text()).expect("Failed to write fixture");
    path
}
