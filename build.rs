//! Stamps the binary with its build date and git commit.
//!
//! `vor --version` shows both in dev builds. Official builds pass
//! `--features release` and get a date-only version string.

use std::process::Command;

fn build_date() -> String {
    Command::new("date")
        .args(["+%Y-%m-%d"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rustc-env=VOR_BUILD_DATE={}", build_date());

    #[cfg(not(feature = "release"))]
    emit_git_sha();
}

/// Emit `VERGEN_GIT_SHA`, with "unknown" standing in outside a git
/// checkout (tarballs, vendored builds).
#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let git = match GitclBuilder::default().sha(true).build() {
        Ok(git) => git,
        Err(e) => {
            eprintln!("cargo:warning=git instructions misconfigured: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            return;
        }
    };

    let emitted = Emitter::default()
        .add_instructions(&git)
        .and_then(|emitter| emitter.emit());

    if let Err(e) = emitted {
        eprintln!("cargo:warning=git metadata unavailable: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
