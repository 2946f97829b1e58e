//! Review subcommand handler

use std::path::Path;

use anyhow::{bail, Result};

use vor::review::run_review;
use vor::theme::current_theme;
use vor::Config;

/// Open a `.marks` file in the interactive review session.
#[cfg(not(tarpaulin_include))]
pub fn handle_review(path: &Path) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        bail!("The review session needs an interactive terminal");
    }

    let config = Config::load()?;
    let summary = run_review(path, &config)?;

    let theme = current_theme();
    if summary.markers_added > 0 {
        println!(
            "{}",
            theme.success_text(&format!(
                "Saved {} marker(s) to {}",
                summary.markers_added,
                summary.path.display()
            ))
        );
    } else {
        println!("{}", theme.secondary_text("No markers added."));
    }

    Ok(())
}
