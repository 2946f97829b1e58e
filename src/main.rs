//! VOR - VOD review sessions with timestamped coaching markers.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::markers::MarkerSort;

/// Version string with build metadata from build.rs.
///
/// Dev builds carry the git SHA; `--features release` builds drop it.
fn version_string() -> String {
    let base = env!("CARGO_PKG_VERSION");
    let date = env!("VOR_BUILD_DATE");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => format!("{} ({} {})", base, sha, date),
        None => format!("{} ({})", base, date),
    }
}

#[derive(Parser)]
#[command(name = "vor")]
#[command(about = "VOD review sessions with timestamped coaching markers")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a session file in the interactive review screen
    Review {
        /// The .marks session file to review
        file: PathBuf,
    },

    /// Create a new session file for a video
    New {
        /// Path of the session file to create
        file: PathBuf,

        /// Video title shown in the session header
        #[arg(short, long)]
        title: String,

        /// Video length, as seconds or mm:ss
        #[arg(short, long)]
        duration: String,

        /// Where the VOD lives (URL or path), informational
        #[arg(short, long)]
        source: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a session's markers without entering the review screen
    Markers {
        /// The .marks session file to read
        file: PathBuf,

        /// Row ordering
        #[arg(long, value_enum, default_value_t = MarkerSort::Time)]
        sort: MarkerSort,

        /// Only show markers of this kind
        #[arg(long)]
        kind: Option<String>,
    },

    /// List session files in a directory
    Ls {
        /// Directory to scan (defaults to the configured review dir)
        dir: Option<PathBuf>,
    },

    /// Inspect or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Open the config file in $VISUAL or $EDITOR
    Edit,
}

fn main() -> Result<()> {
    // Silent unless RUST_LOG asks for output; logs go to stderr so they
    // never mix with the alternate screen or table output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "off".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Review { file } => commands::review::handle_review(&file),
        Commands::New {
            file,
            title,
            duration,
            source,
            force,
        } => commands::new::handle_new(&file, &title, &duration, source, force),
        Commands::Markers { file, sort, kind } => {
            commands::markers::handle_markers(&file, sort, kind.as_deref())
        }
        Commands::Ls { dir } => commands::ls::handle_ls(dir),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Path => commands::config::handle_path(),
            ConfigAction::Edit => commands::config::handle_edit(),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "vor", &mut io::stdout());
            Ok(())
        }
    }
}
