//! commitwatch - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commitwatch::config::{WatchConfig, resolve_interval};
use commitwatch::git::{DefaultExecutor, check_git_installed, resolve_workdir};
use commitwatch::watch::run_watch;

/// Watch a git working tree and auto-commit changes with conventional commit messages.
#[derive(Parser, Debug)]
#[command(name = "commitwatch")]
#[command(about = "Watch a git working tree and auto-commit changes with conventional commit messages")]
#[command(version)]
struct Cli {
    /// Directory inside the repository to watch
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// Seconds between polls (default: $COMMITWATCH_INTERVAL or 30)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Print the message that would be used without staging or committing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Check prerequisites
    check_git_installed().context("git is required")?;

    // Step 2: Locate the working tree
    let workdir = resolve_workdir(&cli.repo).with_context(|| {
        format!(
            "Not a git repository: {}. Run commitwatch from within a git repository or pass --repo.",
            cli.repo.display()
        )
    })?;

    // Step 3: Watch
    let config = WatchConfig {
        interval: resolve_interval(cli.interval),
        once: cli.once,
        dry_run: cli.dry_run,
        ..WatchConfig::new(workdir)
    };
    let git = DefaultExecutor::new(&config.workdir);

    run_watch(&git, &config).await;

    Ok(())
}

/// Log to stderr so tracing output never mixes with the stdout report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
