//! git-contributors command-line tool.
//!
//! Fills the "Contributors" section of a markdown file with a table built
//! from the repository's Git history and optional identity metadata.

mod list;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use git_contributors_core::config::{ContributorsConfig, ContributorsSetting};
use git_contributors_core::{ContributorsTransform, Diagnostic, Diagnostics};

/// Configuration file picked up from the working directory when `--config`
/// is not given.
const DEFAULT_CONFIG_FILE: &str = ".git-contributors.toml";

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Generate a contributors table from Git history.
#[derive(Parser, Debug)]
#[command(
    name = "git-contributors",
    version,
    about = "Fill the Contributors section of a markdown file from Git history"
)]
struct Cli {
    /// Markdown file to update.
    file: PathBuf,

    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON or TOML file with contributor metadata.
    #[arg(long)]
    contributors: Option<String>,

    /// Render only the top N contributors (0 renders everyone).
    #[arg(short, long)]
    limit: Option<usize>,

    /// Directory to read history from and resolve metadata against.
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Add a Contributors section when the file has none.
    #[arg(long)]
    append_if_missing: bool,

    /// Do not apply the repository .mailmap.
    #[arg(long)]
    no_mailmap: bool,

    /// Do not write; exit with an error if the file would change.
    #[arg(long, conflicts_with = "list")]
    check: bool,

    /// Print the resolved contributors instead of writing the file.
    #[arg(long)]
    list: bool,

    /// With --list, print JSON instead of a table.
    #[arg(long, requires = "list")]
    json: bool,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.log_level.as_deref(), &config.log_level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file.
fn init_tracing(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .or_else(|| EnvFilter::try_new(config_level).ok())
    .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

fn load_config(cli: &Cli) -> Result<ContributorsConfig> {
    let mut config = match &cli.config {
        Some(path) => ContributorsConfig::load_from_file(path)
            .context("failed to load configuration file")?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            ContributorsConfig::load_from_file(DEFAULT_CONFIG_FILE)
                .context("failed to load configuration file")?
        }
        None => ContributorsConfig::default(),
    };

    if let Some(specifier) = &cli.contributors {
        config.contributors = Some(ContributorsSetting::Module(specifier.clone()));
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(cwd) = &cli.cwd {
        config.cwd = Some(cwd.clone());
    }
    if cli.append_if_missing {
        config.append_if_missing = true;
    }
    if cli.no_mailmap {
        config.mailmap = false;
    }

    config.validate().context("configuration validation failed")?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn run(cli: Cli, config: ContributorsConfig) -> Result<()> {
    let transform = ContributorsTransform::new(config);

    if cli.list {
        return cmd_list(&transform, &cli.file, cli.json).await;
    }

    let document = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let outcome = transform
        .run(&document, &cli.file)
        .await
        .with_context(|| format!("failed to process {}", cli.file.display()))?;
    report(&cli.file, &outcome.diagnostics);

    match outcome.document {
        None => {
            debug!(file = %cli.file.display(), "unchanged");
            Ok(())
        }
        Some(_) if cli.check => {
            anyhow::bail!("{} is out of date", cli.file.display())
        }
        Some(updated) => {
            tokio::fs::write(&cli.file, updated)
                .await
                .with_context(|| format!("failed to write {}", cli.file.display()))?;
            info!(
                file = %cli.file.display(),
                contributors = outcome.contributors.len(),
                "updated contributors table"
            );
            Ok(())
        }
    }
}

async fn cmd_list(transform: &ContributorsTransform, file: &Path, json: bool) -> Result<()> {
    let mut sink = Diagnostics::new();
    let contributors = transform
        .contributors(file, &mut sink)
        .await
        .context("failed to collect contributors")?
        .unwrap_or_default();
    let diagnostics = sink.into_vec();
    report(file, &diagnostics);

    if json {
        println!("{}", serde_json::to_string_pretty(&contributors)?);
    } else {
        list::print_contributors(&contributors);
    }
    Ok(())
}

/// Print diagnostics the way compilers do: `file: severity: message`.
fn report(file: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}: {}", file.display(), diagnostic);
    }
}
