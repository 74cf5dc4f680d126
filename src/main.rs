//! Page-Harvest main entry point
//!
//! This is the command-line interface for the Page-Harvest content harvester.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::{load_config_with_hash, validate_max_depth, Config};
use page_harvest::crawler::crawl;
use page_harvest::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Harvest: a depth-bounded content harvester
///
/// Page-Harvest follows links from a seed URL up to a fixed depth, extracts
/// each page's text and stores it, together with the page's images, in the
/// configured sink.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A depth-bounded content harvester", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Maximum number of link hops from the seed (overrides the config file)
    #[arg(short = 'd', long, value_name = "N", allow_negative_numbers = true)]
    max_depth: Option<i64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let max_depth = cli.max_depth.unwrap_or(config.crawler.max_depth);
    validate_max_depth(max_depth).context("invalid --max-depth")?;

    let summary = crawl(&config, &cli.seed, max_depth).await?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up logging based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
