//! Site-Markdown main entry point
//!
//! This is the command-line interface for mirroring a documentation site
//! into a single Markdown file.

use clap::Parser;
use site_markdown::config::{resolve_config, ConfigOverrides};
use site_markdown::crawler::run;
use site_markdown::url::parse_seed;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Markdown: mirror a documentation site into one Markdown file
///
/// Crawls every page under the given URL's path, converts each page to
/// Markdown and writes them, in crawl order, to `<host>.<path>.md`.
#[derive(Parser, Debug)]
#[command(name = "site-markdown")]
#[command(version)]
#[command(about = "Mirror a documentation site into a single Markdown file", long_about = None)]
struct Cli {
    /// URL to begin scraping from
    #[arg(value_name = "URL")]
    url: String,

    /// Ignores all HTML tags with the given ids
    #[arg(long = "filter-id", value_delimiter = ',', value_name = "IDS")]
    filter_ids: Vec<String>,

    /// Ignores all HTML tags whose class contains any of the given values
    #[arg(long = "filter-class", value_delimiter = ',', value_name = "CLASSES")]
    filter_classes: Vec<String>,

    /// Rewrite links between crawled pages into in-document anchors
    #[arg(long)]
    rewrite_links: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write the Markdown file into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // The seed is checked before anything touches the network
    let seed = match parse_seed(&cli.url) {
        Ok(seed) => seed,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let overrides = ConfigOverrides {
        filter_ids: cli.filter_ids,
        filter_classes: cli.filter_classes,
        rewrite_links: cli.rewrite_links,
        output_dir: cli.output_dir,
        timeout_secs: cli.timeout,
    };

    let config = match resolve_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawling {} (id filters: {}, class filters: {}, rewrite links: {})",
        seed,
        config.filters.ids.len(),
        config.filters.classes.len(),
        config.output.rewrite_links
    );

    let report = run(&seed, &config).await?;
    println!(
        "Wrote {} characters to {}",
        report.characters,
        report.path.display()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_markdown=info,warn"),
            1 => EnvFilter::new("site_markdown=debug,info"),
            _ => EnvFilter::new("site_markdown=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
