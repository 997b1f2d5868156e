//! torboard main entry point
//!
//! Command-line front end for the scraper: loads the TOML configuration,
//! wires the proxied transport and session cookies into the crawl core, and
//! prints the results. Records go to stdout as JSON lines; diagnostics go
//! to stderr through tracing.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use torboard::client::{CookieSet, HttpTransport};
use torboard::config::load_config;
use torboard::crawler::{
    check_connectivity, crawl_subsection, ListingOptions, ListingPaginator, ResilientFetcher,
};
use tracing_subscriber::EnvFilter;

/// torboard: a sequential hidden-service forum scraper
///
/// Enumerates posts in a forum subsection across paginated listings and
/// reconstructs each post's comment tree into flat, parent-referencing
/// records. Session cookies must be acquired manually from a browser and
/// placed in the configuration file.
#[derive(Parser, Debug)]
#[command(name = "torboard")]
#[command(about = "A sequential hidden-service forum scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Probe transport and site connectivity, then exit
    #[arg(long, conflicts_with = "list_only")]
    status: bool,

    /// Print post ids from the listing without assembling posts
    #[arg(long)]
    list_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let transport = Arc::new(HttpTransport::new(&config.site)?);
    let cookies = CookieSet::for_session(&config.cookies.session_id, &config.cookies.captcha_token);

    if cli.status {
        let report =
            check_connectivity(transport.as_ref(), &config.site.base_url, &cookies).await;
        println!(
            "transport: {}",
            if report.transport_ok { "ok" } else { "not ok" }
        );
        println!("site: {}", if report.site_ok { "ok" } else { "not ok" });
        return Ok(());
    }

    let fetcher = ResilientFetcher::new(
        transport,
        &config.site.base_url,
        cookies,
        config.crawl.retry_cooldown(),
    );

    if cli.list_only {
        let paginator = ListingPaginator::new(
            &fetcher,
            config.crawl.page_delay(),
            config.crawl.retry_cooldown(),
        );
        let post_ids = paginator
            .list_post_ids(&config.crawl.subsection, &ListingOptions::from(&config.crawl))
            .await;
        for post_id in post_ids {
            println!("{}", post_id);
        }
        return Ok(());
    }

    // Full crawl: one JSON line per record, posts in listing order
    let posts = crawl_subsection(&fetcher, &config.crawl).await;
    for records in &posts {
        for record in records {
            println!("{}", serde_json::to_string(record)?);
        }
    }
    tracing::info!("Assembled {} posts", posts.len());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("torboard=info,warn"),
            1 => EnvFilter::new("torboard=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
