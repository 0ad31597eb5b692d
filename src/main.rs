//! # Feed Ingest
//!
//! Fetches a remote RSS news feed, extracts its items with pattern-based
//! scanning, normalizes them and returns a uniform `{ success, data }` JSON
//! envelope. When anything goes wrong the envelope carries a fixed fallback
//! dataset instead, so consumers never see an error.
//!
//! ## Usage
//!
//! ```sh
//! feed_ingest                       # print one envelope to stdout
//! feed_ingest -j ./json             # write ./json/<date>.json
//! feed_ingest --serve 0.0.0.0:8080  # answer GET /news
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: one HTTP GET of the configured feed URL
//! 2. **Extraction**: `<item>` blocks scanned for title, link, date, etc.
//! 3. **Normalization**: tag stripping, length cap, date canonicalization, defaults
//! 4. **Assembly**: discard incomplete items, number them, keep the first 10
//! 5. **Fallback**: any failure above yields a fixed two-item envelope

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod assembler;
mod cli;
mod config;
mod error;
mod extractor;
mod fallback;
mod fetcher;
mod models;
mod normalizer;
mod outputs;
mod pipeline;
mod server;
mod utils;

use cli::Cli;
use config::FeedConfig;
use fetcher::HttpFetcher;
use outputs::json;
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_ingest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Config ----
    let mut config = match args.config.as_deref() {
        Some(path) => FeedConfig::from_yaml_file(path)?,
        None => FeedConfig::default(),
    };
    if let Some(url) = args.feed_url {
        config.feed_url = url;
    }
    config.validate()?;

    let fetcher = HttpFetcher::new(&config)?;
    let pipeline = Pipeline::new(fetcher, config);

    if let Some(addr) = args.serve {
        return server::serve(addr, Arc::new(pipeline)).await;
    }

    // ---- One-shot run ----
    if let Some(dir) = args.json_output_dir.as_deref() {
        ensure_writable_dir(dir).await?;
        let today = Utc::now().date_naive();
        let envelope = pipeline.run_on(today).await;
        let path = json::write_envelope(&envelope, dir, today).await?;
        info!(path = %path.display(), items = envelope.data.len(), "Wrote JSON envelope");
    } else {
        println!("{}", pipeline.run_json().await);
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
