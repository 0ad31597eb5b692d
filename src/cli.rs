//! Command-line interface definitions.
//!
//! Options can be passed as flags or, where noted, environment variables.
//! Values given here override the config file.

use clap::Parser;
use std::net::SocketAddr;

/// Command-line arguments for `feed_ingest`.
///
/// # Examples
///
/// ```sh
/// # One run, envelope printed to stdout
/// feed_ingest
///
/// # One run written to ./json/<date>.json
/// feed_ingest -j ./json
///
/// # Serve the envelope over HTTP
/// feed_ingest --serve 0.0.0.0:8080 -c feed.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Feed URL, overrides the config file
    #[arg(long, env = "FEED_URL")]
    pub feed_url: Option<String>,

    /// Write the envelope to this directory instead of stdout
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Serve the envelope over HTTP on this address instead of running once
    #[arg(long, env = "FEED_SERVE_ADDR", conflicts_with = "json_output_dir")]
    pub serve: Option<SocketAddr>,
}
