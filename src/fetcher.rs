//! Retrieval of the raw feed document.
//!
//! [`FetchFeed`] is the seam between the pipeline and the network. The
//! production implementation, [`HttpFetcher`], performs exactly one GET per
//! call: no retries and no timeout beyond the client default.

use crate::config::FeedConfig;
use crate::error::PipelineError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Source of raw feed text.
pub trait FetchFeed {
    /// Return the body of the feed document, or a [`PipelineError::Fetch`].
    fn fetch(&self) -> impl Future<Output = Result<String, PipelineError>> + Send;
}

/// Fetches a fixed URL over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    /// Build a fetcher for `config.feed_url`.
    pub fn new(config: &FeedConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self::with_client(client, config.feed_url.clone()))
    }

    /// Use an existing client, e.g. one shared with other services.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl FetchFeed for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn fetch(&self) -> Result<String, PipelineError> {
        let t0 = Instant::now();
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string();
            warn!(status = status.as_u16(), %reason, "Feed request returned non-success status");
            return Err(PipelineError::Fetch {
                status: Some(status.as_u16()),
                reason,
            });
        }

        let body = response.text().await?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed"
        );
        debug!(preview = %truncate_for_log(&body, 300), "Feed body");
        Ok(body)
    }
}
