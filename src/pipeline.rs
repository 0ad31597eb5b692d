//! Feed ingestion orchestrator.
//!
//! Fetcher → extractor → normalizer → assembler, wrapped in a single failure
//! boundary. Whatever goes wrong inside the boundary (a [`PipelineError`] from
//! any stage, or a panic) is logged and replaced by the fallback dataset, so
//! [`Pipeline::run`] always yields a success envelope.

use crate::assembler;
use crate::config::FeedConfig;
use crate::error::PipelineError;
use crate::extractor;
use crate::fallback::fallback_envelope;
use crate::fetcher::FetchFeed;
use crate::models::ResultEnvelope;
use crate::normalizer;
use chrono::{NaiveDate, Utc};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Serialized form of an empty success envelope.
const EMPTY_ENVELOPE_JSON: &str = r#"{"success":true,"data":[]}"#;

/// One configured ingestion pipeline. Holds no state between runs.
#[derive(Debug)]
pub struct Pipeline<F> {
    fetcher: F,
    config: FeedConfig,
}

impl<F: FetchFeed> Pipeline<F> {
    pub fn new(fetcher: F, config: FeedConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Run once with today's UTC date as the default publication date.
    pub async fn run(&self) -> ResultEnvelope {
        self.run_on(Utc::now().date_naive()).await
    }

    /// Run the pipeline once behind its failure boundary.
    ///
    /// # Arguments
    ///
    /// * `today` - Date used for items without a parseable publication date
    ///   and for the fallback items
    ///
    /// # Returns
    ///
    /// The live envelope, or the fallback envelope when any stage returns an
    /// error or panics. The failure is logged with its stage and never
    /// reaches the caller.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let envelope = pipeline.run_on(Utc::now().date_naive()).await;
    /// assert!(envelope.success);
    /// ```
    #[instrument(level = "info", skip_all, fields(%today))]
    pub async fn run_on(&self, today: NaiveDate) -> ResultEnvelope {
        let t0 = Instant::now();
        let outcome = AssertUnwindSafe(self.try_run(today)).catch_unwind().await;

        let failure = match outcome {
            Ok(Ok(envelope)) => {
                info!(
                    items = envelope.data.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Feed ingestion succeeded"
                );
                return envelope;
            }
            Ok(Err(e)) => e,
            Err(panic) => PipelineError::Extraction(format!("panic: {}", panic_message(&*panic))),
        };

        error!(
            kind = failure.kind(),
            error = %failure,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Feed ingestion failed; serving fallback content"
        );
        fallback_envelope(&self.config, today)
    }

    /// The pipeline without its failure boundary.
    pub async fn try_run(&self, today: NaiveDate) -> Result<ResultEnvelope, PipelineError> {
        let body = self.fetcher.fetch().await?;
        let items = extractor::extract_items(&body)?
            .map(|raw| normalizer::normalize(&raw, &self.config, today));
        Ok(assembler::assemble(items, self.config.max_items))
    }

    /// Run once and serialize the envelope.
    pub async fn run_json(&self) -> String {
        self.run_json_on(Utc::now().date_naive()).await
    }

    pub async fn run_json_on(&self, today: NaiveDate) -> String {
        let envelope = self.run_on(today).await;
        match assembler::to_json(&envelope) {
            Ok(json) => json,
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Serializing envelope failed; serving fallback content");
                assembler::to_json(&fallback_envelope(&self.config, today))
                    .unwrap_or_else(|_| EMPTY_ENVELOPE_JSON.to_string())
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
