//! Error types for the ingestion pipeline and its configuration.
//!
//! Pipeline errors never reach a caller of [`crate::pipeline::Pipeline::run`]:
//! they are logged at the failure boundary and replaced by the fallback
//! dataset. They exist so that each stage can propagate with `?` and so the
//! boundary can report which stage failed.

use thiserror::Error;

/// A failure anywhere between fetching the feed and serializing the envelope.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Non-success HTTP status or transport failure from the fetcher.
    #[error("fetch failed{}: {reason}", status_suffix(.status))]
    Fetch {
        /// HTTP status code, absent for transport-level failures.
        status: Option<u16>,
        reason: String,
    },

    /// The response body could not be scanned for items.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Discard, id assignment, truncation or serialization went wrong.
    #[error("assembly failed: {0}")]
    Assembly(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with HTTP {s}")).unwrap_or_default()
}

impl PipelineError {
    /// Short stage label used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Fetch { .. } => "fetch",
            PipelineError::Extraction(_) => "extraction",
            PipelineError::Assembly(_) => "assembly",
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::Fetch {
            status: e.status().map(|s| s.as_u16()),
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Assembly(e.to_string())
    }
}

/// Problems loading or validating [`crate::config::FeedConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("feed_url {url:?} is not a valid http(s) URL")]
    InvalidFeedUrl { url: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_with_status() {
        let e = PipelineError::Fetch {
            status: Some(500),
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "fetch failed with HTTP 500: Internal Server Error"
        );
        assert_eq!(e.kind(), "fetch");
    }

    #[test]
    fn test_fetch_error_message_without_status() {
        let e = PipelineError::Fetch {
            status: None,
            reason: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "fetch failed: connection refused");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PipelineError::Extraction("x".into()).kind(), "extraction");
        assert_eq!(PipelineError::Assembly("x".into()).kind(), "assembly");
    }

    #[test]
    fn test_serde_json_error_is_assembly() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: PipelineError = err.into();
        assert_eq!(e.kind(), "assembly");
    }
}
