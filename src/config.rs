//! Pipeline configuration.
//!
//! Every constant the pipeline relies on (source URL, item cap, description
//! length, placeholder values) lives in [`FeedConfig`]. The `Default` impl
//! carries the production values; an optional YAML file may override any
//! subset of them.
//!
//! ```yaml
//! feed_url: https://www.vaticannews.va/pt.rss.xml
//! default_category: Igreja
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Source feed fetched when nothing else is configured.
pub const DEFAULT_FEED_URL: &str = "https://www.vaticannews.va/pt.rss.xml";

/// Settings handed to [`crate::pipeline::Pipeline`] at construction time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// RSS document fetched on every run.
    pub feed_url: String,
    /// Maximum number of items in a live result.
    pub max_items: usize,
    /// Hard cap, in characters, for tag-stripped descriptions.
    pub description_max_chars: usize,
    /// Used when an item has no description.
    pub default_description: String,
    /// Used when an item has no category.
    pub default_category: String,
    /// Used when no enclosure, media content or inline image is found.
    pub default_image: String,
    /// `User-Agent` header sent with the feed request.
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            max_items: 10,
            description_max_chars: 200,
            default_description: "Leia mais no site oficial.".to_string(),
            default_category: "Notícias".to_string(),
            default_image: "/placeholder.svg".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FeedConfig {
    /// Read a YAML config file; keys absent from the file keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path_str,
            source,
        })?;
        info!(feed_url = %config.feed_url, "Loaded configuration");
        Ok(config)
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Check the values that would otherwise fail at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.feed_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            _ => {
                return Err(ConfigError::InvalidFeedUrl {
                    url: self.feed_url.clone(),
                });
            }
        }
        if self.max_items == 0 {
            return Err(ConfigError::Zero { field: "max_items" });
        }
        if self.description_max_chars == 0 {
            return Err(ConfigError::Zero {
                field: "description_max_chars",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = FeedConfig::default();
        assert_eq!(c.feed_url, DEFAULT_FEED_URL);
        assert_eq!(c.max_items, 10);
        assert_eq!(c.description_max_chars, 200);
        assert_eq!(c.default_image, "/placeholder.svg");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let c = FeedConfig::from_yaml_str("default_category: Igreja\n").unwrap();
        assert_eq!(c.default_category, "Igreja");
        assert_eq!(c.max_items, 10);
        assert_eq!(c.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(FeedConfig::from_yaml_str("  \n").unwrap(), FeedConfig::default());
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "feed_url: http://localhost:8080/rss.xml").unwrap();
        let c = FeedConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(c.feed_url, "http://localhost:8080/rss.xml");
    }

    #[test]
    fn test_missing_file() {
        let err = FeedConfig::from_yaml_file("/nonexistent/feed.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let c = FeedConfig {
            feed_url: "ftp://example.com/feed".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidFeedUrl { .. })));

        let c = FeedConfig {
            feed_url: "not a url".to_string(),
            ..FeedConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let c = FeedConfig {
            max_items: 0,
            ..FeedConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Zero { field: "max_items" })));
    }
}
