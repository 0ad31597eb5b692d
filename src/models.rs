//! Data models for extracted feed items and the response envelope.
//!
//! - [`RawItem`]: field bundle pulled out of one `<item>` block, untouched
//! - [`FeedItem`]: normalized record as it appears on the wire
//! - [`ResultEnvelope`]: `{ success, data }` wrapper returned for every run
//!
//! The wire keys keep the Portuguese spelling consumers already depend on
//! (`titulo`, `descricao`, `dataPublicacao`, `categoria`, `imagem`).

use serde::{Deserialize, Serialize};

/// Raw fields of one feed block, in the state the extractor found them.
///
/// Empty strings mean "not found". Nothing is trimmed or cleaned here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub category: String,
    pub image: String,
}

/// A normalized news item.
///
/// Every field is populated: `title` and `link` are required to be non-empty
/// by the assembler, the rest fall back to configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedItem {
    /// 1-based position in this run's result.
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[serde(rename = "dataPublicacao")]
    pub publication_date: String,
    #[serde(rename = "categoria")]
    pub category: String,
    pub link: String,
    #[serde(rename = "imagem")]
    pub image: String,
}

/// Uniform response wrapper, identical for live and fallback results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultEnvelope {
    pub success: bool,
    pub data: Vec<FeedItem>,
}

impl ResultEnvelope {
    pub fn success(data: Vec<FeedItem>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
