//! Static substitute content for failed runs.
//!
//! The fallback envelope has the same shape as a live result so callers
//! never have to handle an error from the pipeline.

use crate::config::FeedConfig;
use crate::models::{FeedItem, ResultEnvelope};
use chrono::NaiveDate;

/// Build the fixed substitute envelope served when a run fails.
///
/// # Arguments
///
/// * `config` - Supplies the feed URL (its site root becomes each item's
///   link), the default category and the default image
/// * `today` - Publication date given to both items
///
/// # Returns
///
/// A success envelope with exactly two placeholder items, ids `"1"` and
/// `"2"`, shaped like a live result.
pub fn fallback_envelope(config: &FeedConfig, today: NaiveDate) -> ResultEnvelope {
    let date = today.format("%Y-%m-%d").to_string();
    let link = site_root(&config.feed_url);

    ResultEnvelope::success(vec![
        FeedItem {
            id: "1".to_string(),
            title: "Acompanhe as últimas notícias".to_string(),
            description: "As notícias mais recentes estão temporariamente indisponíveis. \
                          Visite o site oficial para acompanhar as novidades."
                .to_string(),
            publication_date: date.clone(),
            category: config.default_category.clone(),
            link: link.clone(),
            image: config.default_image.clone(),
        },
        FeedItem {
            id: "2".to_string(),
            title: "Mensagens e documentos".to_string(),
            description: "Consulte mensagens, homilias e documentos publicados recentemente \
                          diretamente na fonte."
                .to_string(),
            publication_date: date,
            category: config.default_category.clone(),
            link,
            image: config.default_image.clone(),
        },
    ])
}

/// Scheme and host of the feed URL, e.g. `https://www.example.org/`.
fn site_root(feed_url: &str) -> String {
    url::Url::parse(feed_url)
        .and_then(|u| u.join("/"))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| feed_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_items_dated_today() {
        let config = FeedConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let envelope = fallback_envelope(&config, today);

        assert!(envelope.success);
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].id, "1");
        assert_eq!(envelope.data[1].id, "2");
        for item in &envelope.data {
            assert_eq!(item.publication_date, "2026-10-18");
            assert_eq!(item.link, "https://www.vaticannews.va/");
            assert_eq!(item.image, config.default_image);
            assert!(!item.title.is_empty());
            assert!(!item.description.is_empty());
        }
    }

    #[test]
    fn test_site_root_falls_back_to_raw_url() {
        assert_eq!(site_root("not a url"), "not a url");
        assert_eq!(site_root("http://localhost:9000/a/b.xml"), "http://localhost:9000/");
    }
}
