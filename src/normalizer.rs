//! Field cleaning for extracted feed items.
//!
//! Pure functions, no I/O. [`normalize`] turns a [`RawItem`] into a
//! [`FeedItem`] with every optional field populated; the `id` is left empty
//! for the assembler to fill.

use crate::config::FeedConfig;
use crate::models::{FeedItem, RawItem};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Remove every `<...>` sequence.
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

/// Keep at most `max` characters. No ellipsis is appended.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Trim, strip markup, then cap a description.
///
/// Whitespace uncovered by stripping (as in `<p>  text`) is trimmed before
/// the cap is applied. The capped text itself is never trimmed, so a result
/// that reaches the cap is exactly `max_chars` characters long.
///
/// # Arguments
///
/// * `raw` - Description text as extracted, possibly containing markup
/// * `max_chars` - Maximum number of characters to keep
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_description("  <p> Body </p> ", 200), "Body");
/// assert_eq!(clean_description("<b>abcdef</b>", 3), "abc");
/// ```
pub fn clean_description(raw: &str, max_chars: usize) -> String {
    let stripped = strip_tags(raw.trim());
    truncate_chars(stripped.trim(), max_chars)
}

/// Parse a feed date into `YYYY-MM-DD`.
///
/// Accepts RFC 2822 (`Mon, 01 Jan 2024 00:00:00 GMT`), RFC 3339 and bare
/// ISO dates. Zoned values are converted to UTC first. Returns `None` for
/// anything else.
pub fn canonical_date(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let date = DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Clean every field of `raw` and substitute defaults for missing ones.
///
/// # Arguments
///
/// * `raw` - Field bundle produced by the extractor
/// * `config` - Supplies the description cap and the placeholder values
/// * `today` - Publication date used when the item's date is missing or unparseable
///
/// # Returns
///
/// A [`FeedItem`] with an empty `id`. `title` and `link` are only trimmed;
/// an empty value survives so the assembler can discard the item. Every
/// other field is populated, from the feed or from a default.
pub fn normalize(raw: &RawItem, config: &FeedConfig, today: NaiveDate) -> FeedItem {
    let description = clean_description(&raw.description, config.description_max_chars);
    let description = if description.is_empty() {
        config.default_description.clone()
    } else {
        description
    };
    FeedItem {
        id: String::new(),
        title: raw.title.trim().to_string(),
        description,
        publication_date: canonical_date(&raw.pub_date)
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        category: or_default(&raw.category, &config.default_category),
        link: raw.link.trim().to_string(),
        image: or_default(&raw.image, &config.default_image),
    }
}
