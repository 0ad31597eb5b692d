//! Pattern-based item extraction from RSS text.
//!
//! This is deliberately not an XML parser. The document is split into
//! `<item>...</item>` blocks with a linear "find open, find close, advance"
//! scan, and each block is searched independently with one tolerant pattern
//! per field.
//!
//! # Known limitations
//!
//! - An `<item>` nested inside another item block ends the outer block at
//!   the first `</item>`; the remainder is scanned as ordinary text.
//! - A trailing `<item>` without a closing marker is ignored.
//! - Entities such as `&amp;` are passed through as-is.
//!
//! # Field patterns
//!
//! Text fields accept either `<tag><![CDATA[value]]></tag>` or
//! `<tag>value</tag>`, with optional attributes on the opening tag. The CDATA
//! form wins when both could match. Images are searched in priority order:
//!
//! 1. `<enclosure url="...">`
//! 2. `<media:content url="...">`
//! 3. `<img src="...">` anywhere in the block (usually inside the description)

use crate::error::PipelineError;
use crate::models::RawItem;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const ITEM_OPEN: &str = "<item>";
const ITEM_CLOSE: &str = "</item>";

/// Markers that any RSS, RDF or Atom document contains.
const FEED_MARKERS: [&str; 5] = ["<rss", "<channel", "<item", "<feed", "<rdf:RDF"];

fn text_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(
        r"(?s)<{tag}(?:\s[^>]*)?>\s*(?:<!\[CDATA\[(.*?)\]\]>\s*|(.*?))</{tag}>"
    ))
    .expect("text field pattern")
}

fn url_attr_pattern(element: &str, attr: &str) -> Regex {
    let element = regex::escape(element);
    Regex::new(&format!(
        r#"(?s)<{element}\b[^>]*?\b{attr}\s*=\s*["']([^"']+)["']"#
    ))
    .expect("url attribute pattern")
}

static TITLE: Lazy<Regex> = Lazy::new(|| text_pattern("title"));
static DESCRIPTION: Lazy<Regex> = Lazy::new(|| text_pattern("description"));
static LINK: Lazy<Regex> = Lazy::new(|| text_pattern("link"));
static PUB_DATE: Lazy<Regex> = Lazy::new(|| text_pattern("pubDate"));
static DC_DATE: Lazy<Regex> = Lazy::new(|| text_pattern("dc:date"));
static CATEGORY: Lazy<Regex> = Lazy::new(|| text_pattern("category"));

static IMAGE_SHAPES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        url_attr_pattern("enclosure", "url"),
        url_attr_pattern("media:content", "url"),
        url_attr_pattern("img", "src"),
    ]
});

/// Iterator over the raw text between `<item>` and `</item>` markers.
#[derive(Debug, Clone)]
pub struct ItemBlocks<'a> {
    rest: &'a str,
}

impl<'a> ItemBlocks<'a> {
    pub fn new(document: &'a str) -> Self {
        Self { rest: document }
    }
}

impl<'a> Iterator for ItemBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let open = self.rest.find(ITEM_OPEN)?;
        let body_start = open + ITEM_OPEN.len();
        let Some(close) = self.rest[body_start..].find(ITEM_CLOSE) else {
            debug!("Unterminated item block ignored");
            self.rest = "";
            return None;
        };
        let block = &self.rest[body_start..body_start + close];
        self.rest = &self.rest[body_start + close + ITEM_CLOSE.len()..];
        Some(block)
    }
}

/// First matching text value of `pattern` in `block`, or an empty string.
///
/// The CDATA group is preferred over the bare-text group.
pub fn capture_text(pattern: &Regex, block: &str) -> String {
    pattern
        .captures(block)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// URL of the first image shape found in `block`, or an empty string.
pub fn capture_image(block: &str) -> String {
    IMAGE_SHAPES
        .iter()
        .find_map(|pattern| pattern.captures(block).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Pull every field out of one item block.
pub fn extract_fields(block: &str) -> RawItem {
    let mut pub_date = capture_text(&PUB_DATE, block);
    if pub_date.trim().is_empty() {
        pub_date = capture_text(&DC_DATE, block);
    }
    RawItem {
        title: capture_text(&TITLE, block),
        description: capture_text(&DESCRIPTION, block),
        link: capture_text(&LINK, block),
        pub_date,
        category: capture_text(&CATEGORY, block),
        image: capture_image(block),
    }
}

/// Lazily extract one [`RawItem`] per item block, in document order.
///
/// # Arguments
///
/// * `document` - Raw feed text as returned by the fetcher
///
/// # Returns
///
/// An iterator yielding one bundle per `<item>` block. Blocks missing a
/// title or link are still yielded; the assembler discards them. A feed with
/// zero items yields an empty iterator.
///
/// # Errors
///
/// [`PipelineError::Extraction`] when `document` does not look like a feed
/// at all, for example an HTML error page served with a success status.
///
/// # Examples
///
/// ```ignore
/// let doc = "<rss><channel><item><title>A</title></item></channel></rss>";
/// let items: Vec<RawItem> = extract_items(doc)?.collect();
/// assert_eq!(items[0].title, "A");
/// ```
pub fn extract_items(document: &str) -> Result<impl Iterator<Item = RawItem> + '_, PipelineError> {
    if !FEED_MARKERS.iter().any(|marker| document.contains(marker)) {
        return Err(PipelineError::Extraction(
            "response body contains no RSS or Atom markup".to_string(),
        ));
    }
    Ok(ItemBlocks::new(document).map(extract_fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blocks_in_document_order() {
        let doc = "<rss><channel><item>a</item>junk<item>b</item><item>c</item></channel></rss>";
        let blocks: Vec<&str> = ItemBlocks::new(doc).collect();
        assert_eq!(blocks, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unterminated_block_ignored() {
        let doc = "<item>a</item><item>never closed";
        let blocks: Vec<&str> = ItemBlocks::new(doc).collect();
        assert_eq!(blocks, vec!["a"]);
    }

    #[test]
    fn test_nested_item_ends_at_first_close() {
        let doc = "<item>outer<item>inner</item>tail</item>";
        let blocks: Vec<&str> = ItemBlocks::new(doc).collect();
        assert_eq!(blocks, vec!["outer<item>inner"]);
    }

    #[test]
    fn test_cdata_and_bare_text() {
        let block = "<title><![CDATA[Synod <b>Meeting</b>]]></title><link>https://x.org/a</link>";
        let raw = extract_fields(block);
        assert_eq!(raw.title, "Synod <b>Meeting</b>");
        assert_eq!(raw.link, "https://x.org/a");
    }

    #[test]
    fn test_cdata_with_surrounding_whitespace() {
        let block = "<title>\n   <![CDATA[Padded]]>\n</title>";
        assert_eq!(extract_fields(block).title, "Padded");
    }

    #[test]
    fn test_multiline_bare_text_and_attributes() {
        let block = "<description type=\"html\">line one\nline two</description>";
        assert_eq!(extract_fields(block).description, "line one\nline two");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let raw = extract_fields("<title>Only title</title>");
        assert_eq!(raw.title, "Only title");
        assert_eq!(raw.link, "");
        assert_eq!(raw.description, "");
        assert_eq!(raw.pub_date, "");
        assert_eq!(raw.category, "");
        assert_eq!(raw.image, "");
    }

    #[test]
    fn test_first_category_wins() {
        let raw = extract_fields("<category>Papa</category><category>Igreja</category>");
        assert_eq!(raw.category, "Papa");
    }

    #[test]
    fn test_dc_date_used_without_pub_date() {
        let raw = extract_fields("<dc:date>2024-02-02T08:00:00Z</dc:date>");
        assert_eq!(raw.pub_date, "2024-02-02T08:00:00Z");
    }

    #[test]
    fn test_image_priority() {
        let all = r#"<description><![CDATA[<img src="inline.jpg">]]></description>
            <media:content url="media.jpg" medium="image"/>
            <enclosure length="1" type="image/jpeg" url="enclosure.jpg"/>"#;
        assert_eq!(capture_image(all), "enclosure.jpg");

        let media_and_img = r#"<img src='inline.jpg'/><media:content url="media.jpg"/>"#;
        assert_eq!(capture_image(media_and_img), "media.jpg");

        let img_only = r#"<description><![CDATA[<p><img class="x" src="inline.jpg" /></p>]]></description>"#;
        assert_eq!(capture_image(img_only), "inline.jpg");

        assert_eq!(capture_image("<title>none</title>"), "");
    }

    #[test]
    fn test_extract_items_rejects_non_feed() {
        let html = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert!(matches!(extract_items(html), Err(PipelineError::Extraction(_))));
    }

    #[test]
    fn test_extract_items_empty_channel() {
        let doc = "<rss version=\"2.0\"><channel><title>Empty</title></channel></rss>";
        assert_eq!(extract_items(doc).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_items_keeps_incomplete_blocks() {
        let doc = "<rss><channel><item><title>A</title></item><item><link>https://x.org</link></item></channel></rss>";
        let items: Vec<RawItem> = extract_items(doc).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[1].link, "https://x.org");
    }
}
