//! Final ordering, bounding and serialization of normalized items.

use crate::error::PipelineError;
use crate::models::{FeedItem, ResultEnvelope};
use tracing::debug;

/// Build the success envelope from normalized items in document order.
///
/// # Arguments
///
/// * `items` - Normalized items, ids not yet assigned
/// * `max_items` - Maximum number of items kept
///
/// # Returns
///
/// `{ success: true, data }` where `data` holds the first `max_items` items
/// with a non-empty `title` and `link`, numbered `"1"`, `"2"`, ... Dropped
/// items do not consume an id. Input order is never changed.
///
/// # Examples
///
/// ```ignore
/// let envelope = assemble(normalized_items, 10);
/// assert!(envelope.data.len() <= 10);
/// assert_eq!(envelope.data[0].id, "1");
/// ```
pub fn assemble<I>(items: I, max_items: usize) -> ResultEnvelope
where
    I: IntoIterator<Item = FeedItem>,
{
    let mut discarded = 0usize;
    let data: Vec<FeedItem> = items
        .into_iter()
        .filter(|item| {
            let keep = !item.title.is_empty() && !item.link.is_empty();
            if !keep {
                discarded += 1;
            }
            keep
        })
        .take(max_items)
        .enumerate()
        .map(|(i, item)| FeedItem {
            id: (i + 1).to_string(),
            ..item
        })
        .collect();

    debug!(kept = data.len(), discarded, max_items, "Assembled items");
    ResultEnvelope::success(data)
}

/// Serialize an envelope for the response body.
pub fn to_json(envelope: &ResultEnvelope) -> Result<String, PipelineError> {
    Ok(serde_json::to_string(envelope)?)
}
