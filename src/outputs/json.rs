//! JSON file output for one-shot runs.
//!
//! Envelopes are written one file per day, replacing earlier runs of the
//! same day:
//!
//! ```text
//! json_output_dir/
//! ├── 2026-10-17.json
//! └── 2026-10-18.json
//! ```

use crate::assembler::to_json;
use crate::models::ResultEnvelope;
use chrono::NaiveDate;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `envelope` to `{json_output_dir}/{date}.json` and return the path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_envelope(
    envelope: &ResultEnvelope,
    json_output_dir: &str,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = to_json(envelope)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{}.json", date.format("%Y-%m-%d")));
    info!(path = %path.display(), items = envelope.data.len(), "Writing JSON");
    fs::write(&path, json).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::fallback::fallback_envelope;

    #[tokio::test]
    async fn test_write_envelope_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("json");
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let envelope = fallback_envelope(&FeedConfig::default(), date);

        let path = write_envelope(&envelope, out.to_str().unwrap(), date)
            .await
            .unwrap();

        assert_eq!(path, out.join("2026-10-18.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ResultEnvelope = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, envelope);
    }
}
