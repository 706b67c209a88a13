//! JSON output of the scraped record.

use crate::error::Result;
use crate::models::MarsData;
use crate::utils::ensure_writable_parent;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize a record, pretty-printed unless `compact` is set.
pub fn to_json(record: &MarsData, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(record)?
    } else {
        serde_json::to_string_pretty(record)?
    };
    Ok(json)
}

/// Write a [`MarsData`] record to `path`, creating its directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_record(record: &MarsData, path: impl AsRef<Path>, compact: bool) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(record, compact)?;

    if let Err(e) = ensure_writable_parent(path).await {
        error!(error = %e, "Output directory is not writable");
        return Err(e.into());
    }

    fs::write(path, json).await?;
    info!("Wrote record JSON");
    Ok(())
}
