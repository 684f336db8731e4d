//! JSON snapshot of the day's record.
//!
//! Files are keyed by date, one per day:
//! ```text
//! data_dir/
//! ├── 2025-01-14.json
//! └── 2025-01-15.json
//! ```
//!
//! The JSON is indented with two spaces and keeps non-ASCII text as-is.

use crate::models::BriefingRecord;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`BriefingRecord`] to `{data_dir}/{date}.json`.
///
/// Creates `data_dir` if needed and overwrites an existing file for the
/// same date.
///
/// # Returns
///
/// The path written, or an error if directory creation, serialization or
/// the write fails.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display(), date = %record.date))]
pub async fn write_record(record: &BriefingRecord, data_dir: &Path) -> io::Result<PathBuf> {
    let json = serde_json::to_string_pretty(record)?;

    if let Err(e) = fs::create_dir_all(data_dir).await {
        error!(error = %e, "Failed to create data dir");
        return Err(e);
    }

    let path = data_dir.join(format!("{}.json", record.date));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote record snapshot");
    Ok(path)
}
