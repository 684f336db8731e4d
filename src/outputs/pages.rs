//! Rendered page output: the dated archive copy and the live page.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Paths written by [`write_pages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPages {
    pub archive: PathBuf,
    pub current: PathBuf,
}

/// Write `document` to `{archive_dir}/{date}.html` and overwrite `current`.
///
/// Both targets are overwritten on rerun. The archive copy is written first,
/// so a failure leaves the previous live page in place.
#[instrument(level = "info", skip_all, fields(archive_dir = %archive_dir.display(), %date))]
pub async fn write_pages(
    document: &str,
    date: &str,
    archive_dir: &Path,
    current: &Path,
) -> io::Result<WrittenPages> {
    fs::create_dir_all(archive_dir).await?;
    let archive = archive_dir.join(format!("{}.html", date));
    fs::write(&archive, document).await?;
    info!(path = %archive.display(), bytes = document.len(), "Wrote archive page");

    fs::write(current, document).await?;
    info!(path = %current.display(), "Updated live page");

    Ok(WrittenPages {
        archive,
        current: current.to_path_buf(),
    })
}
