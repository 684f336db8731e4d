//! Archive listing page.
//!
//! `archive/index.html` links the most recent dated editions, newest first:
//!
//! ```text
//! archive/
//! ├── index.html       <- regenerated every run
//! ├── 2025-01-15.html
//! └── 2025-01-14.html
//! ```
//!
//! # Regenerate vs Append
//!
//! The page is rebuilt from the directory listing on every run rather than
//! appended to, so reruns on the same day do not grow it and its content
//! depends only on which dated pages exist.

use chrono::NaiveDate;
use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Number of editions linked from the listing page.
pub const ARCHIVE_LISTING_LIMIT: usize = 30;

/// Dates of the archived editions in `archive_dir`, newest first.
///
/// Only `*.html` files whose stem is a `YYYY-MM-DD` date count; the listing
/// page itself and anything else in the directory is ignored.
pub async fn archived_dates(archive_dir: &Path) -> io::Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut entries = fs::read_dir(archive_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
            Ok(date) => dates.push(date),
            Err(_) => debug!(path = %path.display(), "Skipping non-edition file"),
        }
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));
    Ok(dates)
}

/// Rebuild `{archive_dir}/index.html` from the archived editions.
#[instrument(level = "info", skip_all, fields(archive_dir = %archive_dir.display()))]
pub async fn update_archive_index(archive_dir: &Path) -> io::Result<PathBuf> {
    let mut dates = archived_dates(archive_dir).await?;
    dates.truncate(ARCHIVE_LISTING_LIMIT);

    let path = archive_dir.join("index.html");
    fs::write(&path, render_archive_index(&dates)).await?;
    info!(path = %path.display(), editions = dates.len(), "Updated archive index");
    Ok(path)
}

/// Listing page linking each date to `./{date}.html`.
pub fn render_archive_index(dates: &[NaiveDate]) -> String {
    let mut items = String::new();
    for date in dates {
        let d = date.format("%Y-%m-%d");
        // Writing into a String cannot fail.
        let _ = writeln!(
            items,
            r#"                <a class="archive-item" href="./{d}.html">{d}</a>"#
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI 每日简报 - 往期</title>
    <style>
        body {{ font-family: 'Noto Sans SC', -apple-system, sans-serif; background: #f3f4f6; padding: 20px; }}
        .archive {{ max-width: 900px; margin: 0 auto; padding: 20px; background: white; border-radius: 12px; }}
        .archive h3 {{ margin-bottom: 10px; }}
        .archive-list {{ display: flex; flex-wrap: wrap; gap: 10px; }}
        .archive-item {{ padding: 5px 15px; background: #f3f4f6; border-radius: 20px; text-decoration: none; color: #667eea; font-size: 0.9em; }}
        .archive-item:hover {{ background: #667eea; color: white; }}
    </style>
</head>
<body>
    <div class="archive">
        <h3>📚 往期简报</h3>
        <p><a href="../index.html">← 返回今日简报</a></p>
        <div class="archive-list">
{items}        </div>
    </div>
</body>
</html>
"#
    )
}
