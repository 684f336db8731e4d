//! Publishing a rendered briefing to the static site repository.
//!
//! [`Publisher::publish`] runs these steps in order, with no rollback:
//!
//! | Step | Effect | On failure |
//! |------|--------|------------|
//! | 1 | `data/<date>.json` snapshot | [`PublishError::Io`] |
//! | 2 | `archive/<date>.html` and `index.html` | [`PublishError::Io`] |
//! | 3 | `archive/index.html` listing | [`PublishError::Io`] |
//! | 4 | bot identity, `git add .`, `git status --porcelain` | [`PublishError::Git`] |
//! | 5 | `git commit` when the tree changed | [`PublishError::Git`] |
//! | 6 | token remote URL, `git push` when enabled | [`PublishError::Git`] |
//!
//! An unchanged tree ends the run after step 4 with
//! [`PublishOutcome::Unchanged`]; that is a success.
//!
//! All inputs come from [`PublishConfig`], so a publisher can be pointed at
//! a scratch repository without touching the process environment.

use crate::config::GitHubConfig;
use crate::git::{Git, GitError};
use crate::models::BriefingRecord;
use crate::outputs::{indexes, json, pages};
use crate::utils::redact_url;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument};

/// Commit author name.
pub const BOT_NAME: &str = "AI Daily Bot";
/// Commit author email.
pub const BOT_EMAIL: &str = "bot@aidaily.local";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to write briefing files: {0}")]
    Io(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(#[from] GitError),
}

/// What a successful publish did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Nothing differed from the last commit; no commit was made.
    Unchanged,
    /// A commit was made, and pushed unless pushing is disabled.
    Committed { pushed: bool },
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Working tree of the site repository.
    pub root: PathBuf,
    pub github: GitHubConfig,
    /// Token for the push URL. Required when `push` is set.
    pub token: Option<String>,
    pub push: bool,
}

#[derive(Debug, Clone)]
pub struct Publisher {
    config: PublishConfig,
    git: Git,
}

impl Publisher {
    pub fn new(config: PublishConfig) -> Self {
        let git = Git::new(&config.root).with_secret(config.token.clone());
        Self { config, git }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.root.join("data")
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.config.root.join("archive")
    }

    pub fn current_page(&self) -> PathBuf {
        self.config.root.join("index.html")
    }

    /// Persist the briefing and publish it.
    #[instrument(level = "info", skip_all, fields(date = %record.date, root = %self.config.root.display()))]
    pub async fn publish(
        &self,
        record: &BriefingRecord,
        document: &str,
    ) -> Result<PublishOutcome, PublishError> {
        self.persist(record, document).await?;
        Ok(self.commit_and_push(&record.date).await?)
    }

    /// Write the snapshot, the pages and the archive listing.
    pub async fn persist(&self, record: &BriefingRecord, document: &str) -> std::io::Result<()> {
        let snapshot = json::write_record(record, &self.data_dir()).await?;
        let written =
            pages::write_pages(document, &record.date, &self.archive_dir(), &self.current_page())
                .await?;
        let listing = indexes::update_archive_index(&self.archive_dir()).await?;
        info!(
            snapshot = %snapshot.display(),
            archive = %written.archive.display(),
            current = %written.current.display(),
            listing = %listing.display(),
            "Persisted briefing"
        );
        Ok(())
    }

    async fn commit_and_push(&self, date: &str) -> Result<PublishOutcome, GitError> {
        self.git.set_config("user.name", BOT_NAME).await?;
        self.git.set_config("user.email", BOT_EMAIL).await?;

        self.git.add_all().await?;
        let status = self.git.status_porcelain().await?;
        if status.trim().is_empty() {
            info!("No changes to commit");
            return Ok(PublishOutcome::Unchanged);
        }

        let changed = status.lines().count();
        self.git.commit(&commit_message(date)).await?;
        info!(changed, "Committed briefing");

        if !self.config.push {
            info!("Push disabled; commit kept locally");
            return Ok(PublishOutcome::Committed { pushed: false });
        }

        let token = self
            .config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(GitError::MissingToken)?;
        let github = &self.config.github;
        let remote_url = github.push_url(token);
        info!(remote = %github.remote, url = %redact_url(&remote_url), "Setting push remote");
        self.git.set_remote_url(&github.remote, &remote_url).await?;
        self.git.push(&github.remote, &github.branch).await?;
        info!(url = %github.pages_url(), "✅ Pushed to GitHub");
        Ok(PublishOutcome::Committed { pushed: true })
    }
}

/// Commit message for a briefing date.
pub fn commit_message(date: &str) -> String {
    format!("Update: {} briefing", date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::tests::{git_available, init_repo};
    use crate::models::BriefingItem;
    use std::path::Path;

    fn record() -> BriefingRecord {
        BriefingRecord {
            date: "2025-01-15".to_string(),
            weekday: "周三".to_string(),
            hot_news: vec![BriefingItem::new("热门", "内容", "The Verge")],
            trending: vec![BriefingItem::new("趋势", "内容", "TechCrunch")],
            tutorials: vec![],
        }
    }

    fn publisher(root: &Path, push: bool, token: Option<&str>) -> Publisher {
        Publisher::new(PublishConfig {
            root: root.to_path_buf(),
            github: GitHubConfig::default(),
            token: token.map(str::to_string),
            push,
        })
    }

    fn snapshot(root: &Path) -> Vec<(String, String)> {
        ["data/2025-01-15.json", "archive/2025-01-15.html", "archive/index.html", "index.html"]
            .iter()
            .map(|p| (p.to_string(), std::fs::read_to_string(root.join(p)).unwrap()))
            .collect()
    }

    fn head_count(root: &Path) -> usize {
        let out = std::process::Command::new("git")
            .args(["rev-list", "--count", "HEAD"])
            .current_dir(root)
            .output()
            .unwrap();
        String::from_utf8_lossy(&out.stdout).trim().parse().unwrap()
    }

    #[test]
    fn test_commit_message() {
        assert_eq!(commit_message("2025-01-15"), "Update: 2025-01-15 briefing");
    }

    #[tokio::test]
    async fn test_persist_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let p = publisher(tmp.path(), false, None);
        p.persist(&record(), "<html>doc</html>").await.unwrap();

        let files = snapshot(tmp.path());
        let json_text = &files[0].1;
        let parsed: BriefingRecord = serde_json::from_str(json_text).unwrap();
        assert_eq!(parsed, record());
        assert_eq!(files[1].1, "<html>doc</html>");
        assert!(files[2].1.contains(r#"href="./2025-01-15.html""#));
        assert_eq!(files[3].1, "<html>doc</html>");
    }

    #[tokio::test]
    async fn test_publish_twice_is_idempotent() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        init_repo(tmp.path());
        let p = publisher(tmp.path(), false, None);

        let first = p.publish(&record(), "<html>doc</html>").await.unwrap();
        assert_eq!(first, PublishOutcome::Committed { pushed: false });
        let after_first = snapshot(tmp.path());
        assert_eq!(head_count(tmp.path()), 1);

        let second = p.publish(&record(), "<html>doc</html>").await.unwrap();
        assert_eq!(second, PublishOutcome::Unchanged);
        assert_eq!(snapshot(tmp.path()), after_first);
        assert_eq!(head_count(tmp.path()), 1);
    }

    #[tokio::test]
    async fn test_changed_document_commits_again() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        init_repo(tmp.path());
        let p = publisher(tmp.path(), false, None);

        p.publish(&record(), "<html>v1</html>").await.unwrap();
        let outcome = p.publish(&record(), "<html>v2</html>").await.unwrap();
        assert_eq!(outcome, PublishOutcome::Committed { pushed: false });
        assert_eq!(head_count(tmp.path()), 2);
    }

    #[tokio::test]
    async fn test_push_without_token_fails_after_commit() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        init_repo(tmp.path());
        let p = publisher(tmp.path(), true, None);

        let err = p.publish(&record(), "<html>doc</html>").await.unwrap_err();
        assert!(matches!(err, PublishError::Git(GitError::MissingToken)));
        // no rollback: the commit stays
        assert_eq!(head_count(tmp.path()), 1);
    }

    #[tokio::test]
    async fn test_outside_repository_is_git_error() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let p = publisher(tmp.path(), false, None);

        let err = p.publish(&record(), "<html>doc</html>").await.unwrap_err();
        assert!(matches!(err, PublishError::Git(GitError::Failed { .. })));
        // files were still written before the git step failed
        assert!(tmp.path().join("index.html").exists());
    }
}
