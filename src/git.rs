//! Thin async wrapper around the `git` command line.
//!
//! Commands run with the site root as working directory, stdin closed and
//! output captured. A non-zero exit becomes [`GitError::Failed`] carrying
//! stderr. Any configured secret is masked in arguments and stderr before
//! it reaches an error message or a log line.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `git {args}`: {source}")]
    Spawn {
        args: String,
        source: std::io::Error,
    },

    #[error("`git {args}` exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no GitHub token configured; refusing to push")]
    MissingToken,
}

/// A git working tree.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
    secret: Option<String>,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            secret: None,
        }
    }

    /// Mask `secret` wherever it would otherwise show up in errors and logs.
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret.filter(|s| !s.is_empty());
        self
    }

    fn mask(&self, text: &str) -> String {
        match &self.secret {
            Some(secret) => {
                let encoded = urlencoding::encode(secret);
                text.replace(encoded.as_ref(), "***").replace(secret.as_str(), "***")
            }
            None => text.to_string(),
        }
    }

    /// Run `git <args>` and return its stdout.
    #[instrument(level = "debug", skip_all, fields(cmd = %self.mask(&args.join(" "))))]
    pub async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                args: self.mask(&args.join(" ")),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                args: self.mask(&args.join(" ")),
                status: output.status,
                stderr: self.mask(String::from_utf8_lossy(&output.stderr).trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "git finished");
        Ok(stdout)
    }

    pub async fn set_config(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.run(&["config", key, value]).await.map(drop)
    }

    /// Stage everything in the working tree.
    pub async fn add_all(&self) -> Result<(), GitError> {
        self.run(&["add", "."]).await.map(drop)
    }

    /// `git status --porcelain`; empty when the tree matches `HEAD`.
    pub async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain"]).await
    }

    pub async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).await.map(drop)
    }

    pub async fn set_remote_url(&self, remote: &str, url: &str) -> Result<(), GitError> {
        self.run(&["remote", "set-url", remote, url]).await.map(drop)
    }

    pub async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(&["push", remote, branch]).await.map(drop)
    }
}
