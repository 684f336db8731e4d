//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a default, so running without a config file reproduces
//! the stock `jwang287/ai-daily-briefing` site with only the built-in
//! editorial picks. Command-line flags are applied on top in `main`.
//!
//! ```yaml
//! site:
//!   root: /srv/ai-daily-briefing
//!   template: assets/template.html
//! github:
//!   user: jwang287
//!   repo: ai-daily-briefing
//!   branch: main
//!   remote: origin
//! editorial: true
//! feeds:
//!   - name: The Verge
//!     url: https://www.theverge.com/rss/ai-artificial-intelligence/index.xml
//!     category: hot
//!     limit: 4
//! ```

use crate::models::Category;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid feed url {url:?}: {source}")]
    FeedUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub github: GitHubConfig,
    /// Include the built-in editorial picks.
    pub editorial: bool,
    pub feeds: Vec<FeedConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            github: GitHubConfig::default(),
            editorial: true,
            feeds: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Working tree of the published repository.
    pub root: PathBuf,
    /// Override template, relative to `root` unless absolute.
    pub template: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            template: PathBuf::from("assets/template.html"),
        }
    }
}

impl SiteConfig {
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template)
    }
}

/// Identity of the GitHub repository the site is pushed to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub user: String,
    pub repo: String,
    pub branch: String,
    pub remote: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            user: "jwang287".to_string(),
            repo: "ai-daily-briefing".to_string(),
            branch: "main".to_string(),
            remote: "origin".to_string(),
        }
    }
}

impl GitHubConfig {
    /// Public repository page, linked from the default template footer.
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}/{}", self.user, self.repo)
    }

    /// GitHub Pages address the site is served from.
    pub fn pages_url(&self) -> String {
        format!("https://{}.github.io/{}/", self.user, self.repo)
    }

    /// Token-authenticated HTTPS remote used for pushing.
    pub fn push_url(&self, token: &str) -> String {
        format!(
            "https://{}@github.com/{}/{}.git",
            urlencoding::encode(token),
            self.user,
            self.repo
        )
    }
}

/// One RSS feed contributing to a single briefing section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// Display name used as the card attribution. Falls back to the channel title.
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
    pub category: Category,
    /// Maximum items taken from this feed.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Maximum characters kept from each description.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_chars() -> usize {
    120
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    #[instrument(level = "info", skip_all)]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), feeds = config.feeds.len(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as a map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for feed in &self.feeds {
            url::Url::parse(&feed.url).map_err(|source| ConfigError::FeedUrl {
                url: feed.url.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
