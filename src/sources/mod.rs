//! Upstream sources that feed the briefing.
//!
//! Every source implements [`Source`]: it is asked once per run for a
//! [`Harvest`], a flat list of items tagged with the section they belong to.
//! A source that fails returns an error; the assembler logs it and carries
//! on with the remaining sources.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Verge headlines | [`curated`] | reachability probe | Editorial hot picks, gated on The Verge AI section responding |
//! | Editorial picks | [`curated`] | none | Hand-curated trend and tutorial cards |
//! | RSS feeds | [`feed`] | RSS 2.0 over HTTP | Configured per section in `config.yaml` |
//!
//! All network calls share one `reqwest::Client` with a 30 second timeout.

pub mod curated;
pub mod feed;

use crate::config::Config;
use crate::models::{BriefingItem, Category};
use std::error::Error;
use std::time::Duration;

pub use curated::{EditorialPicks, VergeHeadlines};
pub use feed::RssFeed;

/// Timeout applied to every upstream request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Items collected from a single source, each tagged with its section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Harvest {
    items: Vec<(Category, BriefingItem)>,
}

impl Harvest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, category: Category, items: impl IntoIterator<Item = BriefingItem>) {
        self.items
            .extend(items.into_iter().map(|item| (category, item)));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, category: Category) -> usize {
        self.items.iter().filter(|(c, _)| *c == category).count()
    }

    pub fn into_items(self) -> Vec<(Category, BriefingItem)> {
        self.items
    }
}

/// A provider of briefing items.
///
/// Implementors are asked for their items exactly once per run. Errors are
/// isolated per source by the caller, so an implementation should fail
/// loudly rather than return partial data it cannot vouch for.
pub trait Source {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    /// Collect this source's items.
    async fn collect(&self) -> Result<Harvest, Box<dyn Error>>;
}

/// The closed set of sources that can be configured.
#[derive(Debug)]
pub enum ConfiguredSource {
    Headlines(VergeHeadlines),
    Editorial(EditorialPicks),
    Feed(RssFeed),
}

impl Source for ConfiguredSource {
    fn name(&self) -> &str {
        match self {
            ConfiguredSource::Headlines(s) => s.name(),
            ConfiguredSource::Editorial(s) => s.name(),
            ConfiguredSource::Feed(s) => s.name(),
        }
    }

    async fn collect(&self) -> Result<Harvest, Box<dyn Error>> {
        match self {
            ConfiguredSource::Headlines(s) => s.collect().await,
            ConfiguredSource::Editorial(s) => s.collect().await,
            ConfiguredSource::Feed(s) => s.collect().await,
        }
    }
}

/// Build the shared HTTP client used by all network sources.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Sources in the order they are consulted.
///
/// Editorial sources come first so they win the section caps; configured
/// feeds fill whatever room is left.
pub fn from_config(config: &Config, client: &reqwest::Client) -> Vec<ConfiguredSource> {
    let mut sources = Vec::new();
    if config.editorial {
        sources.push(ConfiguredSource::Headlines(VergeHeadlines::new(
            client.clone(),
        )));
        sources.push(ConfiguredSource::Editorial(EditorialPicks));
    }
    sources.extend(
        config
            .feeds
            .iter()
            .map(|feed| ConfiguredSource::Feed(RssFeed::new(client.clone(), feed.clone()))),
    );
    sources
}
