//! RSS 2.0 feed source.
//!
//! Fetches a configured feed and turns each `<item>` into a card:
//! - `title` comes from `<title>`; items without one are skipped
//! - `content` is `<description>` with markup stripped, whitespace collapsed
//!   and the result shortened to the feed's `max_chars`
//! - `source` is the configured display name, else the channel `<title>`

use super::{Harvest, Source};
use crate::config::FeedConfig;
use crate::models::BriefingItem;
use crate::utils::{shorten_chars, truncate_for_log};
use once_cell::sync::Lazy;
use quick_xml::de::DeError;
use regex::Regex;
use scraper::Html;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// A configured RSS feed.
#[derive(Debug, Clone)]
pub struct RssFeed {
    client: reqwest::Client,
    config: FeedConfig,
}

impl RssFeed {
    pub fn new(client: reqwest::Client, config: FeedConfig) -> Self {
        Self { client, config }
    }
}

impl Source for RssFeed {
    fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.config.url)
    }

    #[instrument(level = "info", skip_all, fields(url = %self.config.url, category = %self.config.category))]
    async fn collect(&self) -> Result<Harvest, Box<dyn Error>> {
        let body = self
            .client
            .get(&self.config.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), preview = %truncate_for_log(&body, 200), "Fetched feed");

        let items = parse_feed(&body, &self.config)?;
        let mut harvest = Harvest::new();
        harvest.extend(self.config.category, items);
        info!(count = harvest.len(), "Parsed feed items");
        Ok(harvest)
    }
}

/// Parse an RSS document into cards according to `config`.
pub fn parse_feed(xml: &str, config: &FeedConfig) -> Result<Vec<BriefingItem>, DeError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let channel_title = rss
        .channel
        .title
        .as_deref()
        .map(clean_text)
        .unwrap_or_default();
    let source = config.name.clone().unwrap_or(channel_title);
    let limit = config.limit.unwrap_or(usize::MAX);

    let items = rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let title = clean_text(item.title.as_deref()?);
            if title.is_empty() {
                return None;
            }
            let content = item
                .description
                .as_deref()
                .map(|d| shorten_chars(&strip_html(d), config.max_chars))
                .unwrap_or_default();
            Some(BriefingItem::new(title, content, source.clone()))
        })
        .take(limit)
        .collect();
    Ok(items)
}

/// Plain text of an HTML fragment, whitespace collapsed.
pub fn strip_html(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    let text = html.root_element().text().collect::<Vec<_>>().join(" ");
    clean_text(&text)
}

fn clean_text(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}
