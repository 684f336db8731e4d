//! Content assembly: turn source harvests into one [`BriefingRecord`].
//!
//! The assembler enforces the briefing's shape regardless of what the
//! sources return:
//! - per-section caps (hot 6, trend 6, tutorial 4), excess dropped in
//!   collection order
//! - duplicate titles within a section dropped, first occurrence wins
//! - `hot_news` padded with placeholder cards up to six entries, skipping
//!   placeholder numbers whose title was already collected
//! - a failing source contributes nothing and never aborts the run

use crate::models::{BriefingItem, BriefingRecord, Category};
use crate::sources::{Harvest, Source};
use crate::utils::weekday_label;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{error, info, instrument, warn};

/// Content of a placeholder card.
pub const PENDING_CONTENT: &str = "内容获取中，请稍后查看更新...";

/// Attribution of a placeholder card.
pub const PLACEHOLDER_SOURCE: &str = "AI Daily";

/// Placeholder card for 1-based hot slot `n`.
pub fn placeholder(n: usize) -> BriefingItem {
    BriefingItem::new(format!("AI 新闻 {}", n), PENDING_CONTENT, PLACEHOLDER_SOURCE)
}

/// Builds the briefing for one calendar day.
#[derive(Debug, Clone, Copy)]
pub struct Assembler {
    date: NaiveDate,
}

impl Assembler {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Ask every source in order and build the record from what they return.
    ///
    /// Sources are consulted one at a time. A source error is logged and
    /// treated as an empty harvest.
    #[instrument(level = "info", skip_all, fields(date = %self.date, sources = sources.len()))]
    pub async fn assemble<S: Source>(&self, sources: &[S]) -> BriefingRecord {
        let harvests: Vec<Harvest> = stream::iter(sources)
            .then(|source| async move {
                match source.collect().await {
                    Ok(harvest) if harvest.is_empty() => {
                        warn!(source = source.name(), "Source returned no items");
                        harvest
                    }
                    Ok(harvest) => {
                        info!(source = source.name(), count = harvest.len(), "Source collected");
                        harvest
                    }
                    Err(e) => {
                        error!(source = source.name(), error = %e, "Source failed; contributing no items");
                        Harvest::new()
                    }
                }
            })
            .collect()
            .await;

        self.build(harvests.into_iter().flat_map(Harvest::into_items))
    }

    /// Apply dedupe, caps and padding to collected items.
    pub fn build(&self, items: impl IntoIterator<Item = (Category, BriefingItem)>) -> BriefingRecord {
        let mut sections: [Vec<BriefingItem>; 3] = Default::default();
        for (category, item) in items {
            sections[section_index(category)].push(item);
        }
        let [hot, trend, tutorial] = sections;

        let mut hot_news = cap(Category::Hot, hot);
        let trending = cap(Category::Trend, trend);
        let tutorials = cap(Category::Tutorial, tutorial);

        if hot_news.len() < Category::Hot.cap() {
            warn!(
                collected = hot_news.len(),
                "Padding hot news with placeholders"
            );
        }
        let mut slot = hot_news.len();
        while hot_news.len() < Category::Hot.cap() {
            slot += 1;
            let filler = placeholder(slot);
            // a collected item may already carry this title
            if hot_news.iter().any(|item| item.title == filler.title) {
                continue;
            }
            hot_news.push(filler);
        }

        let record = BriefingRecord {
            date: self.date.format("%Y-%m-%d").to_string(),
            weekday: weekday_label(self.date).to_string(),
            hot_news,
            trending,
            tutorials,
        };
        info!(
            date = %record.date,
            hot_news = record.hot_news.len(),
            trending = record.trending.len(),
            tutorials = record.tutorials.len(),
            "Assembled briefing"
        );
        record
    }
}

fn section_index(category: Category) -> usize {
    match category {
        Category::Hot => 0,
        Category::Trend => 1,
        Category::Tutorial => 2,
    }
}

fn cap(category: Category, items: Vec<BriefingItem>) -> Vec<BriefingItem> {
    let collected = items.len();
    let kept: Vec<BriefingItem> = items
        .into_iter()
        .unique_by(|item| item.title.clone())
        .take(category.cap())
        .collect();
    if kept.len() < collected {
        info!(%category, collected, kept = kept.len(), "Dropped duplicate or excess items");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    struct StaticSource {
        name: &'static str,
        harvest: Harvest,
    }

    impl StaticSource {
        fn new(name: &'static str, category: Category, titles: &[&str]) -> Self {
            let mut harvest = Harvest::new();
            harvest.extend(
                category,
                titles
                    .iter()
                    .map(|t| BriefingItem::new(*t, format!("{t} body"), name)),
            );
            Self { name, harvest }
        }
    }

    enum TestSource {
        Static(StaticSource),
        Failing,
    }

    impl Source for TestSource {
        fn name(&self) -> &str {
            match self {
                TestSource::Static(s) => s.name,
                TestSource::Failing => "failing",
            }
        }

        async fn collect(&self) -> Result<Harvest, Box<dyn Error>> {
            match self {
                TestSource::Static(s) => Ok(s.harvest.clone()),
                TestSource::Failing => Err("connection reset".into()),
            }
        }
    }

    fn assembler() -> Assembler {
        Assembler::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn as_refs(v: &[String]) -> Vec<&str> {
        v.iter().map(String::as_str).collect()
    }

    fn titles(items: &[BriefingItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_sources_pads_hot_news() {
        let record = assembler().assemble::<TestSource>(&[]).await;
        assert_eq!(record.date, "2025-01-15");
        assert_eq!(record.weekday, "周三");
        assert_eq!(record.hot_news.len(), 6);
        assert!(record.trending.is_empty());
        assert!(record.tutorials.is_empty());
        for (i, item) in record.hot_news.iter().enumerate() {
            assert_eq!(item.title, format!("AI 新闻 {}", i + 1));
            assert_eq!(item.content, PENDING_CONTENT);
        }
    }

    #[tokio::test]
    async fn test_padding_continues_numbering() {
        let sources = [TestSource::Static(StaticSource::new(
            "a",
            Category::Hot,
            &["one", "two"],
        ))];
        let record = assembler().assemble(&sources).await;
        assert_eq!(
            titles(&record.hot_news),
            ["one", "two", "AI 新闻 3", "AI 新闻 4", "AI 新闻 5", "AI 新闻 6"]
        );
    }

    #[tokio::test]
    async fn test_caps_drop_excess_in_order() {
        let hot: Vec<String> = (1..=9).map(|i| format!("hot {i}")).collect();
        let trend: Vec<String> = (1..=8).map(|i| format!("trend {i}")).collect();
        let tut: Vec<String> = (1..=7).map(|i| format!("tut {i}")).collect();

        let sources = [
            TestSource::Static(StaticSource::new("h", Category::Hot, &as_refs(&hot))),
            TestSource::Static(StaticSource::new("t", Category::Trend, &as_refs(&trend))),
            TestSource::Static(StaticSource::new("u", Category::Tutorial, &as_refs(&tut))),
        ];
        let record = assembler().assemble(&sources).await;
        assert_eq!(record.hot_news.len(), 6);
        assert_eq!(record.trending.len(), 6);
        assert_eq!(record.tutorials.len(), 4);
        assert_eq!(record.hot_news[5].title, "hot 6");
        assert_eq!(record.trending[0].title, "trend 1");
        assert_eq!(record.tutorials[3].title, "tut 4");
    }

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let sources = [
            TestSource::Failing,
            TestSource::Static(StaticSource::new("ok", Category::Trend, &["still here"])),
            TestSource::Failing,
        ];
        let record = assembler().assemble(&sources).await;
        assert_eq!(titles(&record.trending), ["still here"]);
        assert_eq!(record.hot_news.len(), 6);
        assert_eq!(record.hot_news[0].title, "AI 新闻 1");
    }

    #[tokio::test]
    async fn test_duplicate_titles_dropped_within_section() {
        let sources = [
            TestSource::Static(StaticSource::new("a", Category::Trend, &["same", "other"])),
            TestSource::Static(StaticSource::new("b", Category::Trend, &["same"])),
            TestSource::Static(StaticSource::new("c", Category::Tutorial, &["same"])),
        ];
        let record = assembler().assemble(&sources).await;
        assert_eq!(titles(&record.trending), ["same", "other"]);
        assert_eq!(record.trending[0].source, "a");
        assert_eq!(titles(&record.tutorials), ["same"]);
    }

    #[test]
    fn test_build_keeps_section_order_across_sources() {
        let items = vec![
            (Category::Hot, BriefingItem::new("h1", "", "x")),
            (Category::Trend, BriefingItem::new("t1", "", "x")),
            (Category::Hot, BriefingItem::new("h2", "", "y")),
        ];
        let record = assembler().build(items);
        assert_eq!(&titles(&record.hot_news)[..2], ["h1", "h2"]);
        assert_eq!(titles(&record.trending), ["t1"]);
    }

    #[test]
    fn test_padding_skips_taken_placeholder_titles() {
        let items = ["AI 新闻 6", "h2", "h3", "h4", "h5"]
            .map(|t| (Category::Hot, BriefingItem::new(t, "", "x")));
        let record = assembler().build(items);
        assert_eq!(
            titles(&record.hot_news),
            ["AI 新闻 6", "h2", "h3", "h4", "h5", "AI 新闻 7"]
        );
        assert!(record.hot_news.iter().map(|i| &i.title).all_unique());
    }

    #[test]
    fn test_placeholder() {
        let item = placeholder(3);
        assert_eq!(item.title, "AI 新闻 3");
        assert_eq!(item.content, "内容获取中，请稍后查看更新...");
        assert_eq!(item.source, "AI Daily");
    }
}
