//! Data models for briefing items and the daily briefing record.
//!
//! This module defines the core data structures used throughout the application:
//! - [`BriefingItem`]: A single headline card (title, summary, attribution)
//! - [`Category`]: The three closed sections of a briefing and their styling
//! - [`BriefingRecord`]: One day's briefing, persisted as `data/<date>.json`
//!
//! Field names are snake_case on the wire, matching the published JSON schema
//! (`date`, `weekday`, `hot_news`, `trending`, `tutorials`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single news card.
///
/// Items have no identity beyond their contents and are never mutated after
/// construction.
///
/// # Fields
///
/// * `title` - Headline shown on the card
/// * `content` - One or two sentence summary
/// * `source` - Attribution line; empty when the upstream item had none
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BriefingItem {
    /// Headline shown in bold on the card.
    pub title: String,
    /// Summary text shown under the headline.
    pub content: String,
    /// Attribution shown after the 📰 marker.
    #[serde(default)]
    pub source: String,
}

impl BriefingItem {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
        }
    }
}

/// The three sections of a briefing.
///
/// Each section has a fixed item cap and a fixed card style. The set is
/// closed: adding a section means adding a variant here and handling it in
/// every `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 🔥 热门新闻, red cards badged `NEW`.
    Hot,
    /// 📈 热门趋势, amber cards badged `TREND`.
    Trend,
    /// 💡 教程与技能分享, green cards badged `TIP`.
    Tutorial,
}

impl Category {
    /// Maximum number of items kept for this section.
    pub fn cap(self) -> usize {
        match self {
            Category::Hot => 6,
            Category::Trend => 6,
            Category::Tutorial => 4,
        }
    }

    /// Badge label rendered next to the card title.
    pub fn badge(self) -> &'static str {
        match self {
            Category::Hot => "NEW",
            Category::Trend => "TREND",
            Category::Tutorial => "TIP",
        }
    }

    /// Accent colour used for the left border and the badge.
    pub fn color(self) -> &'static str {
        match self {
            Category::Hot => "#ef4444",
            Category::Trend => "#f59e0b",
            Category::Tutorial => "#10b981",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Category::Hot => "hot",
            Category::Trend => "trend",
            Category::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One day's briefing.
///
/// Each execution of the application produces one `BriefingRecord`, which is
/// serialized to `data/<date>.json` and rendered into the HTML page.
///
/// # Invariants
///
/// Built by [`crate::assembler::Assembler`], which guarantees:
/// - `hot_news` has exactly [`Category::Hot`]'s cap (6) entries
/// - `trending` has at most 6 entries
/// - `tutorials` has at most 4 entries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BriefingRecord {
    /// The briefing date in `YYYY-MM-DD` format.
    pub date: String,
    /// Chinese short weekday label, e.g. `周三`.
    pub weekday: String,
    /// 🔥 section.
    pub hot_news: Vec<BriefingItem>,
    /// 📈 section.
    pub trending: Vec<BriefingItem>,
    /// 💡 section.
    pub tutorials: Vec<BriefingItem>,
}

impl BriefingRecord {
    /// Items of a given section.
    pub fn items(&self, category: Category) -> &[BriefingItem] {
        match category {
            Category::Hot => &self.hot_news,
            Category::Trend => &self.trending,
            Category::Tutorial => &self.tutorials,
        }
    }

    /// The header label, e.g. `2025-01-15 周三`.
    pub fn date_label(&self) -> String {
        format!("{} {}", self.date, self.weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BriefingRecord {
        BriefingRecord {
            date: "2025-01-15".to_string(),
            weekday: "周三".to_string(),
            hot_news: vec![BriefingItem::new("Hot", "Body", "The Verge")],
            trending: vec![],
            tutorials: vec![BriefingItem::new("Tip", "How-to", "Docs")],
        }
    }

    #[test]
    fn test_item_missing_source_defaults_to_empty() {
        let json = r#"{"title": "No source", "content": "Body"}"#;
        let item: BriefingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.source, "");
        assert_eq!(item.title, "No source");
    }

    #[test]
    fn test_record_serialization_keys() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, ["date", "hot_news", "trending", "tutorials", "weekday"]);

        let item = obj["hot_news"][0].as_object().unwrap();
        assert_eq!(item["title"], "Hot");
        assert_eq!(item["content"], "Body");
        assert_eq!(item["source"], "The Verge");
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "date": "2025-01-15",
            "weekday": "周三",
            "hot_news": [{"title": "A", "content": "B", "source": "C"}],
            "trending": [],
            "tutorials": []
        }"#;
        let record: BriefingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date_label(), "2025-01-15 周三");
        assert_eq!(record.items(Category::Hot).len(), 1);
        assert!(record.items(Category::Trend).is_empty());
    }

    #[test]
    fn test_category_styles_are_distinct() {
        assert_eq!(Category::Hot.badge(), "NEW");
        assert_eq!(Category::Trend.badge(), "TREND");
        assert_eq!(Category::Tutorial.badge(), "TIP");
        assert_eq!(Category::Hot.color(), "#ef4444");
        assert_eq!(Category::Trend.color(), "#f59e0b");
        assert_eq!(Category::Tutorial.color(), "#10b981");
    }

    #[test]
    fn test_category_caps() {
        assert_eq!(Category::Hot.cap(), 6);
        assert_eq!(Category::Trend.cap(), 6);
        assert_eq!(Category::Tutorial.cap(), 4);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let c: Category = serde_json::from_str(r#""tutorial""#).unwrap();
        assert_eq!(c, Category::Tutorial);
        assert_eq!(serde_json::to_string(&Category::Trend).unwrap(), r#""trend""#);
        assert_eq!(Category::Hot.to_string(), "hot");
    }
}
