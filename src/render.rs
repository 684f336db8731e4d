//! HTML rendering of a [`BriefingRecord`].
//!
//! Rendering is plain textual substitution of five placeholder tokens:
//!
//! | Token | Value |
//! |-------|-------|
//! | `{{DATE}}` | `"{date} {weekday}"` |
//! | `{{HOT_NEWS}}` | hot cards joined by newlines |
//! | `{{TRENDING}}` | trend cards joined by newlines |
//! | `{{TUTORIALS}}` | tutorial cards joined by newlines |
//! | `{{GENERATED_AT}}` | caller supplied timestamp |
//!
//! The template is scanned once. Text that comes from a substituted value is
//! never scanned again, so an item whose title contains `{{TRENDING}}` is
//! emitted verbatim. Values are not HTML-escaped.

use crate::models::{BriefingItem, BriefingRecord, Category};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(DATE|HOT_NEWS|TRENDING|TUTORIALS|GENERATED_AT)\}\}").unwrap()
});

/// Load the override template at `path`, falling back to the built-in one.
///
/// A missing override is the normal case and is not an error. An override
/// that exists but cannot be read is logged and also falls back.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_template(path: &Path, repo_url: &str) -> String {
    match fs::read_to_string(path).await {
        Ok(template) => {
            info!(bytes = template.len(), "Using override template");
            template
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No override template; using built-in default");
            default_template(repo_url)
        }
        Err(e) => {
            warn!(error = %e, "Override template unreadable; using built-in default");
            default_template(repo_url)
        }
    }
}

/// Merge `record` into `template`.
pub fn render(template: &str, record: &BriefingRecord, generated_at: &str) -> String {
    let date = record.date_label();
    let hot = render_section(record.items(Category::Hot), Category::Hot);
    let trending = render_section(record.items(Category::Trend), Category::Trend);
    let tutorials = render_section(record.items(Category::Tutorial), Category::Tutorial);

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let value = match &caps[1] {
                "DATE" => date.as_str(),
                "HOT_NEWS" => hot.as_str(),
                "TRENDING" => trending.as_str(),
                "TUTORIALS" => tutorials.as_str(),
                _ => generated_at,
            };
            value.to_string()
        })
        .into_owned()
}

/// All cards of one section, newline separated.
pub fn render_section(items: &[BriefingItem], category: Category) -> String {
    items
        .iter()
        .map(|item| render_card(item, category))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One card fragment, styled by `category`.
pub fn render_card(item: &BriefingItem, category: Category) -> String {
    let color = category.color();
    let badge = category.badge();
    format!(
        r#"
            <div class="card" style="border-left: 4px solid {color}">
                <div class="card-title">{title} <span class="badge" style="background: {color}20; color: {color}; padding: 2px 8px; border-radius: 10px; font-size: 0.7em;">{badge}</span></div>
                <div class="card-content">{content}</div>
                <div class="card-source">📰 {source}</div>
            </div>
            "#,
        title = item.title,
        content = item.content,
        source = item.source,
    )
}

/// The built-in page, linking its footer to `repo_url`.
///
/// Each of the five tokens appears exactly once.
pub fn default_template(repo_url: &str) -> String {
    format!("{DEFAULT_TEMPLATE_HEAD}{repo_url}{DEFAULT_TEMPLATE_TAIL}")
}

const DEFAULT_TEMPLATE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI 每日简报</title>
    <style>
        @import url('https://fonts.googleapis.com/css2?family=Noto+Sans+SC:wght@300;400;500;700&display=swap');
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Noto Sans SC', -apple-system, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; padding: 20px; }
        .container { max-width: 900px; margin: 0 auto; background: rgba(255,255,255,0.95); border-radius: 20px; overflow: hidden; box-shadow: 0 25px 50px -12px rgba(0,0,0,0.25); }
        .header { background: linear-gradient(135deg, #667eea, #764ba2); color: white; padding: 40px 30px; text-align: center; }
        .header h1 { font-size: 2.5em; margin-bottom: 10px; }
        .date { display: inline-block; margin-top: 15px; padding: 8px 20px; background: rgba(255,255,255,0.2); border-radius: 20px; }
        .content { padding: 30px; }
        .section { margin-bottom: 35px; }
        .section-title { font-size: 1.4em; font-weight: 700; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 3px solid #667eea; display: flex; align-items: center; gap: 10px; }
        .card { background: white; border-radius: 12px; padding: 20px; margin-bottom: 15px; box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1); }
        .card-title { font-weight: 600; font-size: 1.1em; margin-bottom: 8px; display: flex; align-items: center; gap: 8px; }
        .card-content { color: #6b7280; line-height: 1.6; }
        .card-source { margin-top: 10px; font-size: 0.8em; color: #9ca3af; }
        .footer { background: #f9fafb; padding: 20px; text-align: center; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 0.85em; }
        .footer a { color: #667eea; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>⚡ AI 每日简报</h1>
            <p>人工智能行业动态 · 趋势洞察 · 技能分享</p>
            <span class="date">{{DATE}} | 生成于 {{GENERATED_AT}}</span>
        </div>
        <div class="content">
            <div class="section">
                <div class="section-title">🔥 热门新闻</div>
                {{HOT_NEWS}}
            </div>
            <div class="section">
                <div class="section-title">📈 热门趋势</div>
                {{TRENDING}}
            </div>
            <div class="section">
                <div class="section-title">💡 教程与技能分享</div>
                {{TUTORIALS}}
            </div>
        </div>
        <div class="footer">
            <p>数据来源: The Verge, TechCrunch, OpenAI, Anthropic 等</p>
            <p><a href="archive/index.html">往期简报</a> | <a href=""#;

const DEFAULT_TEMPLATE_TAIL: &str = r#"">GitHub</a></p>
        </div>
    </div>
</body>
</html>"#;
