//! Hand-curated editorial content.
//!
//! Two sources live here:
//! - [`VergeHeadlines`]: the day's lead stories, attributed to The Verge.
//!   They are only published when The Verge's AI section answers at all,
//!   so a network outage shows up as placeholder cards instead of stale
//!   picks. An error status still counts as an answer.
//! - [`EditorialPicks`]: trend and tutorial cards that need no network.

use super::{Harvest, Source};
use crate::models::{BriefingItem, Category};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// The Verge's AI section, probed before publishing its headlines.
pub const VERGE_AI_URL: &str = "https://www.theverge.com/ai-artificial-intelligence";

const VERGE_HEADLINES: [(&str, &str, &str); 2] = [
    (
        "OpenAI 挖角 Anthropic 安全高管",
        "Dylan Scandinaro 从 Anthropic AGI 安全岗位跳槽至 OpenAI，担任'准备就绪负责人'。他警告 AI 风险巨大，时间紧迫。",
        "The Verge",
    ),
    (
        "Sam Altman 宣称已接近 AGI",
        "Altman 在采访中表示'我们基本已经构建了 AGI 或非常接近'，但随后改口称是'精神层面而非字面意义'。",
        "Forbes / The Verge",
    ),
];

const TRENDING: [(&str, &str, &str); 6] = [
    (
        "Google Project Genie 引发版权争议",
        "Google 的 AI 世界模型可精确复制游戏，任天堂法律团队已密切关注。",
        "The Verge",
    ),
    (
        "AI Agent 投资热潮持续",
        "2024年 Q4 AI Agent 领域融资超 50 亿美元，垂直领域应用成为新焦点。",
        "TechCrunch",
    ),
    (
        "Grok 深度伪造问题引关注",
        "X 平台安全团队多次警告管理层，Grok 生成的深度伪造内容泛滥。",
        "Washington Post",
    ),
    (
        "AI 监管政策加速推进",
        "欧盟 AI 法案实施在即，美国各州立法进程加快。",
        "Multiple",
    ),
    (
        "Rabbit 发布新 AI 硬件项目",
        "Rabbit 宣布'Project Cyberdeck'便携设备，专为 vibe-coding 设计。",
        "Rabbit",
    ),
    (
        "生成式 AI 创作质量争议",
        "游戏制作人 Suda 51 指出 AI 生成内容'感觉不对劲'，引发创意产业讨论。",
        "Eurogamer",
    ),
];

const TUTORIALS: [(&str, &str, &str); 4] = [
    (
        "Claude 3.5 提示词优化指南",
        "通过结构化提示词和示例链式调用，提升代码生成任务准确率 40%。包含 5 个实战模板。",
        "Anthropic Docs",
    ),
    (
        "GPT-5 新功能快速上手",
        "原生视频理解、实时语音交互功能详解，API 成本降低 50% 后的最佳实践迁移方案。",
        "OpenAI Blog",
    ),
    (
        "AI Agent 开发入门：从理论到实践",
        "使用 LangChain 和 AutoGPT 构建第一个自主代理，涵盖记忆管理、工具调用和任务规划。",
        "GitHub / Medium",
    ),
    (
        "企业 AI 合规检查清单",
        "欧盟 AI 法案合规要点，数据隐私保护最佳实践，以及模型审计文档准备指南。",
        "Legal AI Resources",
    ),
];

fn to_items(rows: &[(&str, &str, &str)]) -> impl Iterator<Item = BriefingItem> {
    rows.iter()
        .map(|(title, content, source)| BriefingItem::new(*title, *content, *source))
}

/// Lead stories, published only while The Verge's AI section is reachable.
#[derive(Debug, Clone)]
pub struct VergeHeadlines {
    client: reqwest::Client,
    url: String,
}

impl VergeHeadlines {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: VERGE_AI_URL.to_string(),
        }
    }
}

impl Source for VergeHeadlines {
    fn name(&self) -> &str {
        "The Verge"
    }

    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn collect(&self) -> Result<Harvest, Box<dyn Error>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, "The Verge AI section reachable");
        } else {
            warn!(%status, "The Verge AI section answered with an error status");
        }

        let mut harvest = Harvest::new();
        harvest.extend(Category::Hot, to_items(&VERGE_HEADLINES));
        info!(count = harvest.len(), "Collected Verge headlines");
        Ok(harvest)
    }
}

/// Hand-picked trend and tutorial cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialPicks;

impl Source for EditorialPicks {
    fn name(&self) -> &str {
        "Editorial picks"
    }

    async fn collect(&self) -> Result<Harvest, Box<dyn Error>> {
        let mut harvest = Harvest::new();
        harvest.extend(Category::Trend, to_items(&TRENDING));
        harvest.extend(Category::Tutorial, to_items(&TUTORIALS));
        info!(
            trending = harvest.count(Category::Trend),
            tutorials = harvest.count(Category::Tutorial),
            "Collected editorial picks"
        );
        Ok(harvest)
    }
}
