//! 题目加载服务 - 业务能力层
//!
//! 只负责"拿到题目列表"，先试精简数据，再退回完整数据

use crate::config::Config;
use crate::error::{Excerpt, LoadError};
use crate::infrastructure::ResourceFetcher;
use crate::models::QuestionRecord;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// 数据来源级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTier {
    /// 精简数据集
    Minimal,
    /// 完整数据集
    Full,
}

/// 会自动消失的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: Vec<QuestionRecord>,
    pub tier: DataTier,
    pub notice: Option<Notice>,
}

/// 题目加载服务
///
/// 职责：
/// - 按 精简 → 完整 的顺序取数据
/// - 完整数据先取文本再显式解析，区分传输失败和解析失败
/// - 不渲染任何内容
pub struct DataLoader<F> {
    fetcher: F,
    minimal_source: String,
    full_source: String,
    notice_ttl: Duration,
    excerpt_len: usize,
}

impl<F: ResourceFetcher> DataLoader<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            minimal_source: config.minimal_data_source.clone(),
            full_source: config.full_data_source.clone(),
            notice_ttl: Duration::from_secs(config.notice_dismiss_secs),
            excerpt_len: config.excerpt_len,
        }
    }

    /// 加载题目
    ///
    /// 最终失败时记录错误日志并返回，由调用方替换加载提示
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        info!("📥 正在加载题目...");

        match self.load_minimal().await {
            Ok(records) => {
                info!("✓ 精简数据加载成功，共 {} 道题", records.len());
                let notice = Notice::new(
                    format!(
                        "⚠️ 正在使用精简数据集，只有 {} 道题，完整数据未加载。这是题目有限的演示版本。",
                        records.len()
                    ),
                    self.notice_ttl,
                );
                return Ok(LoadOutcome {
                    records,
                    tier: DataTier::Minimal,
                    notice: Some(notice),
                });
            }
            Err(e) => {
                warn!("无法加载精简数据，改用完整数据 {}: {}", self.full_source, e);
            }
        }

        match self.load_full().await {
            Ok(records) => {
                info!("✓ 完整数据加载成功，共 {} 道题", records.len());
                Ok(LoadOutcome {
                    records,
                    tier: DataTier::Full,
                    notice: None,
                })
            }
            Err(e) => {
                error!("❌ 加载题目失败: {}", e);
                Err(e)
            }
        }
    }

    async fn load_minimal(&self) -> Result<Vec<QuestionRecord>, LoadError> {
        let text = self.fetcher.fetch_text(&self.minimal_source).await?;
        serde_json::from_str(&text).map_err(|e| LoadError::ParseFailure {
            source_name: self.minimal_source.clone(),
            message: e.to_string(),
            excerpt: Excerpt::of(&text, self.excerpt_len),
        })
    }

    async fn load_full(&self) -> Result<Vec<QuestionRecord>, LoadError> {
        let text = self.fetcher.fetch_text(&self.full_source).await?;
        parse_records(&self.full_source, &text, self.excerpt_len)
    }
}

/// 显式解析题目 JSON，失败时带上首尾片段
pub fn parse_records(
    source_name: &str,
    text: &str,
    excerpt_len: usize,
) -> Result<Vec<QuestionRecord>, LoadError> {
    serde_json::from_str(text).map_err(|e| {
        let excerpt = Excerpt::of(text, excerpt_len);
        error!("JSON 解析错误 ({}): {}", source_name, e);
        error!("响应前 {} 个字符: {}", excerpt_len, excerpt.head);
        error!("响应后 {} 个字符: {}", excerpt_len, excerpt.tail);
        LoadError::ParseFailure {
            source_name: source_name.to_string(),
            message: e.to_string(),
            excerpt,
        }
    })
}
