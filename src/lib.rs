//! # Question Browser
//!
//! 一个在终端里浏览问答题库的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `ResourceFetcher` - 按地址取回文本（http / 本地文件）
//! - `KeyValueStore` - 书签和主题的持久化
//! - `Environment` - 环境偏好的配色
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心界面
//! - `DataLoader` - 精简 → 完整 两级加载
//! - `visible_questions` - 分类过滤 + 搜索（纯函数）
//! - `BookmarkStore` - 书签切换与持久化
//! - `ThemeService` / `QuestionStats`
//!
//! ### ③ 渲染层（Render）
//! - `render/` - 列表、详情（Markdown + 代码着色）、统计面板
//!
//! ### ④ 应用层（App）
//! - `app::QuestionBrowser` - 持有全部状态，逐条处理命令
//!
//! ## 模块结构

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::{LoadStatus, Outcome, QuestionBrowser};
pub use command::Command;
pub use config::Config;
pub use error::{AppError, AppResult, BrowseError, LoadError};
pub use models::{CategoryFilter, QuestionRecord, ThemeMode, UiState};
pub use services::{visible_questions, BookmarkStore, DataLoader, QuestionStats};
