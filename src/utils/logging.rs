/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use crate::services::DataTier;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug 或 info。
/// 日志写到 stderr，stdout 只留给界面输出。
pub fn init(verbose: bool) {
    let default_level = if verbose { "question_browser=debug" } else { "question_browser=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 精简数据: {}", config.minimal_data_source);
    info!("📁 完整数据: {}", config.full_data_source);
    info!("💾 存储文件: {}", config.storage_file);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载结果
pub fn log_questions_loaded(total: usize, tier: DataTier) {
    let tier = match tier {
        DataTier::Minimal => "精简",
        DataTier::Full => "完整",
    };
    info!("✓ 共载入 {} 道题（{}数据集）", total, tier);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_chars() {
        assert_eq!(truncate_text("什么是闭包？", 3), "什么是...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
