use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "question_browser.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 精简数据源（优先尝试）
    pub minimal_data_source: String,
    /// 完整数据源（精简数据源失败时使用）
    pub full_data_source: String,
    /// 书签和主题的持久化文件
    pub storage_file: String,
    /// 精简数据提示自动消失的秒数
    pub notice_dismiss_secs: u64,
    /// 解析失败时展示的首尾字符数
    pub excerpt_len: usize,
    /// 环境偏好的配色方案（"dark" / "light"），未设置时自动检测
    pub prefers_color_scheme: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 加载失败后是否直接退出
    pub exit_on_load_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimal_data_source: "data_minimal.json".to_string(),
            full_data_source: "data.json".to_string(),
            storage_file: "question_browser_storage.json".to_string(),
            notice_dismiss_secs: 3,
            excerpt_len: 100,
            prefers_color_scheme: None,
            verbose_logging: false,
            exit_on_load_error: false,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 按 默认值 → 配置文件 → 环境变量 的顺序加载
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("QUESTION_BROWSER_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let path = Path::new(&path);

        let base = if path.exists() {
            Self::from_file(path)?
        } else if let Some(explicit) = explicit {
            return Err(ConfigError::ReadFailed {
                path: explicit,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        } else {
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    /// 只使用默认值和环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            minimal_data_source: std::env::var("MINIMAL_DATA_SOURCE").unwrap_or(base.minimal_data_source),
            full_data_source: std::env::var("FULL_DATA_SOURCE").unwrap_or(base.full_data_source),
            storage_file: std::env::var("STORAGE_FILE").unwrap_or(base.storage_file),
            notice_dismiss_secs: std::env::var("NOTICE_DISMISS_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.notice_dismiss_secs),
            excerpt_len: std::env::var("EXCERPT_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(base.excerpt_len),
            prefers_color_scheme: std::env::var("PREFERS_COLOR_SCHEME").ok().or(base.prefers_color_scheme),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            exit_on_load_error: std::env::var("EXIT_ON_LOAD_ERROR").ok().and_then(|v| v.parse().ok()).unwrap_or(base.exit_on_load_error),
        }
    }
}
