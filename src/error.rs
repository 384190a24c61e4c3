use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据加载错误
    #[error("加载错误: {0}")]
    Load(#[from] LoadError),
    /// 浏览操作错误
    #[error("浏览错误: {0}")]
    Browse(#[from] BrowseError),
    /// 存储读写错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据加载错误
///
/// 区分"拿不到数据"和"拿到了但解析不了"两种情况
#[derive(Debug, Error)]
pub enum LoadError {
    /// 资源不可达（网络失败、文件不存在或状态码非 2xx）
    #[error("资源不可达 ({source_name}): {reason}")]
    ResourceUnreachable { source_name: String, reason: String },
    /// JSON 解析失败，附带内容首尾片段便于排查
    #[error("JSON解析失败 ({source_name}): {message}\n{excerpt}")]
    ParseFailure {
        source_name: String,
        message: String,
        excerpt: Excerpt,
    },
}

/// 出错内容的首尾片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub head: String,
    pub tail: String,
}

impl Excerpt {
    /// 截取 `text` 的前 `n` 个和后 `n` 个字符
    pub fn of(text: &str, n: usize) -> Self {
        let total = text.chars().count();
        let head = text.chars().take(n).collect();
        let tail = text.chars().skip(total.saturating_sub(n)).collect();
        Self { head, tail }
    }
}

impl std::fmt::Display for Excerpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "开头: {:?}\n结尾: {:?}", self.head, self.tail)
    }
}

/// 浏览操作错误
#[derive(Debug, Error)]
pub enum BrowseError {
    /// 请求的题目不存在
    #[error("题目不存在: #{id}")]
    NoRecordFound { id: i64 },
}

/// 存储读写错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取存储文件失败
    #[error("读取存储失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入存储文件失败
    #[error("写入存储失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 存储内容不是合法 JSON
    #[error("存储内容损坏 ({key}): {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件 {path} 解析失败: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建题目不存在错误
    pub fn no_record(id: i64) -> Self {
        AppError::Browse(BrowseError::NoRecordFound { id })
    }
}

impl LoadError {
    /// 创建资源不可达错误
    pub fn unreachable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::ResourceUnreachable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_head_and_tail() {
        let excerpt = Excerpt::of("abcdefghij", 3);
        assert_eq!(excerpt.head, "abc");
        assert_eq!(excerpt.tail, "hij");
    }

    #[test]
    fn excerpt_of_short_text_is_whole_text() {
        let excerpt = Excerpt::of("题目", 100);
        assert_eq!(excerpt.head, "题目");
        assert_eq!(excerpt.tail, "题目");
    }

    #[test]
    fn parse_failure_message_contains_excerpt() {
        let err = LoadError::ParseFailure {
            source_name: "data.json".into(),
            message: "EOF while parsing".into(),
            excerpt: Excerpt::of("[{\"id\": 1", 4),
        };
        let text = err.to_string();
        assert!(text.contains("data.json"));
        assert!(text.contains("[{\\\"i"));
    }
}
