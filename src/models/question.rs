use serde::{Deserialize, Serialize};

/// 缺少 `type` 字段时使用的分类
pub const DEFAULT_CATEGORY: &str = "theory";

/// 判定"含代码示例"的代码块起始标记
///
/// 只认 javascript 标记的代码块，其他语言的代码块不算
pub const CODE_FENCE_MARKER: &str = "```javascript";

/// 单条问答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    /// Markdown 格式的答案
    pub answer: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl QuestionRecord {
    pub fn new(id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// 题目分类，缺省为 [`DEFAULT_CATEGORY`]
    pub fn category(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// 答案中是否含 javascript 代码块
    pub fn has_code_example(&self) -> bool {
        self.answer.contains(CODE_FENCE_MARKER)
    }
}
