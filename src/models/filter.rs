use std::fmt;
use std::str::FromStr;

/// 分类过滤条件
///
/// `all` / `bookmarked` / `code` 是固定名称，其余字符串按分类名精确匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Bookmarked,
    Code,
    Category(String),
}

impl CategoryFilter {
    pub fn name(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Bookmarked => "bookmarked",
            CategoryFilter::Code => "code",
            CategoryFilter::Category(name) => name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => CategoryFilter::All,
            "bookmarked" => CategoryFilter::Bookmarked,
            "code" => CategoryFilter::Code,
            other => CategoryFilter::Category(other.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
