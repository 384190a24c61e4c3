//! 交互命令解析

use crate::models::CategoryFilter;

/// 用户的一次操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 重新显示列表
    List,
    /// 设置搜索词，空字符串表示清除
    Search(String),
    Filter(CategoryFilter),
    Open(i64),
    Close,
    /// 带 id 时切换列表中的题目，不带时切换当前打开的题目
    Bookmark(Option<i64>),
    Theme,
    Stats,
    Reload,
    Help,
    Quit,
    /// 无法识别的输入
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" | "list" | "ls" => Command::List,
            "search" | "s" | "/" => Command::Search(rest.to_string()),
            "filter" | "f" => Command::Filter(rest.parse().unwrap_or_default()),
            "open" | "o" => match rest.parse() {
                Ok(id) => Command::Open(id),
                Err(_) => Command::Unknown(line.to_string()),
            },
            "close" | "back" => Command::Close,
            "bookmark" | "b" => {
                if rest.is_empty() {
                    Command::Bookmark(None)
                } else {
                    match rest.parse() {
                        Ok(id) => Command::Bookmark(Some(id)),
                        Err(_) => Command::Unknown(line.to_string()),
                    }
                }
            }
            "theme" | "t" => Command::Theme,
            "stats" => Command::Stats,
            "reload" => Command::Reload,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => match line.parse() {
                // 直接输入 id 等同于打开
                Ok(id) => Command::Open(id),
                Err(_) => Command::Unknown(line.to_string()),
            },
        }
    }
}

pub const HELP: &str = "\
可用命令:
  list                      显示当前列表
  search <关键词>           搜索题目和答案（不带关键词则清除）
  filter <all|bookmarked|code|分类名>
  open <id>                 查看题目详情（也可以直接输入 id）
  close                     返回列表
  bookmark [id]             切换收藏（详情页中可省略 id）
  theme                     切换浅色/深色主题
  stats                     显示统计
  reload                    重新加载题目
  quit                      退出";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("search  Event Loop "), Command::Search("Event Loop".into()));
        assert_eq!(Command::parse("search"), Command::Search(String::new()));
        assert_eq!(Command::parse("filter code"), Command::Filter(CategoryFilter::Code));
        assert_eq!(Command::parse("f coding"), Command::Filter(CategoryFilter::Category("coding".into())));
        assert_eq!(Command::parse("filter"), Command::Filter(CategoryFilter::All));
        assert_eq!(Command::parse("open 12"), Command::Open(12));
        assert_eq!(Command::parse("12"), Command::Open(12));
        assert_eq!(Command::parse("bookmark"), Command::Bookmark(None));
        assert_eq!(Command::parse("b 3"), Command::Bookmark(Some(3)));
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse(""), Command::List);
    }

    #[test]
    fn bad_ids_are_unknown() {
        assert_eq!(Command::parse("open abc"), Command::Unknown("open abc".into()));
        assert_eq!(Command::parse("bookmark x"), Command::Unknown("bookmark x".into()));
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".into()));
    }
}
