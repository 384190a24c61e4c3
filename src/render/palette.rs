use crate::models::ThemeMode;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";

/// 终端配色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
    pub tag: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub comment: &'static str,
    pub number: &'static str,
    pub code: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    /// 图表分段颜色，分类超过四个时循环使用
    pub segments: [&'static str; 4],
}

const LIGHT: Palette = Palette {
    heading: "\x1b[38;5;55m",
    accent: "\x1b[38;5;62m",
    muted: "\x1b[38;5;244m",
    tag: "\x1b[38;5;29m",
    keyword: "\x1b[38;5;127m",
    string: "\x1b[38;5;28m",
    comment: "\x1b[38;5;245m",
    number: "\x1b[38;5;166m",
    code: "\x1b[38;5;236m",
    error: "\x1b[38;5;160m",
    warning: "\x1b[38;5;130m",
    segments: ["\x1b[38;5;62m", "\x1b[38;5;36m", "\x1b[38;5;208m", "\x1b[38;5;196m"],
};

const DARK: Palette = Palette {
    heading: "\x1b[38;5;147m",
    accent: "\x1b[38;5;111m",
    muted: "\x1b[38;5;246m",
    tag: "\x1b[38;5;79m",
    keyword: "\x1b[38;5;213m",
    string: "\x1b[38;5;114m",
    comment: "\x1b[38;5;242m",
    number: "\x1b[38;5;215m",
    code: "\x1b[38;5;252m",
    error: "\x1b[38;5;203m",
    warning: "\x1b[38;5;221m",
    segments: ["\x1b[38;5;105m", "\x1b[38;5;79m", "\x1b[38;5;215m", "\x1b[38;5;203m"],
};

impl Palette {
    pub fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    pub fn segment(&self, index: usize) -> &'static str {
        self.segments[index % self.segments.len()]
    }
}

/// 用颜色包裹一段文本
pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

/// 去掉 ANSI 转义序列，测试和宽度计算用
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
