//! 代码块语法着色
//!
//! 按行扫描的通用分词器：关键字、字符串、注释、数字，块注释可跨行。
//! 代码块的语言标记通过别名表映射到语言配置，未知语言原样输出。

use crate::render::palette::{paint, Palette};
use phf::phf_map;

/// 单门语言的分词配置
#[derive(Debug)]
pub struct LanguageConfig {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub line_comment: &'static str,
    pub block_comment: Option<(&'static str, &'static str)>,
}

static JAVASCRIPT: LanguageConfig = LanguageConfig {
    name: "JavaScript",
    keywords: &[
        "function", "var", "let", "const", "class", "new", "delete", "typeof", "instanceof",
        "void", "this", "super", "import", "export", "default", "from", "as", "of", "in",
        "async", "await", "if", "else", "switch", "case", "for", "while", "do", "break",
        "continue", "return", "throw", "try", "catch", "finally", "yield", "true", "false",
        "null", "undefined",
    ],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
};

static TYPESCRIPT: LanguageConfig = LanguageConfig {
    name: "TypeScript",
    keywords: &[
        "function", "var", "let", "const", "class", "new", "this", "import", "export", "from",
        "async", "await", "if", "else", "for", "while", "return", "throw", "try", "catch",
        "interface", "type", "enum", "implements", "extends", "public", "private", "readonly",
        "string", "number", "boolean", "any", "unknown", "never", "true", "false", "null",
        "undefined",
    ],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
};

static PYTHON: LanguageConfig = LanguageConfig {
    name: "Python",
    keywords: &[
        "def", "class", "import", "from", "as", "global", "nonlocal", "lambda", "with", "assert",
        "del", "in", "is", "not", "and", "or", "if", "elif", "else", "for", "while", "break",
        "continue", "return", "yield", "try", "except", "finally", "raise", "pass", "None",
        "True", "False",
    ],
    line_comment: "#",
    block_comment: None,
};

static RUST: LanguageConfig = LanguageConfig {
    name: "Rust",
    keywords: &[
        "fn", "let", "mut", "const", "static", "use", "mod", "pub", "crate", "self", "super",
        "impl", "trait", "struct", "enum", "type", "where", "as", "in", "ref", "move", "unsafe",
        "async", "await", "dyn", "if", "else", "match", "for", "while", "loop", "break",
        "continue", "return", "true", "false",
    ],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
};

static SHELL: LanguageConfig = LanguageConfig {
    name: "Shell",
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac", "in",
        "function", "return", "export", "local",
    ],
    line_comment: "#",
    block_comment: None,
};

static CSS: LanguageConfig = LanguageConfig {
    name: "CSS",
    keywords: &["important", "media", "import", "from", "to"],
    line_comment: "",
    block_comment: Some(("/*", "*/")),
};

static HTML: LanguageConfig = LanguageConfig {
    name: "HTML",
    keywords: &["html", "head", "body", "div", "span", "script", "style", "link", "meta"],
    line_comment: "",
    block_comment: Some(("<!--", "-->")),
};

static LANGUAGES: phf::Map<&'static str, &'static LanguageConfig> = phf_map! {
    "javascript" => &JAVASCRIPT,
    "js" => &JAVASCRIPT,
    "jsx" => &JAVASCRIPT,
    "typescript" => &TYPESCRIPT,
    "ts" => &TYPESCRIPT,
    "python" => &PYTHON,
    "py" => &PYTHON,
    "rust" => &RUST,
    "rs" => &RUST,
    "bash" => &SHELL,
    "sh" => &SHELL,
    "shell" => &SHELL,
    "css" => &CSS,
    "html" => &HTML,
    "xml" => &HTML,
};

/// 按代码块标记查找语言，标记形如 `javascript` 或 `js title=x`
pub fn language_for(tag: &str) -> Option<&'static LanguageConfig> {
    let name = tag.split_whitespace().next()?.to_ascii_lowercase();
    LANGUAGES.get(name.as_str()).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Normal,
    InBlockComment,
}

/// 把一行切成 (类型, 文本) 片段
fn tokenize_line<'a>(
    config: &LanguageConfig,
    line: &'a str,
    state: LineState,
) -> (Vec<(TokenKind, &'a str)>, LineState) {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let bytes = line.as_bytes();

    if state == LineState::InBlockComment {
        let Some((_, end)) = config.block_comment else {
            return (vec![(TokenKind::Text, line)], LineState::Normal);
        };
        match line.find(end) {
            Some(i) => {
                pos = i + end.len();
                tokens.push((TokenKind::Comment, &line[..pos]));
            }
            None => return (vec![(TokenKind::Comment, line)], LineState::InBlockComment),
        }
    }

    let mut text_start = pos;
    let flush = move |tokens: &mut Vec<(TokenKind, &'a str)>, from: usize, to: usize| {
        if from < to {
            tokens.push((TokenKind::Text, &line[from..to]));
        }
    };

    while pos < bytes.len() {
        let rest = &line[pos..];

        if !config.line_comment.is_empty() && rest.starts_with(config.line_comment) {
            flush(&mut tokens, text_start, pos);
            tokens.push((TokenKind::Comment, rest));
            return (tokens, LineState::Normal);
        }

        if let Some((start, end)) = config.block_comment {
            if rest.starts_with(start) {
                flush(&mut tokens, text_start, pos);
                let after = pos + start.len();
                match line[after..].find(end) {
                    Some(i) => {
                        let close = after + i + end.len();
                        tokens.push((TokenKind::Comment, &line[pos..close]));
                        pos = close;
                        text_start = pos;
                        continue;
                    }
                    None => {
                        tokens.push((TokenKind::Comment, rest));
                        return (tokens, LineState::InBlockComment);
                    }
                }
            }
        }

        let ch = bytes[pos];
        if ch == b'"' || ch == b'\'' || ch == b'`' {
            flush(&mut tokens, text_start, pos);
            let end = scan_string(bytes, pos);
            tokens.push((TokenKind::String, &line[pos..end]));
            pos = end;
            text_start = pos;
            continue;
        }

        let word_start = pos == 0 || !is_word_byte(bytes[pos - 1]);
        if word_start && ch.is_ascii_digit() {
            flush(&mut tokens, text_start, pos);
            let mut end = pos;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'.' || bytes[end] == b'_') {
                end += 1;
            }
            tokens.push((TokenKind::Number, &line[pos..end]));
            pos = end;
            text_start = pos;
            continue;
        }

        if word_start && (ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$') {
            let mut end = pos;
            while end < bytes.len() && is_word_byte(bytes[end]) {
                end += 1;
            }
            let word = &line[pos..end];
            if config.keywords.contains(&word) {
                flush(&mut tokens, text_start, pos);
                tokens.push((TokenKind::Keyword, word));
                text_start = end;
            }
            pos = end;
            continue;
        }

        pos += line[pos..].chars().next().map_or(1, char::len_utf8);
    }

    flush(&mut tokens, text_start, pos);
    (tokens, LineState::Normal)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// 返回字符串结束位置（含右引号），未闭合时到行尾
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// 对整个代码块分词
pub fn tokenize<'a>(config: &LanguageConfig, code: &'a str) -> Vec<Vec<(TokenKind, &'a str)>> {
    let mut state = LineState::Normal;
    code.lines()
        .map(|line| {
            let (tokens, next) = tokenize_line(config, line, state);
            state = next;
            tokens
        })
        .collect()
}

/// 给代码块着色，每行加两格缩进
pub fn highlight(code: &str, tag: Option<&str>, palette: &Palette) -> String {
    let mut out = String::new();
    let Some(config) = tag.and_then(language_for) else {
        for line in code.lines() {
            out.push_str("  ");
            out.push_str(&paint(palette.code, line));
            out.push('\n');
        }
        return out;
    };

    for line in tokenize(config, code) {
        out.push_str("  ");
        for (kind, text) in line {
            let color = match kind {
                TokenKind::Keyword => palette.keyword,
                TokenKind::String => palette.string,
                TokenKind::Comment => palette.comment,
                TokenKind::Number => palette.number,
                TokenKind::Text => palette.code,
            };
            out.push_str(&paint(color, text));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use crate::render::palette::strip_ansi;

    fn kinds(line: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        line.iter().map(|(k, t)| (*k, t.to_string())).collect()
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(language_for("js").map(|c| c.name), Some("JavaScript"));
        assert_eq!(language_for("JavaScript").map(|c| c.name), Some("JavaScript"));
        assert_eq!(language_for("py extra").map(|c| c.name), Some("Python"));
        assert!(language_for("cobol").is_none());
    }

    #[test]
    fn javascript_tokens() {
        let lines = tokenize(&JAVASCRIPT, "const n = 42; // answer");
        assert_eq!(
            kinds(&lines[0]),
            vec![
                (TokenKind::Keyword, "const".into()),
                (TokenKind::Text, " n = ".into()),
                (TokenKind::Number, "42".into()),
                (TokenKind::Text, "; ".into()),
                (TokenKind::Comment, "// answer".into()),
            ]
        );
    }

    #[test]
    fn keywords_inside_identifiers_are_text() {
        let lines = tokenize(&JAVASCRIPT, "constant");
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Text, "constant".into())]);
    }

    #[test]
    fn strings_keep_escaped_quotes() {
        let lines = tokenize(&PYTHON, r#"print("a \" b")"#);
        assert!(lines[0].contains(&(TokenKind::String, r#""a \" b""#)));
    }

    #[test]
    fn block_comment_spans_lines() {
        let lines = tokenize(&JAVASCRIPT, "/* start\nmiddle\nend */ let x");
        assert_eq!(kinds(&lines[1]), vec![(TokenKind::Comment, "middle".into())]);
        assert_eq!(lines[2][0], (TokenKind::Comment, "end */"));
        assert!(lines[2].contains(&(TokenKind::Keyword, "let")));
    }

    #[test]
    fn highlight_preserves_text() {
        let palette = Palette::for_theme(ThemeMode::Light);
        let code = "function add(a, b) {\n  return a + b;\n}";
        let plain = strip_ansi(&highlight(code, Some("javascript"), &palette));
        assert_eq!(plain, "  function add(a, b) {\n    return a + b;\n  }\n");

        let unknown = strip_ansi(&highlight("x := 1", Some("go"), &palette));
        assert_eq!(unknown, "  x := 1\n");
    }
}
