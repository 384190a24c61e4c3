//! Markdown 转终端文本
//!
//! 用 pulldown-cmark 解析，输出带 ANSI 样式的文本；围栏代码块交给
//! [`highlight`](crate::render::highlight) 按语言着色。原始 HTML 只当作普通文本显示。

use crate::render::highlight::highlight;
use crate::render::palette::{Palette, BOLD, ITALIC, RESET, UNDERLINE};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// 渲染 Markdown
pub fn render_markdown(source: &str, palette: &Palette) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = TerminalWriter::new(palette);
    for event in Parser::new_ext(source, options) {
        writer.handle(event);
    }
    writer.finish()
}

struct CodeBlock {
    tag: Option<String>,
    text: String,
}

struct TerminalWriter<'p> {
    palette: &'p Palette,
    out: String,
    styles: Vec<&'static str>,
    /// 每层列表的下一个序号，无序列表为 None
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    code: Option<CodeBlock>,
    link_target: Vec<String>,
    at_line_start: bool,
}

impl<'p> TerminalWriter<'p> {
    fn new(palette: &'p Palette) -> Self {
        Self {
            palette,
            out: String::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
            link_target: Vec::new(),
            at_line_start: true,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        if let Some(code) = self.code.as_mut() {
            match event {
                Event::Text(text) => code.text.push_str(&text),
                Event::End(TagEnd::CodeBlock) => self.end_code_block(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.write(&text),
            Event::Code(code) => {
                let styled = format!("{}`{}`{}", self.palette.code, code, RESET);
                self.write(&styled);
                self.reapply_styles();
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let styled = format!("{}{}{}", self.palette.muted, html.trim_end(), RESET);
                self.write(&styled);
                self.reapply_styles();
            }
            Event::SoftBreak => self.write(" "),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_gap();
                let rule = format!("{}{}{}", self.palette.muted, "─".repeat(40), RESET);
                self.write(&rule);
                self.newline();
            }
            Event::TaskListMarker(done) => self.write(if done { "[x] " } else { "[ ] " }),
            Event::FootnoteReference(name) => self.write(&format!("[^{name}]")),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.block_gap();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_gap();
                let marks = "#".repeat(heading_depth(level));
                self.push_style(BOLD);
                self.push_style(self.palette.heading);
                self.write(&format!("{marks} "));
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.block_gap();
                let tag = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => Some(info.to_string()),
                    _ => None,
                };
                self.code = Some(CodeBlock {
                    tag,
                    text: String::new(),
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else if !self.at_line_start {
                    self.newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                if !self.at_line_start {
                    self.newline();
                }
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.write(&format!("{indent}{marker}"));
            }
            Tag::Emphasis => self.push_style(ITALIC),
            Tag::Strong => self.push_style(BOLD),
            Tag::Strikethrough => self.push_style("\x1b[9m"),
            Tag::Link { dest_url, .. } => {
                self.push_style(UNDERLINE);
                self.push_style(self.palette.accent);
                self.link_target.push(dest_url.to_string());
            }
            Tag::Image { dest_url, .. } => {
                self.write("[图片: ");
                self.link_target.push(dest_url.to_string());
            }
            Tag::Table(_) => self.block_gap(),
            Tag::TableCell => self.write("│ "),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.newline();
                }
            }
            TagEnd::Heading(_) => {
                self.pop_style();
                self.pop_style();
                self.newline();
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() && !self.at_line_start {
                    self.newline();
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                self.pop_style();
                if let Some(url) = self.link_target.pop() {
                    let target = format!(" {}({url}){}", self.palette.muted, RESET);
                    self.write(&target);
                    self.reapply_styles();
                }
            }
            TagEnd::Image => {
                if let Some(url) = self.link_target.pop() {
                    self.write(&format!(" {url}]"));
                }
            }
            TagEnd::TableCell => self.write(" "),
            TagEnd::TableHead | TagEnd::TableRow => {
                self.write("│");
                self.newline();
            }
            _ => {}
        }
    }

    fn end_code_block(&mut self) {
        if let Some(code) = self.code.take() {
            let highlighted = highlight(&code.text, code.tag.as_deref(), self.palette);
            for line in highlighted.lines() {
                self.write(line);
                self.newline();
            }
        }
    }

    fn push_style(&mut self, style: &'static str) {
        self.styles.push(style);
        self.out.push_str(style);
    }

    fn pop_style(&mut self) {
        self.styles.pop();
        self.out.push_str(RESET);
        self.reapply_styles();
    }

    fn reapply_styles(&mut self) {
        for style in &self.styles {
            self.out.push_str(style);
        }
    }

    fn line_prefix(&mut self) {
        if self.at_line_start {
            if self.quote_depth > 0 {
                let bar = format!("{}{}{}", self.palette.muted, "│ ".repeat(self.quote_depth), RESET);
                self.out.push_str(&bar);
                self.reapply_styles();
            }
            self.at_line_start = false;
        }
    }

    fn write(&mut self, text: &str) {
        self.line_prefix();
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// 块级元素之间空一行
    fn block_gap(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.newline();
        }
    }

    fn finish(mut self) -> String {
        if !self.styles.is_empty() {
            self.styles.clear();
            self.out.push_str(RESET);
        }
        let trimmed = self.out.trim_end_matches('\n').len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.out
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
