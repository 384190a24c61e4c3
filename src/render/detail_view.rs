//! 题目详情视图

use crate::models::QuestionRecord;
use crate::render::list_view::{BOOKMARKED_ICON, UNBOOKMARKED_ICON};
use crate::render::markdown::render_markdown;
use crate::render::palette::{paint, Palette, BOLD, RESET};

/// 当前打开的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub bookmarked: bool,
}

impl DetailView {
    pub fn open(record: &QuestionRecord, bookmarked: bool) -> Self {
        Self {
            id: record.id,
            question: record.question.clone(),
            answer: record.answer.clone(),
            bookmarked,
        }
    }

    /// 书签按钮文本
    pub fn bookmark_control(&self) -> String {
        if self.bookmarked {
            format!("[{BOOKMARKED_ICON} 已收藏]")
        } else {
            format!("[{UNBOOKMARKED_ICON} 收藏]")
        }
    }

    pub fn render(&self, palette: &Palette) -> String {
        let control_color = if self.bookmarked { palette.warning } else { palette.muted };
        let mut out = format!(
            "{BOLD}{}{}{RESET}  {}\n{}\n\n",
            palette.heading,
            self.question,
            paint(control_color, &self.bookmark_control()),
            paint(palette.muted, &"═".repeat(40)),
        );
        out.push_str(&render_markdown(&self.answer, palette));
        out.push_str(&format!(
            "\n{}\n",
            paint(palette.muted, &format!("#{} · 输入 close 返回列表，bookmark 切换收藏", self.id))
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use crate::render::palette::strip_ansi;

    #[test]
    fn renders_heading_control_and_answer() {
        let record = QuestionRecord::new(9, "What is a Promise?", "An **object** for async results.");
        let view = DetailView::open(&record, false);
        let text = strip_ansi(&view.render(&Palette::for_theme(ThemeMode::Light)));

        assert!(text.starts_with("What is a Promise?  [☆ 收藏]\n"));
        assert!(text.contains("An object for async results.\n"));
        assert!(text.contains("#9"));
    }

    #[test]
    fn control_reflects_bookmark_state() {
        let record = QuestionRecord::new(1, "q", "a");
        let mut view = DetailView::open(&record, true);
        assert_eq!(view.bookmark_control(), "[★ 已收藏]");
        view.bookmarked = false;
        assert_eq!(view.bookmark_control(), "[☆ 收藏]");
    }
}
