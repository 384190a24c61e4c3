//! 题目列表视图
//!
//! `rebuild` 整体替换卡片；只改变书签图标时用 `patch_bookmark` 就地更新

use crate::models::QuestionRecord;
use crate::render::palette::{paint, Palette, BOLD, RESET};
use regex::RegexBuilder;

pub const BOOKMARKED_ICON: &str = "★";
pub const UNBOOKMARKED_ICON: &str = "☆";
pub const NO_RESULTS: &str = "没有符合条件的题目，试试更换筛选条件或搜索词。";

/// 单张题目卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub question: String,
    pub category: String,
    pub bookmarked: bool,
}

impl Card {
    pub fn icon(&self) -> &'static str {
        if self.bookmarked {
            BOOKMARKED_ICON
        } else {
            UNBOOKMARKED_ICON
        }
    }
}

/// 列表视图
#[derive(Debug, Default)]
pub struct ListView {
    cards: Vec<Card>,
    highlight_query: String,
    generation: u64,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按可见题目整体重建卡片
    pub fn rebuild(&mut self, visible: &[&QuestionRecord], bookmarks: &[i64], query: &str) {
        self.cards = visible
            .iter()
            .map(|q| Card {
                id: q.id,
                question: q.question.clone(),
                category: q.category().to_string(),
                bookmarked: bookmarks.contains(&q.id),
            })
            .collect();
        self.highlight_query = query.trim().to_string();
        self.generation += 1;
    }

    /// 只更新一张卡片的书签图标，卡片不在列表中时返回 false
    pub fn patch_bookmark(&mut self, id: i64, bookmarked: bool) -> bool {
        match self.cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.bookmarked = bookmarked;
                true
            }
            None => false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: i64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// 整体重建的次数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn render(&self, palette: &Palette) -> String {
        if self.cards.is_empty() {
            return format!("{}\n", paint(palette.muted, NO_RESULTS));
        }

        let mut out = String::new();
        for card in &self.cards {
            let icon_color = if card.bookmarked { palette.warning } else { palette.muted };
            out.push_str(&format!(
                "{} {} {}\n",
                paint(palette.accent, &format!("#{}", card.id)),
                emphasize(&card.question, &self.highlight_query),
                paint(icon_color, card.icon()),
            ));
            out.push_str(&format!("   {}\n", paint(palette.tag, &format!("[{}]", card.category))));
        }
        out
    }
}

/// 不区分大小写地加粗文本中的搜索词
fn emphasize(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures<'_>| format!("{BOLD}{}{RESET}", &caps[0]))
            .into_owned(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use crate::render::palette::strip_ansi;

    fn records() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new(1, "What is JSON?", "a").with_kind("theory"),
            QuestionRecord::new(2, "Write a debounce", "b").with_kind("coding"),
            QuestionRecord::new(3, "Event loop", "c"),
        ]
    }

    #[test]
    fn rebuild_creates_cards_with_default_category() {
        let all = records();
        let visible: Vec<&QuestionRecord> = all.iter().collect();
        let mut view = ListView::new();
        view.rebuild(&visible, &[2], "");

        assert_eq!(view.generation(), 1);
        assert_eq!(view.cards().len(), 3);
        assert_eq!(view.card(3).unwrap().category, "theory");
        assert!(view.card(2).unwrap().bookmarked);
        assert!(!view.card(1).unwrap().bookmarked);
    }

    #[test]
    fn patch_updates_icon_without_rebuild() {
        let all = records();
        let visible: Vec<&QuestionRecord> = all.iter().collect();
        let mut view = ListView::new();
        view.rebuild(&visible, &[], "");

        assert!(view.patch_bookmark(1, true));
        assert_eq!(view.card(1).unwrap().icon(), BOOKMARKED_ICON);
        assert_eq!(view.generation(), 1);
        assert!(!view.patch_bookmark(42, true));
    }

    #[test]
    fn render_lists_cards() {
        let all = records();
        let visible: Vec<&QuestionRecord> = all.iter().take(1).collect();
        let mut view = ListView::new();
        view.rebuild(&visible, &[1], "");

        let text = strip_ansi(&view.render(&Palette::for_theme(ThemeMode::Light)));
        assert_eq!(text, "#1 What is JSON? ★\n   [theory]\n");
    }

    #[test]
    fn empty_list_renders_no_results() {
        let mut view = ListView::new();
        view.rebuild(&[], &[], "zzz");
        let text = strip_ansi(&view.render(&Palette::for_theme(ThemeMode::Dark)));
        assert_eq!(text, format!("{NO_RESULTS}\n"));
    }

    #[test]
    fn search_term_is_emphasized_case_insensitively() {
        let out = emphasize("What is JSON?", "json");
        assert_eq!(out, format!("What is {BOLD}JSON{RESET}?"));
        assert_eq!(emphasize("a+b", "+"), format!("a{BOLD}+{RESET}b"));
    }
}
