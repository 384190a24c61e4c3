//! 界面状态
//!
//! 除主题外都不持久化，所有修改都走显式的 setter

use crate::models::filter::CategoryFilter;
use crate::models::theme::ThemeMode;

/// 当前浏览状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    current_filter: CategoryFilter,
    search_query: String,
    selected_question_id: Option<i64>,
    theme: ThemeMode,
}

impl UiState {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn current_filter(&self) -> &CategoryFilter {
        &self.current_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_question_id(&self) -> Option<i64> {
        self.selected_question_id
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.current_filter = filter;
    }

    /// 保存去掉首尾空白后的查询
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    pub fn select(&mut self, id: i64) {
        self.selected_question_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_question_id = None;
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_is_trimmed() {
        let mut state = UiState::default();
        state.set_search_query("  closure \n");
        assert_eq!(state.search_query(), "closure");
    }

    #[test]
    fn clearing_selection_keeps_filter_and_query() {
        let mut state = UiState::new(ThemeMode::Dark);
        state.set_filter(CategoryFilter::Code);
        state.set_search_query("json");
        state.select(3);
        state.clear_selection();

        assert_eq!(state.selected_question_id(), None);
        assert_eq!(state.current_filter(), &CategoryFilter::Code);
        assert_eq!(state.search_query(), "json");
        assert_eq!(state.theme(), ThemeMode::Dark);
    }
}
