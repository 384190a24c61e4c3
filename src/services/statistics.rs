//! 统计服务 - 业务能力层
//!
//! 从题目集合和书签数量推导出面板上的数字

use crate::models::QuestionRecord;

/// 面板上的四个数字加分类分布
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionStats {
    pub total: usize,
    pub categories: usize,
    pub code_examples: usize,
    pub bookmarked: usize,
    /// 按首次出现顺序排列的 (分类, 数量)
    pub category_counts: Vec<(String, usize)>,
}

impl QuestionStats {
    /// 计算统计数据，缺少 type 的记录算作默认分类
    pub fn compute(questions: &[QuestionRecord], bookmarked: usize) -> Self {
        let mut category_counts: Vec<(String, usize)> = Vec::new();
        for question in questions {
            let category = question.category();
            match category_counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => category_counts.push((category.to_string(), 1)),
            }
        }

        Self {
            total: questions.len(),
            categories: category_counts.len(),
            code_examples: questions.iter().filter(|q| q.has_code_example()).count(),
            bookmarked,
            category_counts,
        }
    }

    pub fn count_for(&self, category: &str) -> usize {
        self.category_counts
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count)
    }

    /// 图表输入：(标签, 数值)
    pub fn chart_series(&self) -> (Vec<String>, Vec<usize>) {
        self.category_counts.iter().cloned().unzip()
    }
}

/// 占比的四舍五入百分数，总数为 0 时为 0
pub fn percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new(1, "a", "x").with_kind("theory"),
            QuestionRecord::new(2, "b", "```javascript\n1\n```").with_kind("coding"),
            QuestionRecord::new(3, "c", "x").with_kind("theory"),
            QuestionRecord::new(4, "d", "```python\n1\n```").with_kind("coding"),
            QuestionRecord::new(5, "e", "x").with_kind("theory"),
            QuestionRecord::new(6, "f", "x"),
        ]
    }

    #[test]
    fn untyped_records_count_as_theory() {
        let stats = QuestionStats::compute(&collection(), 2);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.count_for("theory"), 4);
        assert_eq!(stats.count_for("coding"), 2);
        assert_eq!(stats.code_examples, 1);
        assert_eq!(stats.bookmarked, 2);
    }

    #[test]
    fn chart_series_follow_first_appearance() {
        let stats = QuestionStats::compute(&collection(), 0);
        let (labels, values) = stats.chart_series();
        assert_eq!(labels, vec!["theory".to_string(), "coding".to_string()]);
        assert_eq!(values, vec![4, 2]);
    }

    #[test]
    fn empty_collection() {
        let stats = QuestionStats::compute(&[], 0);
        assert_eq!(stats, QuestionStats::default());
    }

    #[test]
    fn percentages_round() {
        assert_eq!(percentage(4, 6), 67);
        assert_eq!(percentage(2, 6), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 0), 0);
    }
}
