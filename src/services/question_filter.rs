//! 过滤与搜索 - 业务能力层
//!
//! 纯函数：同样的输入永远得到同样的输出

use crate::models::{CategoryFilter, QuestionRecord, DEFAULT_CATEGORY};

/// 计算当前可见的题目
///
/// 先按分类过滤，再按搜索词（去空白后不区分大小写的子串）过滤。
/// 结果为空是正常状态，不是错误。
pub fn visible_questions<'a>(
    all: &'a [QuestionRecord],
    filter: &CategoryFilter,
    bookmarks: &[i64],
    query: &str,
) -> Vec<&'a QuestionRecord> {
    let needle = query.trim().to_lowercase();

    all.iter()
        .filter(|q| matches_filter(q, filter, bookmarks))
        .filter(|q| needle.is_empty() || matches_query(q, &needle))
        .collect()
}

/// 单条记录是否通过分类过滤
pub fn matches_filter(question: &QuestionRecord, filter: &CategoryFilter, bookmarks: &[i64]) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Bookmarked => bookmarks.contains(&question.id),
        CategoryFilter::Code => question.has_code_example(),
        // 缺少 type 的记录按默认分类参与筛选，和卡片标签、统计口径保持一致，
        // 不要求原始 type 字段严格相等
        CategoryFilter::Category(name) => match question.kind.as_deref() {
            Some(kind) => kind == name,
            None => name == DEFAULT_CATEGORY,
        },
    }
}

/// `needle` 需已转为小写
fn matches_query(question: &QuestionRecord, needle: &str) -> bool {
    question.question.to_lowercase().contains(needle) || question.answer.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new(1, "What is JSON?", "A data format.").with_kind("theory"),
            QuestionRecord::new(2, "Parse a string", "Use ```javascript\nJSON.parse(s)\n```").with_kind("coding"),
            QuestionRecord::new(3, "Event loop", "Runs tasks from the queue."),
            QuestionRecord::new(4, "List comprehension", "```python\n[x for x in y]\n```").with_kind("coding"),
        ]
    }

    fn ids(records: &[&QuestionRecord]) -> Vec<i64> {
        records.iter().map(|q| q.id).collect()
    }

    #[test]
    fn all_with_empty_query_returns_everything() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::All, &[], "");
        assert_eq!(ids(&visible), vec![1, 2, 3, 4]);
    }

    #[test]
    fn same_inputs_same_output() {
        let all = sample();
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Bookmarked,
            CategoryFilter::Code,
            CategoryFilter::Category("coding".into()),
        ];
        for filter in &filters {
            for query in ["", "json", "  QUEUE ", "nothing"] {
                let first = visible_questions(&all, filter, &[2, 3], query);
                let second = visible_questions(&all, filter, &[2, 3], query);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn bookmarked_filter_uses_bookmark_set() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::Bookmarked, &[3, 1], "");
        assert_eq!(ids(&visible), vec![1, 3]);
    }

    #[test]
    fn code_filter_only_accepts_javascript_fence() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::Code, &[], "");
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn category_filter_is_exact() {
        let all = sample();
        let coding = visible_questions(&all, &CategoryFilter::Category("coding".into()), &[], "");
        assert_eq!(ids(&coding), vec![2, 4]);

        let upper = visible_questions(&all, &CategoryFilter::Category("Coding".into()), &[], "");
        assert!(upper.is_empty());
    }

    #[test]
    fn untyped_record_matches_only_default_category() {
        let all = sample();
        let theory = visible_questions(&all, &CategoryFilter::Category("theory".into()), &[], "");
        assert_eq!(ids(&theory), vec![1, 3]);

        let other = visible_questions(&all, &CategoryFilter::Category("behavioral".into()), &[], "");
        assert!(other.is_empty());
    }

    #[test]
    fn search_hits_answer_only_text() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::All, &[], "queue");
        assert_eq!(ids(&visible), vec![3]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::All, &[], "json");
        assert_eq!(ids(&visible), vec![1, 2]);
        let upper = visible_questions(&all, &CategoryFilter::All, &[], "JSON");
        assert_eq!(ids(&upper), vec![1, 2]);
    }

    #[test]
    fn search_applies_after_category() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::Category("coding".into()), &[], "json");
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn whitespace_query_is_ignored() {
        let all = sample();
        let visible = visible_questions(&all, &CategoryFilter::All, &[], "   ");
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let all = sample();
        assert!(visible_questions(&all, &CategoryFilter::All, &[], "zzz").is_empty());
    }
}
