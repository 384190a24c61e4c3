//! 统计面板
//!
//! 四个数字加一张按分类划分的比例图。每次更新都销毁旧图重新生成，
//! 图表容器只在第一次有数据时创建，之后复用。

use crate::render::palette::{paint, Palette, BOLD, RESET};
use crate::services::statistics::{percentage, QuestionStats};
use tracing::debug;

const BAR_WIDTH: usize = 40;

/// 图表容器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartContainer {
    pub width: usize,
}

/// 图表中的一段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub label: String,
    pub value: usize,
    pub percent: u32,
}

impl Segment {
    /// 形如 `theory: 4 (67%)`
    pub fn caption(&self) -> String {
        format!("{}: {} ({}%)", self.label, self.value, self.percent)
    }
}

/// 比例图实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionChart {
    pub segments: Vec<Segment>,
    pub total: usize,
}

impl ProportionChart {
    pub fn new(labels: &[String], values: &[usize]) -> Self {
        let total = values.iter().sum();
        let segments = labels
            .iter()
            .zip(values)
            .map(|(label, &value)| Segment {
                label: label.clone(),
                value,
                percent: percentage(value, total),
            })
            .collect();
        Self { segments, total }
    }

    /// 每段在条形图中占的格数，最后一段补齐舍入误差
    fn widths(&self, width: usize) -> Vec<usize> {
        if self.total == 0 {
            return vec![0; self.segments.len()];
        }
        let mut used = 0;
        let last = self.segments.len().saturating_sub(1);
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let w = if i == last {
                    width - used
                } else {
                    (s.value * width + self.total / 2) / self.total
                };
                let w = w.min(width - used);
                used += w;
                w
            })
            .collect()
    }

    fn render(&self, container: &ChartContainer, palette: &Palette) -> String {
        let mut bar = String::new();
        for (i, w) in self.widths(container.width).into_iter().enumerate() {
            bar.push_str(&paint(palette.segment(i), &"█".repeat(w)));
        }

        let mut out = format!("  {bar}\n");
        for (i, segment) in self.segments.iter().enumerate() {
            out.push_str(&format!("  {} {}\n", paint(palette.segment(i), "●"), segment.caption()));
        }
        out
    }
}

/// 统计面板
#[derive(Debug, Default)]
pub struct StatsPanel {
    stats: QuestionStats,
    container: Option<ChartContainer>,
    chart: Option<ProportionChart>,
    containers_created: usize,
    charts_built: usize,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新数字并重建图表
    pub fn update(&mut self, stats: QuestionStats) {
        if let Some(old) = self.chart.take() {
            debug!("销毁旧图表 ({} 段)", old.segments.len());
        }

        if stats.total > 0 {
            if self.container.is_none() {
                self.container = Some(ChartContainer { width: BAR_WIDTH });
                self.containers_created += 1;
            }
            let (labels, values) = stats.chart_series();
            self.chart = Some(ProportionChart::new(&labels, &values));
            self.charts_built += 1;
        }

        self.stats = stats;
    }

    pub fn stats(&self) -> &QuestionStats {
        &self.stats
    }

    pub fn chart(&self) -> Option<&ProportionChart> {
        self.chart.as_ref()
    }

    pub fn containers_created(&self) -> usize {
        self.containers_created
    }

    pub fn charts_built(&self) -> usize {
        self.charts_built
    }

    pub fn render(&self, palette: &Palette) -> String {
        let s = &self.stats;
        let mut out = format!(
            "{BOLD}{}📊 统计{RESET}\n  题目总数: {}  分类: {}  代码示例: {}  已收藏: {}\n",
            palette.heading, s.total, s.categories, s.code_examples, s.bookmarked
        );
        if let (Some(container), Some(chart)) = (&self.container, &self.chart) {
            out.push_str(&chart.render(container, palette));
        }
        out
    }
}
