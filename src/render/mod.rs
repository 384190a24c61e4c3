//! 渲染层
//!
//! 把可见题目、书签和主题状态投影成终端文本：列表、详情和统计面板

pub mod detail_view;
pub mod highlight;
pub mod list_view;
pub mod markdown;
pub mod palette;
pub mod stats_panel;

pub use detail_view::DetailView;
pub use list_view::{Card, ListView};
pub use markdown::render_markdown;
pub use palette::Palette;
pub use stats_panel::StatsPanel;
