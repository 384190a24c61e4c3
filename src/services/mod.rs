pub mod bookmark_store;
pub mod data_loader;
pub mod question_filter;
pub mod statistics;
pub mod theme_service;

pub use bookmark_store::{BookmarkStore, BOOKMARKS_KEY};
pub use data_loader::{DataLoader, DataTier, LoadOutcome, Notice};
pub use question_filter::visible_questions;
pub use statistics::QuestionStats;
pub use theme_service::{ThemeService, THEME_KEY};
