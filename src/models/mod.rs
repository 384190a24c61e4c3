pub mod filter;
pub mod question;
pub mod state;
pub mod theme;

pub use filter::CategoryFilter;
pub use question::{QuestionRecord, CODE_FENCE_MARKER, DEFAULT_CATEGORY};
pub use state::UiState;
pub use theme::ThemeMode;
