pub mod app;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod mood;
pub mod quotes;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use mood::{normalize_mood, MoodCategory, ResolvedEntry};
pub use state::AppState;
pub use stats::{
    build_activity_stats, build_distribution, build_time_series, group_by_calendar_date,
    group_by_month,
};
pub use storage::{resolve_data_path, JsonStore};
