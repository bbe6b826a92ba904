use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/moods", get(handlers::list_moods).post(handlers::create_mood))
        .route("/api/moods/:id", delete(handlers::delete_mood))
        .route("/api/history", get(handlers::get_history))
        .route("/api/journal", get(handlers::list_journal).post(handlers::create_journal))
        .route("/api/journal/months", get(handlers::journal_months))
        .route("/api/journal/:id", delete(handlers::delete_journal))
        .route("/api/journal/:id/pin", post(handlers::pin_journal))
        .route("/api/export", get(handlers::export))
        .route("/api/profile", get(handlers::get_profile).put(handlers::update_profile))
        .route("/api/quote", get(handlers::get_quote))
        .with_state(state)
}
