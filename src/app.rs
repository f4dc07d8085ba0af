use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/life", post(handlers::life_statistics))
        .route("/api/grid", get(handlers::grid))
        .route("/api/notes", get(handlers::list_notes))
        .route(
            "/api/notes/:week",
            get(handlers::get_note).put(handlers::save_note),
        )
        .route("/api/preferences", get(handlers::get_preferences))
        .route("/api/preferences/dark-mode", post(handlers::toggle_dark_mode))
        .route(
            "/api/key",
            put(handlers::save_api_key).delete(handlers::delete_api_key),
        )
        .route("/api/chat", post(handlers::chat))
        .route("/api/events", post(handlers::major_events))
        .with_state(state)
}
