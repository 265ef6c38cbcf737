use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/longest-duration-movies",
            get(handlers::longest_duration_movies),
        )
        .route("/api/v1/new-movie", post(handlers::new_movie))
        .route("/api/v1/top-rated-movies", get(handlers::top_rated_movies))
        .route(
            "/api/v1/genre-movies-with-subtotals",
            get(handlers::genre_movies_with_subtotals),
        )
        .route(
            "/api/v1/update-runtime-minutes",
            post(handlers::update_runtime_minutes),
        )
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
