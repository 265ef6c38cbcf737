use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tokio::task;
use tracing::info;

use reelbase_report::{aggregate, render_table};
use reelbase_store::{Movie, MovieDuration, MovieStore, RatedMovie};

use crate::error::ApiError;

/// How many movies the longest-duration listing returns.
const LONGEST_MOVIES_LIMIT: usize = 10;
/// Minimum average rating for the top-rated listing.
const TOP_RATED_MIN_RATING: f64 = 6.0;

/// Shared request state: the store handle is cloned into each request
/// scope, so concurrent requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
}

pub async fn longest_duration_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieDuration>>, ApiError> {
    let store = state.store.clone();
    let movies =
        task::spawn_blocking(move || store.longest_duration_movies(LONGEST_MOVIES_LIMIT)).await??;
    Ok(Json(movies))
}

pub async fn new_movie(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> Result<&'static str, ApiError> {
    let store = state.store.clone();
    let tconst = movie.tconst.clone();
    task::spawn_blocking(move || store.insert_movie(&movie)).await??;
    info!("inserted movie {}", tconst);
    Ok("success")
}

pub async fn top_rated_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<RatedMovie>>, ApiError> {
    let store = state.store.clone();
    let movies =
        task::spawn_blocking(move || store.top_rated_movies(TOP_RATED_MIN_RATING)).await??;
    Ok(Json(movies))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub format: ReportFormat,
}

/// The genre subtotal report: one store query, one aggregation pass, then
/// either the JSON row array or the rendered table depending on `?format=`.
pub async fn genre_movies_with_subtotals(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Response, ApiError> {
    let store = state.store.clone();
    let rows = task::spawn_blocking(move || store.genre_vote_rows()).await??;
    let report = aggregate(rows);
    info!("genre subtotal report with {} rows", report.len());

    let response = match params.format {
        ReportFormat::Json => Json(report).into_response(),
        ReportFormat::Table => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            render_table(&report),
        )
            .into_response(),
    };
    Ok(response)
}

pub async fn update_runtime_minutes(
    State(state): State<AppState>,
) -> Result<&'static str, ApiError> {
    let store = state.store.clone();
    let updated = task::spawn_blocking(move || store.extend_runtimes()).await??;
    info!("extended runtimeMinutes for {} movies", updated);
    Ok("Successfully updated runtimeMinutes for all movies")
}

pub async fn healthz() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelbase_store::TitleRating;

    fn movie(tconst: &str, title: &str, runtime: i64, genres: &str) -> Movie {
        Movie {
            tconst: tconst.to_string(),
            title_type: "movie".to_string(),
            primary_title: title.to_string(),
            runtime_minutes: runtime,
            genres: genres.to_string(),
        }
    }

    fn seeded_state() -> AppState {
        let store = MovieStore::open_in_memory().unwrap();

        store.insert_movie(&movie("tt0001", "Long Doc", 200, "Documentary")).unwrap();
        store.insert_movie(&movie("tt0002", "Mid Drama", 120, "Drama")).unwrap();
        store.insert_movie(&movie("tt0003", "Other Drama", 150, "Drama")).unwrap();

        for rating in [
            TitleRating {
                tconst: "tt0001".to_string(),
                average_rating: 7.5,
                num_votes: 500,
            },
            TitleRating {
                tconst: "tt0002".to_string(),
                average_rating: 8.1,
                num_votes: 300,
            },
            TitleRating {
                tconst: "tt0003".to_string(),
                average_rating: 5.2,
                num_votes: 700,
            },
        ] {
            store.insert_rating(&rating).unwrap();
        }

        AppState { store }
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_longest_duration_movies_handler() {
        let Json(movies) = longest_duration_movies(State(seeded_state())).await.unwrap();

        let tconsts: Vec<&str> = movies.iter().map(|m| m.tconst.as_str()).collect();
        assert_eq!(tconsts, vec!["tt0001", "tt0003", "tt0002"]);
    }

    #[tokio::test]
    async fn test_new_movie_handler_inserts() {
        let state = seeded_state();

        let message = new_movie(
            State(state.clone()),
            Json(movie("tt0009", "Fresh", 240, "Drama")),
        )
        .await
        .unwrap();
        assert_eq!(message, "success");

        let Json(movies) = longest_duration_movies(State(state)).await.unwrap();
        assert_eq!(movies[0].tconst, "tt0009");
    }

    #[tokio::test]
    async fn test_new_movie_handler_duplicate_is_error() {
        let state = seeded_state();

        let result = new_movie(
            State(state),
            Json(movie("tt0001", "Clone", 90, "Drama")),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_top_rated_movies_handler_filters() {
        let Json(movies) = top_rated_movies(State(seeded_state())).await.unwrap();

        let tconsts: Vec<&str> = movies.iter().map(|m| m.tconst.as_str()).collect();
        assert_eq!(tconsts, vec!["tt0002", "tt0001"]);
    }

    #[tokio::test]
    async fn test_report_handler_renders_table_by_default() {
        let response = genre_movies_with_subtotals(
            State(seeded_state()),
            Query(ReportParams::default()),
        )
        .await
        .unwrap();

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response
                .headers()
                .get(header::X_CONTENT_TYPE_OPTIONS)
                .unwrap(),
            "nosniff"
        );

        let body = body_string(response).await;
        assert!(body.contains("| Genre    | Primary Title          | NumVotes |"));
        assert!(body.contains("TOTAL"));
        // Two genre groups seeded, so two subtotals.
        assert_eq!(body.matches("TOTAL").count(), 2);
    }

    #[tokio::test]
    async fn test_report_handler_json_format() {
        let response = genre_movies_with_subtotals(
            State(seeded_state()),
            Query(ReportParams {
                format: ReportFormat::Json,
            }),
        )
        .await
        .unwrap();

        let body = body_string(response).await;
        let rows: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(
            rows,
            serde_json::json!([
                { "genre": "Documentary", "title": "Long Doc", "numVotes": 500 },
                { "genre": "", "title": "TOTAL", "numVotes": 500 },
                { "genre": "Drama", "title": "Other Drama", "numVotes": 700 },
                { "genre": "", "title": "Mid Drama", "numVotes": 300 },
                { "genre": "", "title": "TOTAL", "numVotes": 1000 },
            ])
        );
    }

    #[tokio::test]
    async fn test_update_runtime_minutes_handler() {
        let state = seeded_state();

        let message = update_runtime_minutes(State(state.clone())).await.unwrap();
        assert_eq!(message, "Successfully updated runtimeMinutes for all movies");

        let Json(movies) = longest_duration_movies(State(state)).await.unwrap();
        let doc = movies.iter().find(|m| m.tconst == "tt0001").unwrap();
        assert_eq!(doc.runtime_minutes, 215);
    }

    #[tokio::test]
    async fn test_healthz() {
        assert_eq!(healthz().await, StatusCode::NO_CONTENT);
    }
}
