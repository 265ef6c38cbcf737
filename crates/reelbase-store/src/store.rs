use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{params, Connection};
use thiserror::Error;

use reelbase_report::VoteRow;

use crate::models::{Movie, MovieDuration, RatedMovie, TitleRating};
use crate::schema;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Shared handle on the movies/ratings database.
///
/// Clones share one connection behind a mutex; each request scope takes the
/// lock only for the duration of its own statement.
#[derive(Debug, Clone)]
pub struct MovieStore {
    conn: Arc<Mutex<Connection>>,
}

impl MovieStore {
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// The `limit` movies with the longest runtime, longest first.
    pub fn longest_duration_movies(&self, limit: usize) -> Result<Vec<MovieDuration>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare(
            r#"
            SELECT tconst, primaryTitle, runtimeMinutes, genres
            FROM movies
            ORDER BY runtimeMinutes DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |r| {
            Ok(MovieDuration {
                tconst: r.get(0)?,
                primary_title: r.get(1)?,
                runtime_minutes: r.get(2)?,
                genres: r.get(3)?,
            })
        })?;

        let mut movies = Vec::new();
        for movie in rows {
            movies.push(movie?);
        }
        Ok(movies)
    }

    pub fn insert_movie(&self, movie: &Movie) -> Result<()> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            r#"
            INSERT INTO movies (tconst, titleType, primaryTitle, runtimeMinutes, genres)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                &movie.tconst,
                &movie.title_type,
                &movie.primary_title,
                movie.runtime_minutes,
                &movie.genres
            ],
        )?;
        Ok(())
    }

    /// Companion insert for the ratings side; not exposed over HTTP, used
    /// by tests and seed tooling.
    pub fn insert_rating(&self, rating: &TitleRating) -> Result<()> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            r#"
            INSERT INTO ratings (tconst, averageRating, numVotes)
            VALUES (?1, ?2, ?3)
            "#,
            params![&rating.tconst, rating.average_rating, rating.num_votes],
        )?;
        Ok(())
    }

    /// Movies rated strictly above `min_rating`, best-rated first.
    pub fn top_rated_movies(&self, min_rating: f64) -> Result<Vec<RatedMovie>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare(
            r#"
            SELECT m.tconst, m.primaryTitle, m.genres, r.averageRating
            FROM movies m
            JOIN ratings r ON m.tconst = r.tconst
            WHERE r.averageRating > ?1
            ORDER BY r.averageRating DESC
            "#,
        )?;

        let rows = stmt.query_map(params![min_rating], |r| {
            Ok(RatedMovie {
                tconst: r.get(0)?,
                primary_title: r.get(1)?,
                genres: r.get(2)?,
                average_rating: r.get(3)?,
            })
        })?;

        let mut movies = Vec::new();
        for movie in rows {
            movies.push(movie?);
        }
        Ok(movies)
    }

    /// The ordered feed for the subtotal report: genre ascending, votes
    /// descending within genre. The aggregator relies on this ordering.
    pub fn genre_vote_rows(&self) -> Result<Vec<VoteRow>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare(
            r#"
            SELECT m.genres, m.primaryTitle, r.numVotes
            FROM movies m
            JOIN ratings r ON m.tconst = r.tconst
            ORDER BY m.genres, r.numVotes DESC
            "#,
        )?;

        let rows = stmt.query_map([], |r| {
            Ok(VoteRow {
                genre: r.get(0)?,
                primary_title: r.get(1)?,
                num_votes: r.get(2)?,
            })
        })?;

        let mut votes = Vec::new();
        for row in rows {
            votes.push(row?);
        }
        Ok(votes)
    }

    /// Bulk conditional runtime bump; returns the number of movies updated.
    pub fn extend_runtimes(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let updated = conn.execute(
            r#"
            UPDATE movies SET runtimeMinutes =
            CASE
                WHEN genres LIKE '%Documentary%' THEN runtimeMinutes + 15
                WHEN genres LIKE '%Animation%' THEN runtimeMinutes + 30
                ELSE runtimeMinutes + 45
            END
            "#,
            [],
        )?;
        Ok(updated)
    }
}
