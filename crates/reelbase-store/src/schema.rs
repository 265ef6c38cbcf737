use rusqlite::Connection;

// Column names mirror the IMDb title dumps the dataset is loaded from.
pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            tconst TEXT PRIMARY KEY,
            titleType TEXT NOT NULL,
            primaryTitle TEXT NOT NULL,
            runtimeMinutes INTEGER NOT NULL,
            genres TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ratings (
            tconst TEXT PRIMARY KEY REFERENCES movies(tconst),
            averageRating REAL NOT NULL,
            numVotes INTEGER NOT NULL
        );
        "#,
    )
}
