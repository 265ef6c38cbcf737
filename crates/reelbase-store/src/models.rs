use serde::{Deserialize, Serialize};

/// A full row of the movies table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub tconst: String,
    pub title_type: String,
    pub primary_title: String,
    pub runtime_minutes: i64,
    pub genres: String,
}

/// Movie record returned by the longest-duration listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDuration {
    pub tconst: String,
    pub primary_title: String,
    pub runtime_minutes: i64,
    pub genres: String,
}

/// Movie joined with its rating, returned by the top-rated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedMovie {
    pub tconst: String,
    pub primary_title: String,
    pub genres: String,
    pub average_rating: f64,
}

/// A full row of the ratings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRating {
    pub tconst: String,
    pub average_rating: f64,
    pub num_votes: i64,
}
