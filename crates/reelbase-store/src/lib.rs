//! Store - SQLite Movie/Ratings Storage
//!
//! This crate owns the relational side of reelbase: schema setup and the
//! fixed set of queries the HTTP surface runs against the movies and
//! ratings tables.

mod schema;
mod store;

pub mod models;

pub use models::{Movie, MovieDuration, RatedMovie, TitleRating};
pub use store::{MovieStore, Result, StoreError};
