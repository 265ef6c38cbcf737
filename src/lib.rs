//! Reelbase - Movie/Ratings HTTP Service
//!
//! This is the root crate that re-exports the library components; the HTTP
//! binary lives in `reelbase-server`.

pub use reelbase_report;
pub use reelbase_store;
