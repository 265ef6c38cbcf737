//! Report - Genre Subtotal Reports
//!
//! This crate turns an ordered (genre, title, votes) row stream into a
//! report with per-genre running subtotals, and renders that report as a
//! fixed-width bordered text table. Both the JSON and the text view consume
//! the same `ReportRow` sequence.

pub mod aggregate;
pub mod table;

pub use aggregate::{aggregate, ReportRow, VoteRow, TOTAL_LABEL};
pub use table::render_table;
