use crate::aggregate::{ReportRow, TOTAL_LABEL};

const GENRE_WIDTH: usize = 8;
const TITLE_WIDTH: usize = 22;
const VOTES_WIDTH: usize = 8;

fn border() -> String {
    format!(
        "+{}+{}+{}+",
        "-".repeat(GENRE_WIDTH + 2),
        "-".repeat(TITLE_WIDTH + 2),
        "-".repeat(VOTES_WIDTH + 2)
    )
}

fn table_line(genre: &str, title: &str, votes: &str) -> String {
    // Cells wider than their column are padded out, never truncated.
    format!(
        "| {genre:<gw$} | {title:<tw$} | {votes:<vw$} |",
        gw = GENRE_WIDTH,
        tw = TITLE_WIDTH,
        vw = VOTES_WIDTH
    )
}

/// Render a report as a bordered fixed-width text table.
///
/// Subtotal rows blank the genre column; continuation detail rows blank the
/// genre and votes columns. A border line precedes the first row, follows
/// the header, and follows every row.
pub fn render_table(rows: &[ReportRow]) -> String {
    let border = border();
    let mut out = String::new();

    out.push_str(&border);
    out.push('\n');
    out.push_str(&table_line("Genre", "Primary Title", "NumVotes"));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');

    for row in rows {
        let line = match row {
            ReportRow::Subtotal { num_votes } => {
                table_line("", TOTAL_LABEL, &num_votes.to_string())
            }
            ReportRow::Detail { genre, title, .. } if genre.is_empty() => {
                table_line("", title, "")
            }
            ReportRow::Detail {
                genre,
                title,
                num_votes,
            } => table_line(genre, title, &num_votes.to_string()),
        };
        out.push_str(&line);
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }

    out
}
