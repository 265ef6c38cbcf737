use serde::ser::{Serialize, Serializer};

/// Label carried by every subtotal row, in both encodings.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One row of the ordered genre/title/votes join feeding the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRow {
    pub genre: String,
    pub primary_title: String,
    pub num_votes: i64,
}

impl VoteRow {
    pub fn new(genre: impl Into<String>, primary_title: impl Into<String>, num_votes: i64) -> Self {
        Self {
            genre: genre.into(),
            primary_title: primary_title.into(),
            num_votes,
        }
    }
}

/// One output row of the subtotal report.
///
/// `Detail` carries the genre only on the first row of its group; the
/// remaining rows of the group carry an empty genre so the rendered table
/// reads as a visual grouping. `Subtotal` closes the group it follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    Detail {
        genre: String,
        title: String,
        num_votes: i64,
    },
    Subtotal {
        num_votes: i64,
    },
}

// Both report encodings are views of the same flat record: a subtotal is
// the record with an empty genre and the TOTAL label.
impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Record<'a> {
            genre: &'a str,
            title: &'a str,
            #[serde(rename = "numVotes")]
            num_votes: i64,
        }

        let record = match self {
            ReportRow::Detail {
                genre,
                title,
                num_votes,
            } => Record {
                genre,
                title,
                num_votes: *num_votes,
            },
            ReportRow::Subtotal { num_votes } => Record {
                genre: "",
                title: TOTAL_LABEL,
                num_votes: *num_votes,
            },
        };

        record.serialize(serializer)
    }
}

/// Fold an ordered row stream into detail rows with per-genre subtotals.
///
/// The input must already be sorted by genre; the fold never sorts or
/// validates sortedness, so rows for a genre that are not contiguous
/// produce one subtotal per contiguous run. A final subtotal is emitted
/// unconditionally when the stream ends: for an empty stream the output is
/// exactly one subtotal of 0 with no detail rows.
pub fn aggregate(rows: impl IntoIterator<Item = VoteRow>) -> Vec<ReportRow> {
    let mut current_genre: Option<String> = None;
    let mut running_total: i64 = 0;
    let mut report = Vec::new();

    for row in rows {
        match &current_genre {
            // First row of the whole stream opens the first group.
            None => {
                report.push(ReportRow::Detail {
                    genre: row.genre.clone(),
                    title: row.primary_title,
                    num_votes: row.num_votes,
                });
                running_total = row.num_votes;
                current_genre = Some(row.genre);
            }

            // Continuation row: genre column is suppressed.
            Some(genre) if *genre == row.genre => {
                report.push(ReportRow::Detail {
                    genre: String::new(),
                    title: row.primary_title,
                    num_votes: row.num_votes,
                });
                running_total += row.num_votes;
            }

            // Group boundary: flush the previous group's total first.
            Some(_) => {
                report.push(ReportRow::Subtotal {
                    num_votes: running_total,
                });
                report.push(ReportRow::Detail {
                    genre: row.genre.clone(),
                    title: row.primary_title,
                    num_votes: row.num_votes,
                });
                running_total = row.num_votes;
                current_genre = Some(row.genre);
            }
        }
    }

    // The trailing group always gets its subtotal, even when the stream was
    // empty (a lone zero subtotal).
    report.push(ReportRow::Subtotal {
        num_votes: running_total,
    });

    report
}
