//! Results-file layout parsing.
//!
//! The core of the parse stage. A scraped results CSV is semi-structured and
//! position-dependent:
//!
//! ```text
//! row 0    meet name
//! row 1    meet date (free text)
//! row 2    canonical results URL
//! row 3    race comments (one or more fields)
//! row 4    blank line or section header
//! row 5..  team result rows: Place, Team, Score
//! ...      boundary row (individual-results header)
//! ...      individual result rows, 8 fields each, to end of file
//! ```
//!
//! The scrape source formats meets loosely, and two conventions for the
//! boundary between the tables show up in practice. Each is a [`Strategy`]:
//!
//! - [`Strategy::HeaderRow`] — the boundary is the exact eight-column
//!   individual-results header row.
//! - [`Strategy::MarkerCount`] — both tables carry a header whose first
//!   field is `Place`; the second such row is the boundary.
//!
//! [`Strategy::Auto`] tries them in that order. New conventions slot in as
//! new variants without touching the slicing logic.
//!
//! ## Malformed rows
//!
//! Column assignment is positional. Rows with the wrong field count are kept
//! — short rows padded with empty fields, long rows truncated — but each one
//! is logged at `warn` and counted in [`ParsedLayout::malformed_rows`].
//! Dropping them would make the row accounting lie about the input file;
//! keeping them silently would hide scrape regressions.
//!
//! Parsing is a pure transformation: no I/O, no state, same input → same
//! output.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::types::{IndividualRow, MeetMetadata, TeamRow};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("metadata block incomplete: expected at least 4 rows, found {found}")]
    MetadataMissing { found: usize },
    #[error("no table boundary found ({tried} strategy)")]
    BoundaryNotFound { tried: Strategy },
}

/// Rows 0–3 are always the meet metadata block.
pub const MIN_METADATA_ROWS: usize = 4;

/// First row of the team table. Row 4 is a blank line or the team header,
/// depending on the file convention.
pub const TEAM_START_ROW: usize = 5;

/// The exact individual-results header as the scrape emits it.
pub const INDIVIDUAL_HEADER: [&str; 8] = [
    "Place",
    "Grade",
    "Name",
    "Athlete Link",
    "Time",
    "Team",
    "Team Link",
    "Profile Pic",
];

/// First field of every table header row, in both conventions.
const MARKER_FIELD: &str = "Place";

/// Boundary-detection strategy for locating the individual-results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Try [`Strategy::HeaderRow`], then [`Strategy::MarkerCount`].
    #[default]
    Auto,
    /// Match the exact eight-column individual-results header row.
    HeaderRow,
    /// Count rows whose first field is `Place`; the second is the boundary.
    MarkerCount,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Auto => "auto",
            Strategy::HeaderRow => "header-row",
            Strategy::MarkerCount => "marker-count",
        };
        f.write_str(name)
    }
}

/// The three regions of a results file, split and column-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLayout {
    pub meet: MeetMetadata,
    pub team_results: Vec<TeamRow>,
    pub individual_results: Vec<IndividualRow>,
    /// Rows kept despite a wrong field count.
    pub malformed_rows: usize,
    /// The concrete strategy that found the boundary (never `Auto`).
    pub detected: Strategy,
}

/// Split raw CSV rows into metadata, team results, and individual results.
pub fn split(rows: &[Vec<String>], strategy: Strategy) -> Result<ParsedLayout, LayoutError> {
    if rows.len() < MIN_METADATA_ROWS {
        return Err(LayoutError::MetadataMissing { found: rows.len() });
    }

    let meet = MeetMetadata {
        name: first_field(&rows[0]),
        date: first_field(&rows[1]),
        link: first_field(&rows[2]),
        comments: rows[3].join(" "),
    };

    let (boundary, detected) = find_boundary(rows, strategy)
        .ok_or(LayoutError::BoundaryNotFound { tried: strategy })?;

    // The row immediately before the boundary is a blank divider in both
    // conventions; the team table never includes it.
    let team_end = boundary.saturating_sub(1).max(TEAM_START_ROW);
    let team_region = rows.get(TEAM_START_ROW..team_end).unwrap_or(&[]);
    let individual_region = rows.get(boundary + 1..).unwrap_or(&[]);

    let mut malformed_rows = 0;
    let team_results = team_region
        .iter()
        .enumerate()
        .map(|(i, fields)| team_row(fields, TEAM_START_ROW + i, &mut malformed_rows))
        .collect();
    let individual_results = individual_region
        .iter()
        .enumerate()
        .map(|(i, fields)| individual_row(fields, boundary + 1 + i, &mut malformed_rows))
        .collect();

    Ok(ParsedLayout {
        meet,
        team_results,
        individual_results,
        malformed_rows,
        detected,
    })
}

/// Locate the boundary row index, resolving `Auto` to a concrete strategy.
fn find_boundary(rows: &[Vec<String>], strategy: Strategy) -> Option<(usize, Strategy)> {
    match strategy {
        Strategy::HeaderRow => find_header_row(rows).map(|i| (i, Strategy::HeaderRow)),
        Strategy::MarkerCount => find_second_marker(rows).map(|i| (i, Strategy::MarkerCount)),
        Strategy::Auto => find_boundary(rows, Strategy::HeaderRow)
            .or_else(|| find_boundary(rows, Strategy::MarkerCount)),
    }
}

/// Scan from the team start for the exact individual-results header row.
fn find_header_row(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(TEAM_START_ROW)
        .find(|(_, row)| row.iter().map(String::as_str).eq(INDIVIDUAL_HEADER))
        .map(|(i, _)| i)
}

/// Scan from row 4 for the second row whose first field is `Place`.
///
/// The first match is the team table's own header; the second is the
/// individual-results header, whatever its remaining columns look like.
fn find_second_marker(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(MIN_METADATA_ROWS)
        .filter(|(_, row)| row.first().map(String::as_str) == Some(MARKER_FIELD))
        .map(|(i, _)| i)
        .nth(1)
}

fn first_field(row: &[String]) -> String {
    row.first().cloned().unwrap_or_default()
}

/// Positional field access for row conversion; absent fields become empty.
fn field(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn check_arity(row: &[String], expected: usize, row_index: usize, malformed: &mut usize) {
    if row.len() != expected {
        *malformed += 1;
        warn!(
            row = row_index,
            fields = row.len(),
            expected,
            "row has unexpected field count; padding or truncating"
        );
    }
}

fn team_row(row: &[String], row_index: usize, malformed: &mut usize) -> TeamRow {
    check_arity(row, 3, row_index, malformed);
    TeamRow {
        place: field(row, 0),
        team: field(row, 1),
        score: field(row, 2),
    }
}

fn individual_row(row: &[String], row_index: usize, malformed: &mut usize) -> IndividualRow {
    check_arity(row, INDIVIDUAL_HEADER.len(), row_index, malformed);
    IndividualRow {
        place: field(row, 0),
        grade: field(row, 1),
        name: field(row, 2),
        athlete_link: field(row, 3),
        time: field(row, 4),
        team: field(row, 5),
        team_link: field(row, 6),
        profile_pic: field(row, 7),
    }
}
