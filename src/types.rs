//! Shared types used across both pipeline stages.
//!
//! These types are serialized to JSON between stages (parse → render)
//! and must be identical across both modules.

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;

/// The meet header block: the first four rows of every results file.
///
/// All fields are free text straight from the scrape — no date parsing, no
/// URL validation. The renderer escapes them; nothing else touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetMetadata {
    /// Meet name (row 0), used as page title and `<h1>`.
    pub name: String,
    /// Meet date as published (row 1), free form.
    pub date: String,
    /// Canonical results URL (row 2).
    pub link: String,
    /// Race comments (row 3, all fields joined with spaces). May contain
    /// markdown — the scraped comments regularly carry bare links.
    pub comments: String,
}

/// One row of the team scoring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRow {
    pub place: String,
    pub team: String,
    pub score: String,
}

/// One finisher in the individual results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRow {
    pub place: String,
    pub grade: String,
    pub name: String,
    /// Link to the athlete's results page. Empty renders as plain text.
    pub athlete_link: String,
    /// Finishing time in race-clock format (e.g. `17:30.4`), not parsed.
    pub time: String,
    pub team: String,
    /// Link to the team's results page. Empty renders as plain text.
    pub team_link: String,
    /// Profile picture URL or path relative to the report. Empty = no thumb.
    pub profile_pic: String,
}

/// A photograph in the meet gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Filename within the gallery directory.
    pub filename: String,
    /// Pixel dimensions when header probing succeeded; used for
    /// width/height attributes so the grid doesn't reflow while loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

/// Manifest output from the parse stage, input to the render stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub meet: MeetMetadata,
    pub team_results: Vec<TeamRow>,
    pub individual_results: Vec<IndividualRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<GalleryImage>,
    /// Rows kept despite a wrong field count (padded or truncated).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub malformed_rows: usize,
    pub config: ReportConfig,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
