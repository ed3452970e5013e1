//! CSV parsing and manifest generation.
//!
//! Stage 1 of the trackside build pipeline. Reads the scraped results CSV,
//! splits it into the meet's three regions via [`crate::layout`], lists the
//! gallery directory, and produces the manifest the render stage consumes.
//!
//! The whole file is materialized before any processing — a meet's results
//! run a few hundred rows at most.

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::ReportConfig;
use crate::gallery::{self, GalleryError};
use crate::layout::{self, LayoutError};
use crate::types::Manifest;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),
}

/// Parse the results CSV and gallery directory into a [`Manifest`].
pub fn parse(
    csv_path: &Path,
    gallery_dir: &Path,
    config: &ReportConfig,
) -> Result<Manifest, ParseError> {
    let rows = read_rows(csv_path)?;
    info!(rows = rows.len(), file = %csv_path.display(), "results file read");

    let parsed = layout::split(&rows, config.layout.strategy)?;
    info!(
        strategy = %parsed.detected,
        teams = parsed.team_results.len(),
        finishers = parsed.individual_results.len(),
        "layout detected"
    );

    let gallery = gallery::scan_gallery(gallery_dir)?;

    Ok(Manifest {
        meet: parsed.meet,
        team_results: parsed.team_results,
        individual_results: parsed.individual_results,
        gallery,
        malformed_rows: parsed.malformed_rows,
        config: config.clone(),
    })
}

/// Read every CSV row, preserving blank lines as empty rows.
///
/// The csv parser skips blank lines, but the results layout counts them —
/// row 4 and the pre-boundary divider are blank in one of the observed
/// conventions — so each skipped line is reinserted as an empty row, using
/// the line numbers the reader tracks.
fn read_rows(csv_path: &Path) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let resume_line = reader.position().line();
        if !reader.read_record(&mut record)? {
            break;
        }
        let record_line = record.position().map_or(resume_line, |p| p.line());
        for _ in resume_line..record_line {
            rows.push(Vec::new());
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
