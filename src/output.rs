//! CLI output formatting for both pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Diagnostics go through
//! `tracing`; these lines are the user-facing summary.

use std::path::Path;

use crate::types::Manifest;

/// Summary of what the parse stage found.
///
/// ```text
/// Spring Meet — 2024-04-01
///     Teams: 12
///     Finishers: 94
///     Photos: 38
///     Malformed rows kept: 2
/// ```
pub fn format_parse_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec![
        format!("{} — {}", manifest.meet.name, manifest.meet.date),
        format!("    Teams: {}", manifest.team_results.len()),
        format!("    Finishers: {}", manifest.individual_results.len()),
    ];
    if !manifest.gallery.is_empty() {
        lines.push(format!("    Photos: {}", manifest.gallery.len()));
    }
    if manifest.malformed_rows > 0 {
        lines.push(format!(
            "    Malformed rows kept: {}",
            manifest.malformed_rows
        ));
    }
    lines
}

pub fn print_parse_output(manifest: &Manifest) {
    for line in format_parse_output(manifest) {
        println!("{line}");
    }
}

/// Summary of what the render stage wrote.
pub fn format_render_output(manifest: &Manifest, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "{} → {}",
        manifest.meet.name,
        output_dir.join("index.html").display()
    )];
    if !manifest.gallery.is_empty() {
        lines.push(format!(
            "    {} photos → {}",
            manifest.gallery.len(),
            output_dir.join("gallery").display()
        ));
    }
    lines
}

pub fn print_render_output(manifest: &Manifest, output_dir: &Path) {
    for line in format_render_output(manifest, output_dir) {
        println!("{line}");
    }
}
