//! HTML report generation.
//!
//! Stage 2 of the trackside build pipeline. Takes the parse manifest and
//! generates the final static report.
//!
//! ## Generated Document
//!
//! A single `index.html` with in-page navigation:
//!
//! - **Header**: meet name, link to the canonical results page
//! - **Race summary**: the scraped comments, rendered as markdown
//! - **Team results**: Place | Team | Score
//! - **Individual results**: Place | Grade | Name | Time | Team | Profile,
//!   with clickable athlete/team links and inline profile thumbnails
//! - **Gallery**: image grid; files are copied into `dist/gallery/` so the
//!   output directory is self-contained
//!
//! Sections with no data (no scoring teams, no photos) are omitted along
//! with their nav entries.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping — the
//! scraped fields are untrusted text. The stylesheet is embedded at compile
//! time, with color and grid values injected as CSS custom properties from
//! `report.toml`.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::config;
use crate::types::{GalleryImage, IndividualRow, Manifest, MeetMetadata, TeamRow};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Load a parse-stage manifest from disk.
pub fn load_manifest(path: &Path) -> Result<Manifest, RenderError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Render the report from a manifest file into `output_dir/index.html`,
/// copying gallery images alongside it.
pub fn render(
    manifest_path: &Path,
    gallery_dir: &Path,
    output_dir: &Path,
) -> Result<(), RenderError> {
    let manifest = load_manifest(manifest_path)?;

    fs::create_dir_all(output_dir)?;
    copy_gallery(&manifest.gallery, gallery_dir, output_dir)?;

    let report = render_report(&manifest);
    fs::write(output_dir.join("index.html"), report.into_string())?;
    info!(output = %output_dir.join("index.html").display(), "report written");
    Ok(())
}

/// Copy manifest-listed gallery files into `output_dir/gallery/`.
fn copy_gallery(
    gallery: &[GalleryImage],
    gallery_dir: &Path,
    output_dir: &Path,
) -> Result<(), RenderError> {
    if gallery.is_empty() {
        return Ok(());
    }
    let dst = output_dir.join("gallery");
    fs::create_dir_all(&dst)?;
    for image in gallery {
        let src = gallery_dir.join(&image.filename);
        if src.is_file() {
            fs::copy(&src, dst.join(&image.filename))?;
        } else {
            debug!(file = %src.display(), "gallery file listed in manifest but missing");
        }
    }
    Ok(())
}

/// Render the full report document.
pub fn render_report(manifest: &Manifest) -> Markup {
    let color_css = config::generate_color_css(&manifest.config.colors, &manifest.config.gallery);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let content = html! {
        (site_header(&manifest.meet, !manifest.team_results.is_empty(), !manifest.gallery.is_empty()))
        main {
            (race_summary(&manifest.meet.comments))
            @if !manifest.team_results.is_empty() {
                (team_results(&manifest.team_results))
            }
            (individual_results(&manifest.individual_results))
            @if !manifest.gallery.is_empty() {
                (gallery_grid(&manifest.gallery))
            }
        }
        footer {}
    };

    base_document(&manifest.meet.name, &css, content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the page header: in-page nav, meet name, results link.
fn site_header(meet: &MeetMetadata, has_teams: bool, has_gallery: bool) -> Markup {
    html! {
        header {
            nav {
                a href="index.html" { "Home" }
                @if has_teams {
                    a href="#team_results" { "Team Results" }
                }
                a href="#individual_results" { "Individual Results" }
                @if has_gallery {
                    a href="#gallery" { "Gallery" }
                }
            }
            h1 { (meet.name) }
            @if meet.link.is_empty() {
                p.results-date { "Results from " (meet.date) }
            } @else {
                a.results-date href=(meet.link) { "Results from " (meet.date) }
            }
        }
    }
}

/// Renders the race summary section. Comments come through the scrape as
/// free text that regularly carries bare links, so they run through the
/// markdown renderer rather than a plain paragraph.
fn race_summary(comments: &str) -> Markup {
    let parser = Parser::new(comments);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    html! {
        section id="race_summary" {
            h2 { "Race Summary" }
            (PreEscaped(body_html))
        }
    }
}

fn team_results(rows: &[TeamRow]) -> Markup {
    html! {
        section id="team_results" {
            h2 { "Team Results" }
            table {
                tr {
                    th { "Place" } th { "Team" } th { "Score" }
                }
                @for row in rows {
                    tr {
                        td { (row.place) }
                        td { (row.team) }
                        td { (row.score) }
                    }
                }
            }
        }
    }
}

fn individual_results(rows: &[IndividualRow]) -> Markup {
    html! {
        section id="individual_results" {
            h2 { "Individual Results" }
            table {
                tr {
                    th { "Place" } th { "Grade" } th { "Name" }
                    th { "Time" } th { "Team" } th { "Profile" }
                }
                @for row in rows {
                    tr {
                        td { (row.place) }
                        td { (row.grade) }
                        td { (linked(&row.name, &row.athlete_link)) }
                        td { (row.time) }
                        td { (linked(&row.team, &row.team_link)) }
                        td {
                            @if !row.profile_pic.is_empty() {
                                img.profile-thumb src=(row.profile_pic)
                                    alt={ (row.name) " profile" } width="50";
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Anchor when a link is present, plain text when the scrape left it empty.
fn linked(text: &str, href: &str) -> Markup {
    html! {
        @if href.is_empty() {
            (text)
        } @else {
            a href=(href) { (text) }
        }
    }
}

fn gallery_grid(images: &[GalleryImage]) -> Markup {
    html! {
        section id="gallery" {
            h2 { "Gallery" }
            div.gallery {
                @for image in images {
                    div.gallery-item {
                        img src={ "gallery/" (image.filename) }
                            alt=(image.filename)
                            loading="lazy"
                            width=[image.dimensions.map(|d| d.0)]
                            height=[image.dimensions.map(|d| d.1)];
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::types::MeetMetadata;

    fn meet() -> MeetMetadata {
        MeetMetadata {
            name: "Spring Meet".into(),
            date: "2024-04-01".into(),
            link: "http://example.com/meet".into(),
            comments: "Sunny and warm".into(),
        }
    }

    fn jane() -> IndividualRow {
        IndividualRow {
            place: "1".into(),
            grade: "12".into(),
            name: "Jane Doe".into(),
            athlete_link: "http://a".into(),
            time: "17:30".into(),
            team: "Team A".into(),
            team_link: "http://t".into(),
            profile_pic: "pic.jpg".into(),
        }
    }

    fn manifest() -> Manifest {
        Manifest {
            meet: meet(),
            team_results: vec![TeamRow {
                place: "1".into(),
                team: "Team A".into(),
                score: "30".into(),
            }],
            individual_results: vec![jane()],
            gallery: vec![GalleryImage {
                filename: "start.jpg".into(),
                dimensions: Some((1200, 800)),
            }],
            malformed_rows: 0,
            config: ReportConfig::default(),
        }
    }

    #[test]
    fn report_carries_all_sections() {
        let html = render_report(&manifest()).into_string();
        assert!(html.contains("<title>Spring Meet</title>"));
        assert!(html.contains("Results from 2024-04-01"));
        assert!(html.contains("id=\"race_summary\""));
        assert!(html.contains("id=\"team_results\""));
        assert!(html.contains("id=\"individual_results\""));
        assert!(html.contains("id=\"gallery\""));
    }

    #[test]
    fn athlete_and_team_links_are_anchored() {
        let html = individual_results(&[jane()]).into_string();
        assert!(html.contains("<a href=\"http://a\">Jane Doe</a>"));
        assert!(html.contains("<a href=\"http://t\">Team A</a>"));
        assert!(html.contains("src=\"pic.jpg\""));
    }

    #[test]
    fn empty_links_render_as_plain_text() {
        let mut row = jane();
        row.athlete_link.clear();
        row.profile_pic.clear();

        let html = individual_results(&[row]).into_string();
        assert!(!html.contains("<a href=\"\">"));
        assert!(html.contains("Jane Doe"));
        assert!(!html.contains("profile-thumb"));
    }

    #[test]
    fn scraped_fields_are_escaped() {
        let mut m = manifest();
        m.individual_results[0].name = "<script>alert(1)</script>".into();

        let html = render_report(&m).into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_sections_are_omitted_with_their_nav_entries() {
        let mut m = manifest();
        m.team_results.clear();
        m.gallery.clear();

        let html = render_report(&m).into_string();
        assert!(!html.contains("id=\"team_results\""));
        assert!(!html.contains("id=\"gallery\""));
        assert!(!html.contains("#team_results"));
        assert!(!html.contains("#gallery"));
    }

    #[test]
    fn gallery_images_carry_dimensions_when_probed() {
        let html = gallery_grid(&[GalleryImage {
            filename: "start.jpg".into(),
            dimensions: Some((1200, 800)),
        }])
        .into_string();
        assert!(html.contains("src=\"gallery/start.jpg\""));
        assert!(html.contains("width=\"1200\""));
        assert!(html.contains("height=\"800\""));

        let html = gallery_grid(&[GalleryImage {
            filename: "odd.jpg".into(),
            dimensions: None,
        }])
        .into_string();
        assert!(!html.contains("width="));
    }

    #[test]
    fn comments_render_markdown_links() {
        let html =
            race_summary("Full results at [the site](http://example.com).").into_string();
        assert!(html.contains("<a href=\"http://example.com\">the site</a>"));
    }

    #[test]
    fn color_config_reaches_the_stylesheet() {
        let mut m = manifest();
        m.config.colors.accent = "#ff0000".into();

        let html = render_report(&m).into_string();
        assert!(html.contains("--accent: #ff0000"));
    }
}
