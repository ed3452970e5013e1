//! # trackside
//!
//! A static report generator for cross-country meet results. A scraped
//! results CSV plus a directory of meet photos in; one self-contained HTML
//! report out: meet header, race summary, team and individual result tables,
//! and a photo gallery.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! trackside processes a meet through two independent stages joined by a
//! JSON manifest:
//!
//! ```text
//! 1. Parse    meet.csv + gallery/  →  manifest.json   (CSV layout → structured data)
//! 2. Render   manifest.json       →  dist/index.html (final HTML report)
//! ```
//!
//! This separation exists for two reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect
//!   when a meet's file parses strangely.
//! - **Testability**: each stage is a function from manifest to manifest (or
//!   HTML), so unit tests exercise layout logic without rendering and
//!   rendering without touching a results file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Splits raw CSV rows into metadata + team + individual regions — the only decision logic in the system |
//! | [`parse`] | Stage 1 — reads the results CSV, runs layout detection, lists the gallery, produces the manifest |
//! | [`gallery`] | Gallery directory listing and header-only dimension probing |
//! | [`render`] | Stage 2 — renders the final HTML report from the manifest using Maud |
//! | [`config`] | `report.toml` loading, validation, and CSS variable generation |
//! | [`types`] | Shared types serialized between stages |
//! | [`output`] | CLI output formatting — summary display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Layout Detection Over Fixed Offsets
//!
//! The upstream results site formats meets loosely: two boundary conventions
//! between the team and individual tables show up in practice. The layout
//! module models detection as a [`layout::Strategy`] tried in order rather
//! than per-meet hard-coded row indices, so a third convention is a new
//! variant, not a fork of the script.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed HTML is a build error, interpolation is
//! auto-escaped (every rendered field is scraped, untrusted text), and there
//! is no template directory to ship or get out of sync.
//!
//! ## Self-Contained Output
//!
//! The stylesheet is embedded in the document and gallery images are copied
//! next to it, so `dist/` can be dropped on any file server as-is. No
//! JavaScript, no runtime dependencies.

pub mod config;
pub mod gallery;
pub mod layout;
pub mod output;
pub mod parse;
pub mod render;
pub mod types;
