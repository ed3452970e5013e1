//! Report configuration module.
//!
//! Handles loading and validating `report.toml`. Configuration is flat — one
//! file next to the meet data; paths come from the CLI, not from config.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! strategy = "auto"        # auto | header-row | marker-count
//!
//! [gallery]
//! thumb_width = 220        # Gallery cell width in px
//! columns = 5              # Target columns per gallery row
//!
//! [colors]
//! background = "#ffffff"
//! text = "#111111"
//! accent = "#1a5fb4"       # Links, table accents
//! border = "#e0e0e0"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only pin the layout strategy
//! [layout]
//! strategy = "marker-count"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::layout::Strategy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Report configuration loaded from `report.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Results-file layout detection settings.
    pub layout: LayoutConfig,
    /// Gallery grid settings.
    pub gallery: GalleryConfig,
    /// Report color scheme.
    pub colors: ColorConfig,
}

impl ReportConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.thumb_width == 0 {
            return Err(ConfigError::Validation(
                "gallery.thumb_width must be non-zero".into(),
            ));
        }
        if self.gallery.columns == 0 {
            return Err(ConfigError::Validation(
                "gallery.columns must be non-zero".into(),
            ));
        }
        for (key, value) in [
            ("colors.background", &self.colors.background),
            ("colors.text", &self.colors.text),
            ("colors.accent", &self.colors.accent),
            ("colors.border", &self.colors.border),
        ] {
            if !value.starts_with('#') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a hex color (e.g. \"#1a5fb4\"), got \"{value}\""
                )));
            }
        }
        Ok(())
    }
}

/// Results-file layout detection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Boundary-detection strategy. `auto` tries each known convention in
    /// order; pin a concrete one when a meet's file is known to be odd.
    pub strategy: Strategy,
}

/// Gallery grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Gallery cell width in px.
    pub thumb_width: u32,
    /// Target columns per gallery row.
    pub columns: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            thumb_width: 220,
            columns: 5,
        }
    }
}

/// Report color scheme, emitted as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".into(),
            text: "#111111".into(),
            accent: "#1a5fb4".into(),
            border: "#e0e0e0".into(),
        }
    }
}

/// Load `report.toml` from the given path, falling back to defaults when the
/// file doesn't exist. A file that exists but fails to parse or validate is
/// an error — a typo should never silently produce a default report.
pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    if !path.exists() {
        return Ok(ReportConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: ReportConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Generate CSS custom properties from the color and gallery config.
pub fn generate_color_css(colors: &ColorConfig, gallery: &GalleryConfig) -> String {
    format!(
        ":root {{\n  --background: {};\n  --text: {};\n  --accent: {};\n  --border: {};\n  --thumb-width: {}px;\n  --gallery-columns: {};\n}}",
        colors.background,
        colors.text,
        colors.accent,
        colors.border,
        gallery.thumb_width,
        gallery.columns,
    )
}

/// A stock `report.toml` with every option documented — `gen-config` output.
pub fn stock_config_toml() -> &'static str {
    r##"# trackside report configuration
# All options are optional; the values below are the defaults.

[layout]
# How to find the boundary between the team and individual tables:
#   auto          try each known convention in order (recommended)
#   header-row    match the exact 8-column individual-results header
#   marker-count  split on the second row whose first field is "Place"
strategy = "auto"

[gallery]
# Gallery cell width in px.
thumb_width = 220
# Target columns per gallery row.
columns = 5

[colors]
background = "#ffffff"
text = "#111111"
# Links and table accents.
accent = "#1a5fb4"
border = "#e0e0e0"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("report.toml")).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn partial_config_overrides_one_section() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.toml");
        fs::write(&path, "[layout]\nstrategy = \"marker-count\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.layout.strategy, Strategy::MarkerCount);
        assert_eq!(config.gallery, GalleryConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.toml");
        fs::write(&path, "[gallery]\nthumbwidth = 300\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_thumb_width_fails_validation() {
        let config = ReportConfig {
            gallery: GalleryConfig {
                thumb_width: 0,
                columns: 5,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_hex_color_fails_validation() {
        let config = ReportConfig {
            colors: ColorConfig {
                accent: "blue".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: ReportConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn color_css_carries_all_properties() {
        let css = generate_color_css(&ColorConfig::default(), &GalleryConfig::default());
        assert!(css.contains("--background: #ffffff"));
        assert!(css.contains("--accent: #1a5fb4"));
        assert!(css.contains("--thumb-width: 220px"));
        assert!(css.contains("--gallery-columns: 5"));
    }
}
