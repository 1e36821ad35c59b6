//! Visual theme passed explicitly into the renderer.

use plotters::style::{FontDesc, FontStyle, IntoFont, RGBColor};
use probcond_common::{ProbcondError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// An RGB triple, written as `[r, g, b]` in theme files.
pub type Rgb = [u8; 3];

/// Convert a theme color into a plotting color.
pub fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Figure geometry, fonts and colors.
///
/// Every field has a default, so a theme file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotTheme {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Font family for all text
    pub font_family: String,
    /// Shared figure title size
    pub title_font_size: u32,
    /// Panel caption size
    pub panel_title_font_size: u32,
    /// Axis description and tick label size
    pub label_font_size: u32,
    /// Heatmap cell annotation size
    pub annotation_font_size: u32,
    /// Bar color of the interest-count panel
    pub interest_bar_color: Rgb,
    /// Bar color of the conditioned-count panel
    pub conditioned_bar_color: Rgb,
    /// Half width of error bar caps in pixels
    pub error_cap_px: i32,
    /// Scatter point radius in pixels
    pub point_radius: u32,
    /// Scatter point opacity
    pub point_opacity: f64,
    /// Grid line opacity
    pub grid_opacity: f64,
    /// Width reserved for a color legend in pixels
    pub colorbar_width: u32,
    /// Margin around each panel in pixels
    pub panel_margin: u32,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1200,
            font_family: "sans-serif".to_string(),
            title_font_size: 32,
            panel_title_font_size: 22,
            label_font_size: 16,
            annotation_font_size: 14,
            interest_bar_color: [70, 130, 180],
            conditioned_bar_color: [255, 127, 80],
            error_cap_px: 5,
            point_radius: 6,
            point_opacity: 0.6,
            grid_opacity: 0.3,
            colorbar_width: 110,
            panel_margin: 15,
        }
    }
}

impl PlotTheme {
    /// Load a theme from a YAML file, falling back to defaults for absent keys.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProbcondError::ConfigNotFound { path: path.to_path_buf() },
            _ => ProbcondError::io(format!("reading theme {}", path.display()), e),
        })?;

        let theme: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| ProbcondError::ConfigParsing { path: path.to_path_buf(), message: e.to_string() })?;

        theme
            .validate()
            .map_err(|message| ProbcondError::ConfigParsing { path: path.to_path_buf(), message })?;

        Ok(theme)
    }

    /// Check value ranges the renderer relies on.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width < 400 || self.height < 300 {
            return Err(format!("figure must be at least 400x300 pixels, got {}x{}", self.width, self.height));
        }
        if self.colorbar_width >= self.width / 4 {
            return Err(format!("colorbar_width {} leaves no room for the panel", self.colorbar_width));
        }
        for (name, value) in [("point_opacity", self.point_opacity), ("grid_opacity", self.grid_opacity)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0 and 1, got {value}"));
            }
        }
        let sizes = [
            self.title_font_size,
            self.panel_title_font_size,
            self.label_font_size,
            self.annotation_font_size,
        ];
        if sizes.contains(&0) {
            return Err("font sizes must be positive".to_string());
        }
        if self.font_family.trim().is_empty() {
            return Err("font_family must not be empty".to_string());
        }
        Ok(())
    }

    /// Regular font at the given size.
    pub fn font(&self, size: u32) -> FontDesc<'_> {
        (self.font_family.as_str(), f64::from(size)).into_font()
    }

    /// Bold font at the given size.
    pub fn bold_font(&self, size: u32) -> FontDesc<'_> {
        (self.font_family.as_str(), f64::from(size), FontStyle::Bold).into_font()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn theme_file(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_theme_is_valid() {
        assert!(PlotTheme::default().validate().is_ok());
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let file = theme_file("width: 1800\ninterest_bar_color: [10, 20, 30]\n");
        let theme = PlotTheme::load(file.path()).unwrap();

        assert_eq!(theme.width, 1800);
        assert_eq!(theme.interest_bar_color, [10, 20, 30]);
        assert_eq!(theme.height, PlotTheme::default().height);
        assert_eq!(rgb(theme.interest_bar_color), RGBColor(10, 20, 30));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = theme_file("colour: red\n");
        assert!(matches!(PlotTheme::load(file.path()), Err(ProbcondError::ConfigParsing { .. })));
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let file = theme_file("point_opacity: 1.5\n");
        match PlotTheme::load(file.path()) {
            Err(ProbcondError::ConfigParsing { message, .. }) => assert!(message.contains("point_opacity")),
            other => panic!("expected ConfigParsing, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_figure_is_rejected() {
        let theme = PlotTheme { width: 100, ..PlotTheme::default() };
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_missing_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlotTheme::load(dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ProbcondError::ConfigNotFound { .. })));
    }
}
