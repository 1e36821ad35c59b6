//! Figure rendering.
//!
//! The figure is drawn into an in-memory RGB buffer so that rendering and
//! file output stay separate stages: nothing touches the filesystem until
//! the whole figure has been drawn.

pub mod colormap;
pub mod panels;
pub mod theme;

pub use theme::PlotTheme;

use crate::aggregate::Analysis;
use panels::BarPanel;
use plotters::coord::Shift;
use plotters::prelude::*;
use probcond_common::{ProbcondError, Result};

/// Shared title above the four panels.
pub const FIGURE_TITLE: &str = "Análisis de Rendimiento - Sistema de Inferencia Condicional";

/// A rendered figure as packed 8-bit RGB rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Figure {
    /// A white canvas of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![255; width as usize * height as usize * 3] }
    }

    /// RGB value at a pixel, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[offset], self.pixels[offset + 1], self.pixels[offset + 2]])
    }
}

/// Draws an [`Analysis`] as a 2×2 grid of panels.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: PlotTheme,
}

impl Renderer {
    pub fn new(theme: PlotTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &PlotTheme {
        &self.theme
    }

    /// Render the full figure.
    pub fn render(&self, analysis: &Analysis) -> Result<Figure> {
        let mut figure = Figure::blank(self.theme.width, self.theme.height);
        {
            let root =
                BitMapBackend::with_buffer(&mut figure.pixels, (figure.width, figure.height)).into_drawing_area();
            self.compose(&root, analysis)?;
            root.present().map_err(ProbcondError::render)?;
        }
        Ok(figure)
    }

    /// Draw onto any backend.
    ///
    /// Panel order: interest bars (top left), conditioned bars (top right),
    /// heatmap (bottom left), scatter (bottom right).
    pub fn compose<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, analysis: &Analysis) -> Result<()> {
        let theme = &self.theme;
        root.fill(&WHITE).map_err(ProbcondError::render)?;
        let body = root
            .titled(FIGURE_TITLE, theme.bold_font(theme.title_font_size))
            .map_err(ProbcondError::render)?;

        let cells = body.split_evenly((2, 2));
        let interest = BarPanel {
            title: "Tiempo de Ejecución vs Variables de Interés",
            x_desc: "Número de Variables de Interés",
            color: theme.interest_bar_color,
        };
        let conditioned = BarPanel {
            title: "Tiempo de Ejecución vs Variables Condicionadas",
            x_desc: "Número de Variables Condicionadas",
            color: theme.conditioned_bar_color,
        };

        panels::draw_bar_panel(&cells[0], &analysis.by_interest, &interest, theme)?;
        panels::draw_bar_panel(&cells[1], &analysis.by_conditioned, &conditioned, theme)?;
        panels::draw_heatmap_panel(&cells[2], &analysis.pivot, theme)?;
        panels::draw_scatter_panel(&cells[3], &analysis.scatter, theme)?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(PlotTheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Measurement};

    fn analysis_records() -> Vec<Measurement> {
        vec![
            Measurement::new(1, 0, 10.0, 16),
            Measurement::new(1, 0, 20.0, 16),
            Measurement::new(1, 1, 12.0, 8),
            Measurement::new(2, 0, 40.0, 64),
            Measurement::new(3, 2, 90.0, 0),
        ]
    }

    fn analysis() -> Analysis {
        Analysis::from_dataset(&Dataset::from_records(analysis_records()).unwrap())
    }

    #[test]
    fn test_blank_figure() {
        let figure = Figure::blank(4, 3);
        assert_eq!(figure.pixels.len(), 36);
        assert_eq!(figure.pixel(3, 2), Some([255, 255, 255]));
        assert_eq!(figure.pixel(4, 0), None);
    }

    #[test]
    #[ignore = "rasterizes text; needs a system sans-serif font"]
    fn test_render_produces_configured_canvas() {
        let renderer = Renderer::default();
        let figure = renderer.render(&analysis()).unwrap();

        assert_eq!(figure.width, 1500);
        assert_eq!(figure.height, 1200);
        assert_eq!(figure.pixels.len(), 1500 * 1200 * 3);
        assert!(figure.pixels.iter().any(|&b| b != 255));
    }

    #[test]
    #[ignore = "rasterizes text; needs a system sans-serif font"]
    fn test_empty_heatmap_cell_stays_white() {
        // Filling (2, 1) with a value inside the existing range leaves every
        // other heatmap cell, the colorbar and the scatter unchanged.
        let mut records = analysis_records();
        records.push(Measurement::new(2, 1, 50.0, 0));
        let filled = Analysis::from_dataset(&Dataset::from_records(records).unwrap());

        let renderer = Renderer::default();
        let sparse = renderer.render(&analysis()).unwrap();
        let dense = renderer.render(&filled).unwrap();

        // Bottom-left quadrant, below the bar panels.
        let mut changed = 0;
        for y in sparse.height / 2 + 100..sparse.height {
            for x in 0..sparse.width / 2 {
                let before = sparse.pixel(x, y);
                if before != dense.pixel(x, y) {
                    assert_eq!(before, Some([255, 255, 255]), "empty cell painted at ({x}, {y})");
                    changed += 1;
                }
            }
        }
        assert!(changed > 0);
    }

    #[test]
    #[ignore = "rasterizes text; needs a system sans-serif font"]
    fn test_render_huge_spread_completes() {
        let dataset =
            Dataset::from_records(vec![Measurement::new(1, 0, 0.0, 5), Measurement::new(1, 0, 1e160, 5)]).unwrap();
        let figure = Renderer::default().render(&Analysis::from_dataset(&dataset)).unwrap();
        assert_eq!(figure.pixels.len(), 1500 * 1200 * 3);
    }

    #[test]
    #[ignore = "rasterizes text; needs a system sans-serif font"]
    fn test_render_single_measurement() {
        let dataset = Dataset::from_records(vec![Measurement::new(1, 0, 5.0, 1)]).unwrap();
        let figure = Renderer::default().render(&Analysis::from_dataset(&dataset)).unwrap();
        assert_eq!(figure.pixels.len(), 1500 * 1200 * 3);
    }
}
