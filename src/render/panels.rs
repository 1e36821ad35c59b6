//! The four panels of the summary figure.
//!
//! Category axes use a continuous coordinate where category `i` sits at `i`
//! and occupies `[i - 0.5, i + 0.5]`; tick labels are mapped back to keys.

use super::colormap::{contrasting_text, ColorScale, VIRIDIS, YL_OR_RD};
use super::theme::{rgb, PlotTheme};
use crate::aggregate::{GroupedStat, PivotTable, ScatterPoint};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use probcond_common::{ProbcondError, Result};

/// Axis description for execution times.
pub const TIME_AXIS: &str = "Tiempo (μs)";

const COLORBAR_STEPS: usize = 64;
const BAR_HALF_WIDTH: f64 = 0.4;
const LABEL_AREA: u32 = 60;
const LOG_TICKS: usize = 8;

/// Which grouping a bar panel shows.
#[derive(Debug, Clone, Copy)]
pub struct BarPanel<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub color: [u8; 3],
}

/// Mean time per group with a ±1 std whisker.
pub fn draw_bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    groups: &[GroupedStat],
    panel: &BarPanel<'_>,
    theme: &PlotTheme,
) -> Result<()> {
    let keys: Vec<u32> = groups.iter().map(|g| g.key).collect();
    let (y_lo, y_hi) = bar_value_range(groups)?;
    let (x_lo, x_hi) = category_range(keys.len());

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, theme.bold_font(theme.panel_title_font_size))
        .margin(theme.panel_margin)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA + 20)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(ProbcondError::render)?;

    let x_label = |x: &f64| index_label(*x, &keys);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(theme.grid_opacity))
        .x_labels(keys.len() + 1)
        .x_label_formatter(&x_label)
        .x_desc(panel.x_desc)
        .y_desc(TIME_AXIS)
        .label_style(theme.font(theme.label_font_size))
        .axis_desc_style(theme.font(theme.label_font_size))
        .draw()
        .map_err(ProbcondError::render)?;

    let fill = rgb(panel.color);
    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let x = i as f64;
            Rectangle::new([(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, g.summary.mean)], fill.filled())
        }))
        .map_err(ProbcondError::render)?;

    let whisker = BLACK.stroke_width(2);
    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let (lo, hi) = whisker_span(g);
            PathElement::new(vec![(i as f64, lo), (i as f64, hi)], whisker)
        }))
        .map_err(ProbcondError::render)?;

    let cap = theme.error_cap_px;
    chart
        .draw_series(groups.iter().enumerate().flat_map(|(i, g)| {
            let (lo, hi) = whisker_span(g);
            [lo, hi].map(|y| EmptyElement::at((i as f64, y)) + PathElement::new(vec![(-cap, 0), (cap, 0)], whisker))
        }))
        .map_err(ProbcondError::render)?;

    Ok(())
}

/// Interest × conditioned grid colored by mean time, empty cells left blank.
pub fn draw_heatmap_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    pivot: &PivotTable,
    theme: &PlotTheme,
) -> Result<()> {
    let (plot_area, legend_area) = split_for_legend(area, theme);
    let rows = pivot.row_keys.len();
    let cols = pivot.column_keys.len();
    let (x_lo, x_hi) = category_range(cols);
    let (y_lo, y_hi) = category_range(rows);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption("Heatmap: Tiempo de Ejecución", theme.bold_font(theme.panel_title_font_size))
        .margin(theme.panel_margin)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(ProbcondError::render)?;

    // The first interest row is drawn at the top.
    let row_keys_top_down: Vec<u32> = pivot.row_keys.iter().rev().copied().collect();
    let x_label = |x: &f64| index_label(*x, &pivot.column_keys);
    let y_label = |y: &f64| index_label(*y, &row_keys_top_down);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols + 1)
        .y_labels(rows + 1)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .x_desc("Variables Condicionadas")
        .y_desc("Variables de Interés")
        .label_style(theme.font(theme.label_font_size))
        .axis_desc_style(theme.font(theme.label_font_size))
        .draw()
        .map_err(ProbcondError::render)?;

    let (lo, hi) = pivot.value_range().unwrap_or((0.0, 1.0));
    let cells: Vec<(f64, f64, f64)> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .filter_map(|(r, c)| pivot.get(r, c).map(|v| (c as f64, (rows - 1 - r) as f64, v)))
        .collect();

    chart
        .draw_series(cells.iter().map(|&(x, y, v)| {
            let mut cell = Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], YL_OR_RD.map(v, lo, hi).filled());
            cell.set_margin(1, 1, 1, 1);
            cell
        }))
        .map_err(ProbcondError::render)?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    chart
        .draw_series(cells.iter().map(|&(x, y, v)| {
            let ink = contrasting_text(YL_OR_RD.map(v, lo, hi));
            let style = theme.font(theme.annotation_font_size).color(&ink).pos(centered);
            Text::new(format!("{v:.1}"), (x, y), style)
        }))
        .map_err(ProbcondError::render)?;

    draw_colorbar(&legend_area, YL_OR_RD, (lo, hi), TIME_AXIS, theme)
}

/// Time against states evaluated on log-log axes, colored by interest count.
///
/// Points with a non-positive coordinate cannot be placed on a log axis and
/// are skipped.
pub fn draw_scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[ScatterPoint],
    theme: &PlotTheme,
) -> Result<()> {
    let (plot_area, legend_area) = split_for_legend(area, theme);
    let plottable: Vec<&ScatterPoint> = points.iter().filter(|p| p.is_log_plottable()).collect();

    let x_range = log_range(plottable.iter().map(|p| p.states_evaluated as f64))?;
    let y_range = log_range(plottable.iter().map(|p| p.execution_time_us))?;
    let (c_lo, c_hi) = value_range(points.iter().map(|p| f64::from(p.interest_var_count))).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(&plot_area)
        .caption("Estados Evaluados vs Tiempo de Ejecución", theme.bold_font(theme.panel_title_font_size))
        .margin(theme.panel_margin)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA + 20)
        .build_cartesian_2d((x_range.0..x_range.1).log_scale(), (y_range.0..y_range.1).log_scale())
        .map_err(ProbcondError::render)?;

    let decade = |v: &f64| decade_label(*v);
    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(theme.grid_opacity))
        .x_labels(LOG_TICKS)
        .y_labels(LOG_TICKS)
        .x_label_formatter(&decade)
        .y_label_formatter(&decade)
        .x_desc("Estados Evaluados")
        .y_desc(TIME_AXIS)
        .label_style(theme.font(theme.label_font_size))
        .axis_desc_style(theme.font(theme.label_font_size))
        .draw()
        .map_err(ProbcondError::render)?;

    chart
        .draw_series(plottable.iter().map(|p| {
            let color = VIRIDIS.map(f64::from(p.interest_var_count), c_lo, c_hi);
            Circle::new(
                (p.states_evaluated as f64, p.execution_time_us),
                theme.point_radius,
                color.mix(theme.point_opacity).filled(),
            )
        }))
        .map_err(ProbcondError::render)?;

    draw_colorbar(&legend_area, VIRIDIS, (c_lo, c_hi), "Variables de Interés", theme)
}

/// Vertical color legend for a scale over `[lo, hi]`.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: ColorScale,
    (lo, hi): (f64, f64),
    label: &str,
    theme: &PlotTheme,
) -> Result<()> {
    let (lo, hi) = widen(lo, hi)?;
    let mut chart = ChartBuilder::on(area)
        .margin_top(theme.panel_margin + 40)
        .margin_bottom(theme.panel_margin + LABEL_AREA)
        .margin_right(theme.panel_margin)
        .right_y_label_area_size(theme.colorbar_width / 2 + 10)
        .build_cartesian_2d(0f64..1f64, lo..hi)
        .map_err(ProbcondError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc(label)
        .label_style(theme.font(theme.label_font_size))
        .axis_desc_style(theme.font(theme.label_font_size))
        .draw()
        .map_err(ProbcondError::render)?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let v0 = lo + step * i as f64;
            let color = scale.at((i as f64 + 0.5) / COLORBAR_STEPS as f64);
            Rectangle::new([(0.0, v0), (1.0, v0 + step)], color.filled())
        }))
        .map_err(ProbcondError::render)?;

    Ok(())
}

fn split_for_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &PlotTheme,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let (width, _) = area.dim_in_pixel();
    let plot_width = width.saturating_sub(theme.colorbar_width);
    area.split_horizontally(plot_width as i32)
}

/// Axis span for `n` categories centered on `0..n`.
pub fn category_range(n: usize) -> (f64, f64) {
    (-0.5, n.max(1) as f64 - 0.5)
}

/// Key for a category tick, or an empty label between categories.
pub fn index_label(position: f64, keys: &[u32]) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    keys.get(index as usize).map(u32::to_string).unwrap_or_default()
}

/// Y span covering every bar and whisker, with headroom above.
pub fn bar_value_range(groups: &[GroupedStat]) -> Result<(f64, f64)> {
    let (lo, hi) = groups
        .iter()
        .map(whisker_span)
        .fold((0.0f64, 0.0f64), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
    let headroom = if hi > lo { (hi - lo) * 0.1 } else { 1.0 };
    finite_span(if lo < 0.0 { lo - headroom } else { 0.0 }, hi + headroom)
}

/// Whisker extent: mean ± std, collapsing to the mean when std is undefined.
pub fn whisker_span(group: &GroupedStat) -> (f64, f64) {
    let spread = group.summary.std_or_zero();
    (group.summary.mean - spread, group.summary.mean + spread)
}

/// Min and max of the values, if any.
pub fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Positive span for a log axis, snapped outward to whole decades after
/// one octave of padding. `1..10` when nothing is plottable.
pub fn log_range(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    let Some((lo, hi)) = value_range(values.filter(|v| *v > 0.0)) else {
        return Ok((1.0, 10.0));
    };
    let lo = 10f64.powi((lo / 2.0).log10().floor() as i32);
    let hi = 10f64.powi((hi * 2.0).log10().ceil() as i32);
    finite_span(lo, hi)
}

/// Non-empty linear span around `[lo, hi]`.
pub fn widen(lo: f64, hi: f64) -> Result<(f64, f64)> {
    if hi - lo > f64::EPSILON * hi.abs().max(1.0) {
        finite_span(lo, hi)
    } else {
        let pad = lo.abs().max(1.0) * 0.5;
        finite_span(lo - pad, hi + pad)
    }
}

/// Plotters cannot lay out an axis whose span is not a finite number.
fn finite_span(lo: f64, hi: f64) -> Result<(f64, f64)> {
    if (hi - lo).is_finite() && lo < hi {
        Ok((lo, hi))
    } else {
        Err(ProbcondError::render(format!("axis range [{lo:e}, {hi:e}] is not finite")))
    }
}

/// Tick label for a log axis: `1e<k>` on exact powers of ten, blank elsewhere.
pub fn decade_label(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let exponent = value.log10().round() as i32;
    if (value / 10f64.powi(exponent) - 1.0).abs() > 1e-9 {
        return String::new();
    }
    format!("1e{exponent}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Summary;

    fn group(key: u32, sample: &[f64]) -> GroupedStat {
        GroupedStat { key, summary: Summary::describe(sample).unwrap() }
    }

    #[test]
    fn test_index_label_maps_ticks_to_keys() {
        let keys = [1, 2, 5];
        assert_eq!(index_label(0.0, &keys), "1");
        assert_eq!(index_label(2.0, &keys), "5");
        assert_eq!(index_label(0.5, &keys), "");
        assert_eq!(index_label(3.0, &keys), "");
        assert_eq!(index_label(-1.0, &keys), "");
    }

    #[test]
    fn test_category_range_centers_categories() {
        assert_eq!(category_range(3), (-0.5, 2.5));
        assert_eq!(category_range(1), (-0.5, 0.5));
        assert_eq!(category_range(0), (-0.5, 0.5));
    }

    #[test]
    fn test_singleton_group_has_flat_whisker() {
        let g = group(1, &[42.0]);
        assert_eq!(whisker_span(&g), (42.0, 42.0));
    }

    #[test]
    fn test_bar_range_covers_whiskers() {
        let groups = [group(1, &[10.0, 20.0]), group(2, &[100.0])];
        let (lo, hi) = bar_value_range(&groups).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 100.0);

        let (_, upper) = whisker_span(&groups[0]);
        assert!(hi > upper);
    }

    #[test]
    fn test_bar_range_extends_below_zero_for_wide_spread() {
        let groups = [group(1, &[0.0, 0.0, 30.0])];
        let (lo, _) = bar_value_range(&groups).unwrap();
        assert!(lo < 0.0);
    }

    #[test]
    fn test_bar_range_finite_for_huge_spread() {
        let groups = [group(1, &[0.0, 1e160])];
        let (lo, hi) = bar_value_range(&groups).unwrap();
        assert!(lo.is_finite() && hi.is_finite());
        assert!(hi > 1e160);
    }

    #[test]
    fn test_bar_range_rejects_infinite_whisker() {
        let mut g = group(1, &[1.0, 2.0]);
        g.summary.std = Some(f64::INFINITY);
        assert!(matches!(bar_value_range(&[g]), Err(ProbcondError::Render { .. })));
    }

    #[test]
    fn test_log_range_snaps_to_decades() {
        assert_eq!(log_range([10.0, 1000.0].into_iter()).unwrap(), (1.0, 10_000.0));
        assert_eq!(log_range([50.0].into_iter()).unwrap(), (10.0, 100.0));
        assert_eq!(log_range([0.0, -3.0].into_iter()).unwrap(), (1.0, 10.0));
        assert_eq!(log_range(std::iter::empty()).unwrap(), (1.0, 10.0));
    }

    #[test]
    fn test_log_range_rejects_overflow() {
        assert!(log_range([f64::MAX].into_iter()).is_err());
    }

    #[test]
    fn test_widen_degenerate_range() {
        assert_eq!(widen(2.0, 8.0).unwrap(), (2.0, 8.0));
        assert_eq!(widen(4.0, 4.0).unwrap(), (2.0, 6.0));
        assert_eq!(widen(0.0, 0.0).unwrap(), (-0.5, 0.5));
        assert!(widen(0.0, f64::INFINITY).is_err());
        assert!(widen(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_decade_label_marks_powers_of_ten_only() {
        assert_eq!(decade_label(1.0), "1e0");
        assert_eq!(decade_label(100.0), "1e2");
        assert_eq!(decade_label(1e-3), "1e-3");
        assert_eq!(decade_label(90.0), "");
        assert_eq!(decade_label(200.0), "");
        assert_eq!(decade_label(0.0), "");
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range([3.0, 1.0, 2.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(value_range(std::iter::empty()), None);
    }
}
