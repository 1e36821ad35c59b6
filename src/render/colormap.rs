//! Sequential color scales sampled by linear interpolation between anchors.

use plotters::style::RGBColor;

/// A sequential colormap defined by evenly spaced anchor colors.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    anchors: &'static [(u8, u8, u8)],
}

/// Yellow to orange to red, light at low values.
pub const YL_OR_RD: ColorScale = ColorScale {
    anchors: &[
        (255, 255, 204),
        (255, 237, 160),
        (254, 217, 118),
        (254, 178, 76),
        (253, 141, 60),
        (252, 78, 42),
        (227, 26, 28),
        (189, 0, 38),
        (128, 0, 38),
    ],
};

/// Perceptually uniform purple to green to yellow.
pub const VIRIDIS: ColorScale = ColorScale {
    anchors: &[
        (68, 1, 84),
        (71, 45, 123),
        (59, 82, 139),
        (44, 114, 142),
        (33, 145, 140),
        (40, 174, 128),
        (94, 201, 98),
        (173, 220, 48),
        (253, 231, 37),
    ],
};

impl ColorScale {
    /// Color at relative position `t`, clamped to `[0, 1]`. NaN maps to the low end.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = self.anchors.len() - 1;
        let position = t * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        let fraction = position - index as f64;

        let (r0, g0, b0) = self.anchors[index];
        let (r1, g1, b1) = self.anchors[index + 1];
        RGBColor(lerp(r0, r1, fraction), lerp(g0, g1, fraction), lerp(b0, b1, fraction))
    }

    /// Color for `value` on the `[min, max]` data range.
    ///
    /// A degenerate range maps every value to the middle of the scale.
    pub fn map(&self, value: f64, min: f64, max: f64) -> RGBColor {
        if max > min {
            self.at((value - min) / (max - min))
        } else {
            self.at(0.5)
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round().clamp(0.0, 255.0) as u8
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
