//! Descriptive statistics over execution-time samples.

use serde::Serialize;

/// Descriptive summary of a non-empty sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (N-1); `None` for a single observation
    pub std: Option<f64>,
    /// Smallest observation
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Largest observation
    pub max: f64,
}

impl Summary {
    /// Summarize a sample. Returns `None` when the sample is empty.
    pub fn describe(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        // Summation error must not push the mean outside the observed range.
        let mean = mean(sample).clamp(min, max);
        Some(Self {
            count: sample.len(),
            mean,
            std: sample_std(sample, mean),
            min,
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max,
        })
    }

    /// Standard deviation for drawing; an undefined spread draws as zero.
    pub fn std_or_zero(&self) -> f64 {
        self.std.unwrap_or(0.0)
    }
}

/// Arithmetic mean of a non-empty sample.
///
/// Falls back to summing `x / max|x|` when the plain sum overflows.
pub fn mean(sample: &[f64]) -> f64 {
    let n = sample.len() as f64;
    let sum = sample.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }
    let scale = largest_magnitude(sample.iter().copied());
    scale * (sample.iter().map(|x| x / scale).sum::<f64>() / n)
}

/// Sample standard deviation with Bessel's correction.
///
/// `None` when fewer than two observations exist. Deviations large enough
/// for their squares to overflow are rescaled by the largest one first.
pub fn sample_std(sample: &[f64], mean: f64) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let dof = (sample.len() - 1) as f64;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / dof;
    if variance.is_finite() {
        return Some(variance.sqrt());
    }

    let scale = largest_magnitude(sample.iter().map(|x| x - mean));
    let scaled = sample.iter().map(|x| ((x - mean) / scale).powi(2)).sum::<f64>() / dof;
    Some(scale * scaled.sqrt())
}

fn largest_magnitude(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0f64, |m, v| m.max(v.abs()))
}

/// Quantile by linear interpolation between closest ranks.
///
/// `sorted` must be ascending and non-empty; `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    (sorted[lower] + (sorted[upper] - sorted[lower]) * fraction).clamp(sorted[lower], sorted[upper])
}

/// Pearson correlation of two equally long series.
///
/// `None` when fewer than two pairs exist or either series is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_describe_matches_dataframe_convention() {
        let summary = Summary::describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(summary.count, 5);
        assert_relative_eq!(summary.mean, 3.0);
        assert_relative_eq!(summary.std.unwrap(), 2.5f64.sqrt());
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.q1, 2.0);
        assert_relative_eq!(summary.median, 3.0);
        assert_relative_eq!(summary.q3, 4.0);
        assert_relative_eq!(summary.max, 5.0);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let summary = Summary::describe(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_relative_eq!(summary.q1, 17.5);
        assert_relative_eq!(summary.median, 25.0);
        assert_relative_eq!(summary.q3, 32.5);
    }

    #[test]
    fn test_unsorted_input() {
        let summary = Summary::describe(&[5.0, 1.0, 3.0]).unwrap();
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.median, 3.0);
        assert_relative_eq!(summary.max, 5.0);
    }

    #[test]
    fn test_singleton_has_undefined_spread() {
        let summary = Summary::describe(&[7.0]).unwrap();
        assert_eq!(summary.std, None);
        assert_eq!(summary.std_or_zero(), 0.0);
        assert_relative_eq!(summary.q1, 7.0);
        assert_relative_eq!(summary.q3, 7.0);
    }

    #[test]
    fn test_empty_sample() {
        assert!(Summary::describe(&[]).is_none());
    }

    #[test]
    fn test_identical_values_have_zero_spread() {
        let summary = Summary::describe(&[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(summary.std, Some(0.0));
    }

    #[test]
    fn test_huge_deviation_keeps_finite_spread() {
        let summary = Summary::describe(&[0.0, 1e160]).unwrap();

        assert_relative_eq!(summary.mean, 5e159);
        let std = summary.std.unwrap();
        assert!(std.is_finite());
        assert_relative_eq!(std, 1e160 / 2f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_mean_near_float_max_does_not_overflow() {
        let summary = Summary::describe(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(summary.mean, f64::MAX);
        assert_eq!(summary.std, Some(0.0));
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(pearson(&xs, &ys).unwrap(), 1.0, epsilon = 1e-12);

        let inverse = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson(&xs, &inverse).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert!(pearson(&[1.0], &[2.0]).is_none());
        assert!(pearson(&[1.0, 1.0], &[2.0, 3.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[2.0]).is_none());
    }
}
