//! Submodule providing derived, side-effect-free descriptive statistics over
//! column sizes, row sizes, and costs.

/// Descriptive statistics of a numeric sample: min/max/mean/median/stddev,
/// interquartile range, and deciles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Smallest value in the sample.
    pub min: f64,
    /// Largest value in the sample.
    pub max: f64,
    /// Arithmetic mean of the sample.
    pub mean: f64,
    /// Median (50th percentile) of the sample.
    pub median: f64,
    /// Population standard deviation of the sample.
    pub stddev: f64,
    /// Interquartile range: the 75th percentile minus the 25th percentile.
    pub iqr: f64,
    /// The 10th, 20th, ..., 90th percentiles.
    pub deciles: [f64; 9],
}

/// Computes [`Stats`] over `values`. Returns `None` for an empty sample.
#[must_use]
pub fn compute_stats(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / sorted.len() as f64;
    let stddev = variance.sqrt();

    let percentile = |p: f64| -> f64 {
        if sorted.len() == 1 {
            return sorted[0];
        }
        let rank = p * (sorted.len() - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        if lower == upper {
            sorted[lower]
        } else {
            let frac = rank - lower as f64;
            sorted[lower] * (1.0 - frac) + sorted[upper] * frac
        }
    };

    let median = percentile(0.5);
    let iqr = percentile(0.75) - percentile(0.25);
    let mut deciles = [0.0; 9];
    for (i, decile) in deciles.iter_mut().enumerate() {
        *decile = percentile((i + 1) as f64 / 10.0);
    }

    Some(Stats { min, max, mean, median, stddev, iqr, deciles })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample_has_no_stats() {
        assert!(compute_stats(&[]).is_none());
    }

    #[test]
    fn single_value_sample() {
        let stats = compute_stats(&[5.0]).unwrap();
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.stddev, 0.0);
    }

    #[test]
    fn uniform_sample_statistics() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let stats = compute_stats(&values).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-9);
        assert!((stats.median - 5.5).abs() < 1e-9);
    }
}
