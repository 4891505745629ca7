use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range_start: f64,
    pub range_end: f64,
    pub count: u64,
}

/// Sturges' rule, clamped to 1..=30 bins.
pub fn sturges_bins(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = (n as f64).log2().ceil() as usize + 1;
    k.clamp(1, 30)
}

/// Equal-width binning over the non-missing values of a series. `bins`
/// overrides the automatic bin count when given. An empty series yields no
/// bins; a constant series collapses into a single bin.
pub fn build_histogram(values: &[f64], bins: Option<usize>) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }
    let bins = bins.unwrap_or_else(|| sturges_bins(values.len())).max(1);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            range_start: min,
            range_end: max,
            count: values.len() as u64,
        }];
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = ((v - min) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| HistogramBin {
            range_start: min + i as f64 * width,
            range_end: min + (i + 1) as f64 * width,
            count: c,
        })
        .collect()
}
