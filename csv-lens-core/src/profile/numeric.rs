use crate::profile::frequency::{FrequencyCounter, FrequencyResult};
use crate::profile::histogram::{build_histogram, HistogramBin};
use crate::summary::{entry, Summary, SummaryValue};
use crate::table::{fmt_number, Column, Table};
use csv_lens_common::{CsvLensError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-column numeric profile. Statistics that the coerced series cannot
/// support are `None` and surface as "N/A" in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnProfile {
    pub column_name: String,
    pub n_unique: Option<u64>,
    pub n_missing: Option<u64>,
    pub n_zeros: Option<u64>,
    pub n_negatives: Option<u64>,
    pub col_mean: Option<f64>,
    pub col_std: Option<f64>,
    pub col_min: Option<f64>,
    pub col_max: Option<f64>,
    pub col_median: Option<f64>,
    pub histogram: Vec<HistogramBin>,
    pub frequent: FrequencyResult,
}

/// Columns usable by the numeric profiler: declared integer/float, plus
/// text columns where at least one non-missing value coerces to a number
/// (all-failing text is excluded).
pub fn detect_numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .filter(|(_, col)| match col {
            Column::Integer(_) | Column::Float(_) => true,
            Column::Text(values) => values
                .iter()
                .flatten()
                .any(|s| parse_numeric(s).is_some()),
        })
        .map(|(name, _)| name.clone())
        .collect()
}

fn parse_numeric(s: &str) -> Option<f64> {
    // "nan" parses as a float in Rust but is a missing value here
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Best-effort f64 coercion of one column; cells that fail become missing.
fn coerce_to_numeric(col: &Column) -> Vec<Option<f64>> {
    match col {
        Column::Integer(v) => v.iter().map(|c| c.map(|x| x as f64)).collect(),
        Column::Float(v) => v.clone(),
        Column::Text(v) => v
            .iter()
            .map(|c| c.as_deref().and_then(parse_numeric))
            .collect(),
    }
}

pub fn profile_numeric_column(
    table: &Table,
    column: &str,
    bins: Option<usize>,
    top: usize,
) -> Result<NumericColumnProfile> {
    let col = table
        .column(column)
        .ok_or_else(|| CsvLensError::UnknownColumn(column.to_owned()))?;
    let serie = coerce_to_numeric(col);
    let values: Vec<f64> = serie.iter().flatten().copied().collect();

    // every statistic guards the empty series on its own
    let n_unique = if serie.is_empty() {
        None
    } else {
        let distinct: HashSet<u64> = values.iter().map(|v| v.to_bits()).collect();
        Some(distinct.len() as u64)
    };
    let n_missing = if serie.is_empty() {
        None
    } else {
        Some(serie.iter().filter(|c| c.is_none()).count() as u64)
    };
    let n_zeros = if serie.is_empty() {
        None
    } else {
        Some(values.iter().filter(|&&v| v == 0.0).count() as u64)
    };
    let n_negatives = if serie.is_empty() {
        None
    } else {
        Some(values.iter().filter(|&&v| v < 0.0).count() as u64)
    };
    let col_mean = mean(&values);
    let col_std = sample_std(&values);
    let col_min = values.iter().cloned().reduce(f64::min);
    let col_max = values.iter().cloned().reduce(f64::max);
    let col_median = median(&values);

    let mut freq = FrequencyCounter::new();
    for &v in &values {
        freq.add(fmt_number(v));
    }

    Ok(NumericColumnProfile {
        column_name: column.to_owned(),
        n_unique,
        n_missing,
        n_zeros,
        n_negatives,
        col_mean,
        col_std,
        col_min,
        col_max,
        col_median,
        histogram: build_histogram(&values, bins),
        frequent: freq.top_n(top),
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator); needs at least two values.
fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(var.sqrt())
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

impl NumericColumnProfile {
    pub fn summary(&self) -> Summary {
        vec![
            entry("Number of Unique Values", SummaryValue::count(self.n_unique)),
            entry(
                "Number of Rows with Missing Values",
                SummaryValue::count(self.n_missing),
            ),
            entry("Number of Rows with 0", SummaryValue::count(self.n_zeros)),
            entry(
                "Number of Rows with Negative Values",
                SummaryValue::count(self.n_negatives),
            ),
            entry("Average Value", SummaryValue::decimal(self.col_mean)),
            entry(
                "Standard Deviation Value",
                SummaryValue::decimal(self.col_std),
            ),
            entry("Minimum Value", SummaryValue::number(self.col_min)),
            entry("Maximum Value", SummaryValue::number(self.col_max)),
            entry("Median Value", SummaryValue::decimal(self.col_median)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv_bytes;

    #[test]
    fn detects_declared_and_coercible_columns() {
        let table =
            load_csv_bytes(b"a,b,c,d\n1,1.5,10,x\n2,2.5,abc,y\n").unwrap();
        // c mixes "10" and "abc": declared text, one value coerces -> qualifies
        assert_eq!(detect_numeric_columns(&table), ["a", "b", "c"]);
    }

    #[test]
    fn excludes_all_failing_text() {
        let table = load_csv_bytes(b"a,b\nx,1\ny,2\n").unwrap();
        assert_eq!(detect_numeric_columns(&table), ["b"]);
    }

    #[test]
    fn coercion_maps_failures_to_missing() {
        let table = load_csv_bytes(b"age\n10\n20\nabc\n30\nNA\n").unwrap();
        let p = profile_numeric_column(&table, "age", None, 20).unwrap();
        assert_eq!(p.n_missing, Some(2));
        assert_eq!(p.n_unique, Some(3));
        assert_eq!(p.col_min, Some(10.0));
        assert_eq!(p.col_max, Some(30.0));
    }

    #[test]
    fn stats_on_known_series() {
        let table = load_csv_bytes(b"v\n-2\n0\n0\n4\n8\n").unwrap();
        let p = profile_numeric_column(&table, "v", None, 20).unwrap();
        assert_eq!(p.n_zeros, Some(2));
        assert_eq!(p.n_negatives, Some(1));
        assert_eq!(p.col_mean, Some(2.0));
        assert_eq!(p.col_median, Some(0.0));
        let std = p.col_std.unwrap();
        assert!(std >= 0.0);
        // squared deviations from the mean of 2 sum to 64; 64 / (5-1) = 16
        assert!((std - 4.0).abs() < 1e-9);
    }

    #[test]
    fn median_between_min_and_max() {
        let table = load_csv_bytes(b"v\n3\n1\n7\n5\n").unwrap();
        let p = profile_numeric_column(&table, "v", None, 20).unwrap();
        let (min, med, max) = (
            p.col_min.unwrap(),
            p.col_median.unwrap(),
            p.col_max.unwrap(),
        );
        assert!(min <= med && med <= max);
        assert_eq!(med, 4.0); // even length averages the middle pair
    }

    #[test]
    fn single_value_has_no_std() {
        let table = load_csv_bytes(b"v\n42\n").unwrap();
        let p = profile_numeric_column(&table, "v", None, 20).unwrap();
        assert_eq!(p.col_std, None);
        assert_eq!(p.col_mean, Some(42.0));
        let summary = p.summary();
        assert_eq!(summary[5].value, SummaryValue::NotApplicable);
    }

    #[test]
    fn all_failing_series_degrades_to_na() {
        let table = load_csv_bytes(b"v\nx\ny\n").unwrap();
        let p = profile_numeric_column(&table, "v", None, 20).unwrap();
        assert_eq!(p.n_missing, Some(2));
        assert_eq!(p.n_unique, Some(0));
        assert_eq!(p.col_mean, None);
        assert_eq!(p.col_min, None);
        assert!(p.histogram.is_empty());
        assert_eq!(p.frequent.total_count, 0);
    }

    #[test]
    fn frequency_percentage_over_non_missing() {
        let table = load_csv_bytes(b"v\n1\n1\n2\nabc\n").unwrap();
        let p = profile_numeric_column(&table, "v", None, 20).unwrap();
        assert_eq!(p.frequent.total_count, 3);
        assert_eq!(p.frequent.top_values[0].value, "1");
        assert!((p.frequent.top_values[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let table = load_csv_bytes(b"v\n1\n").unwrap();
        assert!(profile_numeric_column(&table, "missing", None, 20).is_err());
    }

    #[test]
    fn summary_order_is_fixed() {
        let table = load_csv_bytes(b"v\n1\n2\n").unwrap();
        let labels: Vec<String> = profile_numeric_column(&table, "v", None, 20)
            .unwrap()
            .summary()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(
            labels,
            [
                "Number of Unique Values",
                "Number of Rows with Missing Values",
                "Number of Rows with 0",
                "Number of Rows with Negative Values",
                "Average Value",
                "Standard Deviation Value",
                "Minimum Value",
                "Maximum Value",
                "Median Value"
            ]
        );
    }
}
