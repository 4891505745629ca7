use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub occurrence: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyResult {
    pub top_values: Vec<FrequencyEntry>,
    pub total_count: u64,
}

/// One bar of a categorical chart aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub value: String,
    pub occurrence: u64,
}

/// Chart-ready grouping of a series by exact value, unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    /// Category axis label; the datetime profiler switches it between
    /// "date" and "value" depending on whether the parse succeeded.
    pub axis: String,
    pub bars: Vec<BarEntry>,
}

/// Groups values by exact equality. Percentages are taken over the number
/// of values added, so the un-truncated grouping always sums to 100.
pub struct FrequencyCounter {
    map: HashMap<String, u64>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            total: 0,
        }
    }

    pub fn add(&mut self, val: String) {
        *self.map.entry(val).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Sorted (occurrence desc, value asc) so ties resolve the same way on
    /// every run over identical input.
    fn sorted_entries(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> =
            self.map.iter().map(|(v, c)| (v.clone(), *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn top_n(&self, n: usize) -> FrequencyResult {
        let total = self.total;
        let top_values = self
            .sorted_entries()
            .into_iter()
            .take(n)
            .map(|(v, c)| FrequencyEntry {
                percentage: if total > 0 {
                    c as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
                value: v,
                occurrence: c,
            })
            .collect();
        FrequencyResult {
            top_values,
            total_count: total,
        }
    }

    /// Full grouping as a bar chart, no truncation or minimum count.
    pub fn bar_chart(&self, axis: &str) -> BarChart {
        BarChart {
            axis: axis.to_owned(),
            bars: self
                .sorted_entries()
                .into_iter()
                .map(|(value, occurrence)| BarEntry { value, occurrence })
                .collect(),
        }
    }

    /// Most frequent value; ties resolve to the smallest value.
    pub fn mode(&self) -> Option<String> {
        self.sorted_entries().into_iter().next().map(|(v, _)| v)
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(values: &[&str]) -> FrequencyCounter {
        let mut c = FrequencyCounter::new();
        for v in values {
            c.add((*v).to_owned());
        }
        c
    }

    #[test]
    fn counts_and_percentages() {
        let c = counter(&["a", "b", "a", "a"]);
        let result = c.top_n(20);
        assert_eq!(result.total_count, 4);
        assert_eq!(result.top_values[0].value, "a");
        assert_eq!(result.top_values[0].occurrence, 3);
        assert!((result.top_values[0].percentage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn untruncated_percentages_sum_to_100() {
        let c = counter(&["a", "b", "b", "c", "c", "c"]);
        let sum: f64 = c.top_n(usize::MAX).top_values.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn truncation_keeps_percentages_unrenormalized() {
        let c = counter(&["a", "a", "b"]);
        let top1 = c.top_n(1);
        assert_eq!(top1.top_values.len(), 1);
        assert!((top1.top_values[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ties_break_by_value() {
        let c = counter(&["b", "a", "c", "a", "b", "c"]);
        let result = c.top_n(3);
        let values: Vec<&str> = result.top_values.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["a", "b", "c"]);
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        assert_eq!(counter(&["b", "a"]).mode().unwrap(), "a");
        assert_eq!(counter(&["b", "b", "a"]).mode().unwrap(), "b");
        assert!(counter(&[]).mode().is_none());
    }

    #[test]
    fn bar_chart_is_unfiltered() {
        let c = counter(&["x", "y", "x"]);
        let chart = c.bar_chart("value");
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].value, "x");
        assert_eq!(chart.bars[0].occurrence, 2);
    }

    #[test]
    fn empty_counter_yields_empty_result() {
        let c = counter(&[]);
        assert_eq!(c.top_n(20).top_values.len(), 0);
        assert_eq!(c.top_n(20).total_count, 0);
    }
}
