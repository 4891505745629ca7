use crate::table::fmt_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One value in a profiling summary. Statistics that could not be computed
/// (empty series, failed coercion) carry `NotApplicable` and render "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SummaryValue {
    Count(u64),
    /// Native numeric representation; integral floats lose the ".0".
    Number(f64),
    /// Rendered to two decimal places.
    Decimal(f64),
    Text(String),
    NotApplicable,
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Count(n) => write!(f, "{n}"),
            SummaryValue::Number(v) => write!(f, "{}", fmt_number(*v)),
            SummaryValue::Decimal(v) => write!(f, "{v:.2}"),
            SummaryValue::Text(s) => write!(f, "{s}"),
            SummaryValue::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl SummaryValue {
    /// Count when present, N/A otherwise.
    pub fn count(v: Option<u64>) -> Self {
        v.map_or(SummaryValue::NotApplicable, SummaryValue::Count)
    }

    pub fn number(v: Option<f64>) -> Self {
        v.map_or(SummaryValue::NotApplicable, SummaryValue::Number)
    }

    pub fn decimal(v: Option<f64>) -> Self {
        v.map_or(SummaryValue::NotApplicable, SummaryValue::Decimal)
    }

    pub fn text(v: Option<String>) -> Self {
        v.map_or(SummaryValue::NotApplicable, SummaryValue::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: SummaryValue,
}

/// Ordered label/value pairs describing one profiling pass; rendered by the
/// caller as a two-column table.
pub type Summary = Vec<SummaryEntry>;

pub fn entry(label: &str, value: SummaryValue) -> SummaryEntry {
    SummaryEntry {
        label: label.to_owned(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(SummaryValue::Count(3).to_string(), "3");
        assert_eq!(SummaryValue::Number(10.0).to_string(), "10");
        assert_eq!(SummaryValue::Number(1.25).to_string(), "1.25");
        assert_eq!(SummaryValue::Decimal(1.0 / 3.0).to_string(), "0.33");
        assert_eq!(SummaryValue::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn constructors_map_none_to_na() {
        assert_eq!(SummaryValue::decimal(None), SummaryValue::NotApplicable);
        assert_eq!(SummaryValue::count(Some(2)), SummaryValue::Count(2));
    }
}
