use crate::profile::frequency::{BarChart, FrequencyCounter, FrequencyResult};
use crate::summary::{entry, Summary, SummaryValue};
use crate::table::{Column, Table};
use csv_lens_common::{CsvLensError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Stand-in a missing cell stringifies to, matching how null floats read
/// once a mixed column is forced to text.
const MISSING_AS_TEXT: &str = "nan";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColumnProfile {
    pub column_name: String,
    pub n_unique: u64,
    pub n_missing: u64,
    pub n_empty: u64,
    pub n_mode: Option<String>,
    pub n_space: u64,
    pub n_lower: u64,
    pub n_upper: u64,
    pub n_alpha: u64,
    pub n_digit: u64,
    pub barchart: BarChart,
    pub frequent: FrequencyResult,
}

/// All columns declared as text, regardless of content.
pub fn detect_text_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .filter(|(_, col)| matches!(col, Column::Text(_)))
        .map(|(name, _)| name.clone())
        .collect()
}

static RE_ALPHA: OnceLock<Regex> = OnceLock::new();
static RE_DIGIT: OnceLock<Regex> = OnceLock::new();

fn re_alpha() -> &'static Regex {
    RE_ALPHA.get_or_init(|| Regex::new(r"^\p{Alphabetic}+$").unwrap())
}
fn re_digit() -> &'static Regex {
    RE_DIGIT.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// At least one cased character and none of the opposite case.
fn is_all_lower(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn is_all_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Total string coercion of one column: numbers stringify, missing cells
/// become the literal "nan". Never fails.
fn coerce_to_text(col: &Column) -> Vec<String> {
    fn missing() -> String {
        MISSING_AS_TEXT.to_owned()
    }
    match col {
        Column::Integer(v) => v
            .iter()
            .map(|c| c.map(|x| x.to_string()).unwrap_or_else(missing))
            .collect(),
        Column::Float(v) => v
            .iter()
            .map(|c| c.map(crate::table::fmt_number).unwrap_or_else(missing))
            .collect(),
        Column::Text(v) => v
            .iter()
            .map(|c| c.clone().unwrap_or_else(missing))
            .collect(),
    }
}

pub fn profile_text_column(table: &Table, column: &str, top: usize) -> Result<TextColumnProfile> {
    let col = table
        .column(column)
        .ok_or_else(|| CsvLensError::UnknownColumn(column.to_owned()))?;
    let pre_missing = col.missing_count();
    let serie = coerce_to_text(col);

    let n_unique = serie.iter().collect::<HashSet<_>>().len() as u64;
    // pre-coercion nulls materialize as "nan", so one pass over the coerced
    // values counts both them and literal "nan" strings exactly once
    let n_missing = serie.iter().filter(|s| *s == MISSING_AS_TEXT).count() as u64;
    debug_assert!(n_missing >= pre_missing);

    let mut n_empty = 0u64;
    let mut n_space = 0u64;
    let mut n_lower = 0u64;
    let mut n_upper = 0u64;
    let mut n_alpha = 0u64;
    let mut n_digit = 0u64;
    let mut freq = FrequencyCounter::new();
    for s in &serie {
        if s.is_empty() {
            n_empty += 1;
        } else if s.chars().all(|c| c.is_whitespace()) {
            n_space += 1;
        }
        if is_all_lower(s) {
            n_lower += 1;
        }
        if is_all_upper(s) {
            n_upper += 1;
        }
        if re_alpha().is_match(s) {
            n_alpha += 1;
        }
        if re_digit().is_match(s) {
            n_digit += 1;
        }
        freq.add(s.clone());
    }

    Ok(TextColumnProfile {
        column_name: column.to_owned(),
        n_unique,
        n_missing,
        n_empty,
        n_mode: freq.mode(),
        n_space,
        n_lower,
        n_upper,
        n_alpha,
        n_digit,
        barchart: freq.bar_chart("value"),
        frequent: freq.top_n(top),
    })
}

impl TextColumnProfile {
    pub fn summary(&self) -> Summary {
        vec![
            entry(
                "Number of Unique Values",
                SummaryValue::Count(self.n_unique),
            ),
            entry(
                "Number of Rows with Missing Values",
                SummaryValue::Count(self.n_missing),
            ),
            entry("Number of Empty Rows", SummaryValue::Count(self.n_empty)),
            entry("Mode Value", SummaryValue::text(self.n_mode.clone())),
            entry(
                "Number of Rows with Only Whitespace",
                SummaryValue::Count(self.n_space),
            ),
            entry(
                "Number of Rows with Only Lowercases",
                SummaryValue::Count(self.n_lower),
            ),
            entry(
                "Number of Rows with Only Uppercases",
                SummaryValue::Count(self.n_upper),
            ),
            entry(
                "Number of Rows with Only Alphabet",
                SummaryValue::Count(self.n_alpha),
            ),
            entry(
                "Number of Rows with Only Digit",
                SummaryValue::Count(self.n_digit),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv_bytes;

    #[test]
    fn detects_only_declared_text() {
        let table = load_csv_bytes(b"a,b,c\n1,x,1.5\n2,y,2.5\n").unwrap();
        assert_eq!(detect_text_columns(&table), ["b"]);
    }

    #[test]
    fn case_and_class_counts() {
        let mut table = Table::new();
        table
            .push_column(
                "name".into(),
                Column::Text(vec![
                    Some("Alice".into()),
                    Some("bob".into()),
                    Some("".into()),
                    Some("  ".into()),
                    Some("BOB".into()),
                ]),
            )
            .unwrap();
        let p = profile_text_column(&table, "name", 20).unwrap();
        assert_eq!(p.n_empty, 1);
        assert_eq!(p.n_space, 1);
        assert_eq!(p.n_lower, 1);
        assert_eq!(p.n_upper, 1);
        assert_eq!(p.n_alpha, 3);
        assert_eq!(p.n_digit, 0);
        assert_eq!(p.n_unique, 5);
        assert_eq!(p.n_missing, 0);
    }

    #[test]
    fn lexical_predicates() {
        assert!(is_all_lower("bob"));
        assert!(is_all_lower("bob1"));
        assert!(!is_all_lower("Bob"));
        assert!(!is_all_lower("123")); // no cased character
        assert!(is_all_upper("BOB"));
        assert!(!is_all_upper("BOb"));
        assert!(re_alpha().is_match("abc"));
        assert!(!re_alpha().is_match("abc1"));
        assert!(!re_alpha().is_match(""));
        assert!(re_digit().is_match("123"));
        assert!(!re_digit().is_match("12a"));
    }

    #[test]
    fn missing_counts_nulls_and_literal_nan() {
        let table = load_csv_bytes(b"v\nx\nnan\nNA\ny\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        // "nan" and "NA" both load as null and coerce to "nan": two missing,
        // counted once each
        assert_eq!(p.n_missing, 2);
        assert_eq!(p.n_unique, 3); // x, nan, y
    }

    #[test]
    fn numeric_column_coerces_totally() {
        let table = load_csv_bytes(b"v\n1\n1\nNA\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        assert_eq!(p.n_missing, 1);
        assert_eq!(p.n_digit, 2);
        assert_eq!(p.n_mode, Some("1".to_owned()));
        assert_eq!(p.frequent.total_count, 3); // coercion is total
    }

    #[test]
    fn mode_tie_takes_smallest() {
        let table = load_csv_bytes(b"v\nb\na\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        assert_eq!(p.n_mode, Some("a".to_owned()));
    }

    #[test]
    fn barchart_groups_every_value() {
        let table = load_csv_bytes(b"v\nx\ny\nx\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        assert_eq!(p.barchart.axis, "value");
        assert_eq!(p.barchart.bars.len(), 2);
        assert_eq!(p.barchart.bars[0].value, "x");
    }

    #[test]
    fn frequency_percentage_over_total_rows() {
        let table = load_csv_bytes(b"v\nx\nx\nNA\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        let x = &p.frequent.top_values[0];
        assert_eq!(x.occurrence, 2);
        assert!((x.percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_column_is_safe() {
        let table = load_csv_bytes(b"v\n").unwrap();
        let p = profile_text_column(&table, "v", 20).unwrap();
        assert_eq!(p.n_unique, 0);
        assert_eq!(p.n_mode, None);
        assert_eq!(p.summary()[3].value, SummaryValue::NotApplicable);
    }
}
