use crate::profile::frequency::{BarChart, FrequencyCounter, FrequencyResult};
use crate::summary::{entry, Summary, SummaryValue};
use crate::table::{Column, Table};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use csv_lens_common::{CsvLensError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Styles tried per cell, first hit wins. Date-only styles parse to
/// midnight.
const DATETIME_STYLES: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];
const DATE_STYLES: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
];

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for style in DATETIME_STYLES {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, style) {
            return Some(dt);
        }
    }
    for style in DATE_STYLES {
        if let Ok(d) = NaiveDate::parse_from_str(s, style) {
            return Some(d.and_hms_opt(0, 0, 0).expect("midnight exists"));
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeColumnProfile {
    pub column_name: String,
    /// False when the raw values could not all be parsed; every temporal
    /// statistic below is then `None` and the caller should warn the user.
    pub is_valid_datetime: bool,
    pub n_unique: Option<u64>,
    pub n_missing: Option<u64>,
    pub col_min: Option<NaiveDateTime>,
    pub col_max: Option<NaiveDateTime>,
    pub n_weekend: Option<u64>,
    pub n_weekday: Option<u64>,
    pub n_future: Option<u64>,
    pub n_empty_1900: Option<u64>,
    pub n_empty_1970: Option<u64>,
    pub barchart: BarChart,
    pub frequent: FrequencyResult,
}

/// Text columns whose every non-missing value parses under some supported
/// style. When none qualify but text columns exist, all of them are
/// returned unparsed so a selection is still possible (the statistics then
/// degrade to N/A). No text columns at all yields an empty list.
pub fn detect_datetime_columns(table: &Table) -> Vec<String> {
    let text_cols: Vec<(&String, &Vec<Option<String>>)> = table
        .columns()
        .filter_map(|(name, col)| match col {
            Column::Text(values) => Some((name, values)),
            _ => None,
        })
        .collect();
    let parseable: Vec<String> = text_cols
        .iter()
        .filter(|(_, values)| {
            let mut any = false;
            for s in values.iter().flatten() {
                if parse_datetime(s).is_none() {
                    return false;
                }
                any = true;
            }
            any
        })
        .map(|(name, _)| (*name).clone())
        .collect();
    if parseable.is_empty() {
        text_cols.into_iter().map(|(name, _)| name.clone()).collect()
    } else {
        parseable
    }
}

/// All non-missing cells must parse for the coercion to hold; otherwise the
/// series stays raw.
fn coerce_to_datetime(values: &[Option<String>]) -> Option<Vec<Option<NaiveDateTime>>> {
    let mut parsed: Vec<Option<NaiveDateTime>> = Vec::with_capacity(values.len());
    let mut any = false;
    for cell in values {
        match cell {
            None => parsed.push(None),
            Some(s) => match parse_datetime(s) {
                Some(dt) => {
                    any = true;
                    parsed.push(Some(dt));
                }
                None => return None,
            },
        }
    }
    if any {
        Some(parsed)
    } else {
        None
    }
}

fn fmt_datetime(dt: &NaiveDateTime) -> String {
    if dt.time() == chrono::NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Profiles one column against a caller-supplied reference instant (the
/// "now" that future dates are counted against); see
/// [`profile_datetime_column_now`] for the wall-clock default.
pub fn profile_datetime_column(
    table: &Table,
    column: &str,
    top: usize,
    reference: NaiveDateTime,
) -> Result<DatetimeColumnProfile> {
    let col = table
        .column(column)
        .ok_or_else(|| CsvLensError::UnknownColumn(column.to_owned()))?;
    let raw = match col {
        Column::Text(values) => values.clone(),
        // numeric columns can still be selected through the fallback path;
        // treat their display form as the raw series
        _ => (0..col.len())
            .map(|row| {
                let s = col.cell_display(row);
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            })
            .collect(),
    };

    match coerce_to_datetime(&raw) {
        Some(serie) => Ok(profile_parsed(column, &serie, top, reference)),
        None => Ok(profile_unparsed(column, &raw, top)),
    }
}

/// Wall-clock convenience wrapper around [`profile_datetime_column`].
pub fn profile_datetime_column_now(
    table: &Table,
    column: &str,
    top: usize,
) -> Result<DatetimeColumnProfile> {
    profile_datetime_column(table, column, top, chrono::Local::now().naive_local())
}

fn profile_parsed(
    column: &str,
    serie: &[Option<NaiveDateTime>],
    top: usize,
    reference: NaiveDateTime,
) -> DatetimeColumnProfile {
    let values: Vec<NaiveDateTime> = serie.iter().flatten().copied().collect();
    let sentinel_1900 = NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid date");
    let sentinel_1970 = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");

    let empty = serie.is_empty();
    let n_unique = if empty {
        None
    } else {
        Some(values.iter().collect::<HashSet<_>>().len() as u64)
    };
    let n_missing = if empty {
        None
    } else {
        Some(serie.iter().filter(|c| c.is_none()).count() as u64)
    };
    let n_weekend = if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .filter(|dt| matches!(dt.weekday(), Weekday::Sat | Weekday::Sun))
                .count() as u64,
        )
    };
    let n_weekday = if values.is_empty() {
        None
    } else {
        Some(values.len() as u64 - n_weekend.unwrap_or(0))
    };
    let n_future = if values.is_empty() {
        None
    } else {
        Some(values.iter().filter(|dt| **dt > reference).count() as u64)
    };
    let n_empty_1900 = if values.is_empty() {
        None
    } else {
        Some(values.iter().filter(|dt| dt.date() == sentinel_1900).count() as u64)
    };
    let n_empty_1970 = if values.is_empty() {
        None
    } else {
        Some(values.iter().filter(|dt| dt.date() == sentinel_1970).count() as u64)
    };

    let mut freq = FrequencyCounter::new();
    for dt in &values {
        freq.add(fmt_datetime(dt));
    }

    DatetimeColumnProfile {
        column_name: column.to_owned(),
        is_valid_datetime: true,
        n_unique,
        n_missing,
        col_min: values.iter().min().copied(),
        col_max: values.iter().max().copied(),
        n_weekend,
        n_weekday,
        n_future,
        n_empty_1900,
        n_empty_1970,
        barchart: freq.bar_chart("date"),
        frequent: freq.top_n(top),
    }
}

/// Parse failed: unique/missing still come from the raw strings, every
/// temporal statistic is independently N/A.
fn profile_unparsed(
    column: &str,
    raw: &[Option<String>],
    top: usize,
) -> DatetimeColumnProfile {
    let empty = raw.is_empty();
    let n_unique = if empty {
        None
    } else {
        Some(raw.iter().flatten().collect::<HashSet<_>>().len() as u64)
    };
    let n_missing = if empty {
        None
    } else {
        Some(raw.iter().filter(|c| c.is_none()).count() as u64)
    };

    let mut freq = FrequencyCounter::new();
    for s in raw.iter().flatten() {
        freq.add(s.clone());
    }

    DatetimeColumnProfile {
        column_name: column.to_owned(),
        is_valid_datetime: false,
        n_unique,
        n_missing,
        col_min: None,
        col_max: None,
        n_weekend: None,
        n_weekday: None,
        n_future: None,
        n_empty_1900: None,
        n_empty_1970: None,
        barchart: freq.bar_chart("value"),
        frequent: freq.top_n(top),
    }
}

impl DatetimeColumnProfile {
    pub fn summary(&self) -> Summary {
        vec![
            entry("Number of Unique Values", SummaryValue::count(self.n_unique)),
            entry(
                "Number of Rows with Missing Values",
                SummaryValue::count(self.n_missing),
            ),
            entry(
                "Minimum Value",
                SummaryValue::text(self.col_min.as_ref().map(fmt_datetime)),
            ),
            entry(
                "Maximum Value",
                SummaryValue::text(self.col_max.as_ref().map(fmt_datetime)),
            ),
            entry(
                "Number of Weekend Dates",
                SummaryValue::count(self.n_weekend),
            ),
            entry(
                "Number of Weekday Dates",
                SummaryValue::count(self.n_weekday),
            ),
            entry("Number of Future Dates", SummaryValue::count(self.n_future)),
            entry(
                "Number of Rows with 1900-01-01",
                SummaryValue::count(self.n_empty_1900),
            ),
            entry(
                "Number of Rows with 1970-01-01",
                SummaryValue::count(self.n_empty_1970),
            ),
        ]
    }
}
