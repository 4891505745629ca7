use crate::summary::{entry, Summary, SummaryValue};
use crate::table::{Column, Table};
use rand::seq::index::sample as index_sample;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

/// Whole-table shape/quality summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub n_rows: u64,
    pub n_cols: u64,
    pub n_duplicates: u64,
    pub n_missing: u64,
    pub n_num_cols: u64,
    pub n_text_cols: u64,
}

impl DatasetProfile {
    pub fn from_table(table: &Table) -> Self {
        let n_missing = table.columns().map(|(_, c)| c.missing_count()).sum();
        let n_num_cols = table
            .columns()
            .filter(|(_, c)| c.column_type().is_numeric())
            .count() as u64;
        let n_text_cols = table.column_count() as u64 - n_num_cols;
        Self {
            n_rows: table.row_count() as u64,
            n_cols: table.column_count() as u64,
            n_duplicates: count_duplicate_rows(table),
            n_missing,
            n_num_cols,
            n_text_cols,
        }
    }

    pub fn summary(&self) -> Summary {
        vec![
            entry("Number of Rows", SummaryValue::Count(self.n_rows)),
            entry("Number of Columns", SummaryValue::Count(self.n_cols)),
            entry("Duplicated Rows", SummaryValue::Count(self.n_duplicates)),
            entry("Missing Values", SummaryValue::Count(self.n_missing)),
            entry("Numeric Columns", SummaryValue::Count(self.n_num_cols)),
            entry("Text Columns", SummaryValue::Count(self.n_text_cols)),
        ]
    }
}

/// Fingerprint a full row across all columns. Missing cells contribute a
/// marker byte so (1, null) and (1, "") hash differently; a separator keeps
/// ("ab","c") and ("a","bc") apart.
fn hash_row(table: &Table, row: usize) -> u64 {
    let mut row_bytes = Vec::new();
    for (_, col) in table.columns() {
        match col {
            Column::Integer(v) => match v[row] {
                Some(x) => row_bytes.extend_from_slice(&x.to_le_bytes()),
                None => row_bytes.push(0xFF),
            },
            Column::Float(v) => match v[row] {
                Some(x) => row_bytes.extend_from_slice(&x.to_le_bytes()),
                None => row_bytes.push(0xFF),
            },
            Column::Text(v) => match &v[row] {
                Some(s) => row_bytes.extend_from_slice(s.as_bytes()),
                None => row_bytes.push(0xFF),
            },
        }
        row_bytes.push(0x1E);
    }
    xxh3_64(&row_bytes)
}

/// Exact count of rows equal to an earlier row across every column.
fn count_duplicate_rows(table: &Table) -> u64 {
    let mut seen: HashSet<u64> = HashSet::with_capacity(table.row_count());
    let mut dups = 0u64;
    for row in 0..table.row_count() {
        if !seen.insert(hash_row(table, row)) {
            dups += 1;
        }
    }
    dups
}

/// One row of the column-metadata table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub dtype: String,
    pub memory_bytes: u64,
}

pub fn column_table(table: &Table) -> Vec<ColumnMeta> {
    table
        .columns()
        .map(|(name, col)| ColumnMeta {
            name: name.clone(),
            dtype: col.column_type().as_str().to_owned(),
            memory_bytes: col.memory_bytes(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    Head,
    Tail,
    Sample,
}

/// A rendered slice of the table for head/tail/sample views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// First n / last n / n uniformly sampled rows (without replacement, no
/// fixed seed). `None` when the table is empty, or when a sample asks for
/// more rows than exist; head and tail clamp instead.
pub fn preview(table: &Table, mode: PreviewMode, n: usize) -> Option<TablePreview> {
    if table.is_empty() {
        return None;
    }
    let rows = table.row_count();
    let indices: Vec<usize> = match mode {
        PreviewMode::Head => (0..n.min(rows)).collect(),
        PreviewMode::Tail => (rows.saturating_sub(n)..rows).collect(),
        PreviewMode::Sample => {
            if n > rows {
                return None;
            }
            let mut picked = index_sample(&mut rand::thread_rng(), rows, n).into_vec();
            picked.sort_unstable();
            picked
        }
    };
    let columns: Vec<String> = table.column_names().to_vec();
    let rendered = indices
        .into_iter()
        .map(|row| {
            table
                .columns()
                .map(|(_, col)| col.cell_display(row))
                .collect()
        })
        .collect();
    Some(TablePreview {
        columns,
        rows: rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv_bytes;

    fn fixture() -> Table {
        load_csv_bytes(b"id,name,score\n1,alice,3.5\n2,bob,4.0\n2,bob,4.0\n3,,1.0\n").unwrap()
    }

    #[test]
    fn profile_counts_shape_and_quality() {
        let p = DatasetProfile::from_table(&fixture());
        assert_eq!(p.n_rows, 4);
        assert_eq!(p.n_cols, 3);
        assert_eq!(p.n_duplicates, 1);
        assert_eq!(p.n_missing, 1);
        assert_eq!(p.n_num_cols, 2);
        assert_eq!(p.n_text_cols, 1);
    }

    #[test]
    fn summary_order_is_fixed() {
        let labels: Vec<String> = DatasetProfile::from_table(&fixture())
            .summary()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(
            labels,
            [
                "Number of Rows",
                "Number of Columns",
                "Duplicated Rows",
                "Missing Values",
                "Numeric Columns",
                "Text Columns"
            ]
        );
    }

    #[test]
    fn missing_and_empty_text_are_distinct_rows() {
        let table = load_csv_bytes(b"a,b\n1,x\n1,\n").unwrap();
        // (1, null) is not a duplicate of (1, "x")
        assert_eq!(DatasetProfile::from_table(&table).n_duplicates, 0);
    }

    #[test]
    fn empty_table_profile_is_all_zero() {
        let table = Table::new();
        let p = DatasetProfile::from_table(&table);
        assert_eq!(p.n_rows, 0);
        assert_eq!(p.n_cols, 0);
        assert_eq!(p.n_duplicates, 0);
        assert!(column_table(&table).is_empty());
    }

    #[test]
    fn head_and_tail_clamp() {
        let table = fixture();
        let head = preview(&table, PreviewMode::Head, 2).unwrap();
        assert_eq!(head.rows.len(), 2);
        assert_eq!(head.rows[0][0], "1");
        let tail = preview(&table, PreviewMode::Tail, 10).unwrap();
        assert_eq!(tail.rows.len(), 4);
        assert_eq!(tail.rows[3][0], "3");
    }

    #[test]
    fn sample_refuses_oversized_draws() {
        let table = fixture();
        assert!(preview(&table, PreviewMode::Sample, 5).is_none());
        let s = preview(&table, PreviewMode::Sample, 3).unwrap();
        assert_eq!(s.rows.len(), 3);
    }

    #[test]
    fn preview_of_empty_table_is_none() {
        assert!(preview(&Table::new(), PreviewMode::Head, 5).is_none());
    }

    #[test]
    fn column_table_lists_every_column() {
        let meta = column_table(&fixture());
        assert_eq!(meta.len(), 3);
        assert_eq!(meta[0].name, "id");
        assert_eq!(meta[0].dtype, "integer");
        assert!(meta.iter().all(|m| m.memory_bytes > 0));
    }
}
