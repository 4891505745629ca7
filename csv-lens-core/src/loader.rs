use crate::table::{Column, Table};
use csv_lens_common::Result;
use std::io::Read;
use std::path::Path;

/// Cell values equal to one of these markers load as missing.
const NULL_MARKERS: &[&str] = &["", "NA", "N/A", "null", "NULL", "NaN", "nan"];

/// Loads a CSV byte source into a typed [`Table`]. The first record is the
/// header row. Per-column type inference over the raw values: all non-null
/// cells parse as i64 -> Integer, else all parse as f64 -> Float, else Text.
pub fn load_csv_bytes(bytes: &[u8]) -> Result<Table> {
    load_csv_reader(bytes)
}

pub fn load_csv_path(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    load_csv_reader(file)
}

pub fn load_csv_reader<R: Read>(rdr: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(rdr);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.trim_start_matches('\u{feff}').to_owned()
            } else {
                name.to_owned()
            }
        })
        .collect();
    // a zero-byte source yields an empty header record
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(Table::new());
    }

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            let cell = if is_null_marker(field) {
                None
            } else {
                Some(field.to_owned())
            };
            raw_columns[idx].push(cell);
        }
    }

    let mut table = Table::new();
    for (name, raw) in headers.into_iter().zip(raw_columns) {
        table.push_column(name, infer_column(raw))?;
    }
    Ok(table)
}

fn is_null_marker(field: &str) -> bool {
    NULL_MARKERS.contains(&field)
}

/// Integer -> Float -> Text inference ladder over one raw column.
fn infer_column(raw: Vec<Option<String>>) -> Column {
    let mut any_value = false;
    let mut all_int = true;
    let mut all_float = true;
    for cell in raw.iter().flatten() {
        any_value = true;
        let s = cell.trim();
        if all_int && s.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && s.parse::<f64>().is_err() {
            all_float = false;
        }
        if !all_int && !all_float {
            break;
        }
    }
    // an all-missing column carries no type evidence; keep it text
    if !any_value {
        return Column::Text(raw);
    }
    if all_int {
        Column::Integer(
            raw.into_iter()
                .map(|c| c.map(|s| s.trim().parse::<i64>().expect("checked integer")))
                .collect(),
        )
    } else if all_float {
        Column::Float(
            raw.into_iter()
                .map(|c| c.map(|s| s.trim().parse::<f64>().expect("checked float")))
                .collect(),
        )
    } else {
        Column::Text(raw)
    }
}
