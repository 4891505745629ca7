pub mod export;
pub mod loader;
pub mod profile;
pub mod summary;
pub mod table;

pub use csv_lens_common::{Config, CsvLensError, Result};
pub use export::export_json;
pub use loader::{load_csv_bytes, load_csv_path, load_csv_reader};
pub use profile::{
    column_table, detect_datetime_columns, detect_numeric_columns, detect_text_columns, preview,
    profile_datetime_column, profile_datetime_column_now, profile_numeric_column,
    profile_text_column, BarChart, ColumnMeta, DatasetProfile, DatetimeColumnProfile,
    FrequencyEntry, FrequencyResult, HistogramBin, NumericColumnProfile, PreviewMode,
    TablePreview, TextColumnProfile,
};
pub use summary::{Summary, SummaryEntry, SummaryValue};
pub use table::{Column, ColumnType, Table};
