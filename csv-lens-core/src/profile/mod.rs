pub mod dataset;
pub mod datetime;
pub mod frequency;
pub mod histogram;
pub mod numeric;
pub mod text;

pub use dataset::{column_table, preview, ColumnMeta, DatasetProfile, PreviewMode, TablePreview};
pub use datetime::{
    detect_datetime_columns, profile_datetime_column, profile_datetime_column_now,
    DatetimeColumnProfile,
};
pub use frequency::{BarChart, BarEntry, FrequencyCounter, FrequencyEntry, FrequencyResult};
pub use histogram::{build_histogram, sturges_bins, HistogramBin};
pub use numeric::{detect_numeric_columns, profile_numeric_column, NumericColumnProfile};
pub use text::{detect_text_columns, profile_text_column, TextColumnProfile};
