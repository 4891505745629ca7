use serde::{Deserialize, Serialize};

/// Declared scalar type of a column, resolved once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

/// Typed column storage. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Integer(_) => ColumnType::Integer,
            Column::Float(_) => ColumnType::Float,
            Column::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> u64 {
        match self {
            Column::Integer(v) => v.iter().filter(|c| c.is_none()).count() as u64,
            Column::Float(v) => v.iter().filter(|c| c.is_none()).count() as u64,
            Column::Text(v) => v.iter().filter(|c| c.is_none()).count() as u64,
        }
    }

    /// Display form of one cell; missing cells render empty.
    pub fn cell_display(&self, row: usize) -> String {
        match self {
            Column::Integer(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Float(v) => v[row].map(fmt_number).unwrap_or_default(),
            Column::Text(v) => v[row].clone().unwrap_or_default(),
        }
    }

    /// Estimated heap + inline footprint in bytes, index overhead excluded.
    pub fn memory_bytes(&self) -> u64 {
        match self {
            Column::Integer(v) => (v.len() * std::mem::size_of::<Option<i64>>()) as u64,
            Column::Float(v) => (v.len() * std::mem::size_of::<Option<f64>>()) as u64,
            Column::Text(v) => {
                let inline = v.len() * std::mem::size_of::<Option<String>>();
                let heap: usize = v.iter().flatten().map(|s| s.capacity()).sum();
                (inline + heap) as u64
            }
        }
    }
}

/// Ordered, named, equal-length columns. Read-only after load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Names must be unique and lengths must agree with
    /// the columns already present.
    pub fn push_column(&mut self, name: String, column: Column) -> csv_lens_common::Result<()> {
        if self.names.iter().any(|n| *n == name) {
            return Err(csv_lens_common::CsvLensError::Other(format!(
                "duplicate column name: {name}"
            )));
        }
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(csv_lens_common::CsvLensError::Other(format!(
                "column {name} has {} rows, expected {}",
                column.len(),
                self.row_count
            )));
        }
        self.row_count = column.len();
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &Column)> {
        self.names.iter().zip(self.columns.iter())
    }
}

/// Formats a float the way the source data reads: integral values lose the
/// trailing ".0", everything else keeps its native representation.
pub fn fmt_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
