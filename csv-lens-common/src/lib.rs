pub mod config;
pub use config::Config;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CsvLensError>;
