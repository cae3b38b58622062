use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("No lines found in the CSV file")]
    NoDataLines,

    #[error("No column names found in the CSV header")]
    EmptyHeader,

    #[error("Required column '{0}' not found in the CSV header")]
    MissingRequiredColumn(String),

    #[error("File must be a CSV file: {0}")]
    InvalidExtension(String),

    #[error("Failed to read CSV file: {0}")]
    SourceRead(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CsvImportError {
    /// True for failures caused by the shape of the CSV text itself.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CsvImportError::NoDataLines
                | CsvImportError::EmptyHeader
                | CsvImportError::MissingRequiredColumn(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CsvImportError>;

/// Reason a single data row was dropped. Never aborts a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Empty row found in the CSV file")]
    EmptyRow,

    #[error("Required value '{0}' missing in the CSV row")]
    MissingRequiredValue(String),
}
