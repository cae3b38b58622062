pub mod config;
pub mod errors;

pub use config::{AppConfig, ExportConfig, LoggingConfig};
pub use errors::{CsvImportError, Result, RowError};
