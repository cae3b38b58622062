pub mod csv_processor;
pub mod utils;

pub use csv_processor::{
    generate_csv, merge_columns, merge_csv_file, parse_csv, parse_csv_file, CsvDownload, CsvRow,
    CsvSource, CsvValue, ExportTable, FileSource, MemorySource, ParseOutcome,
};
pub use utils::{AppConfig, CsvImportError, Result, RowError};
