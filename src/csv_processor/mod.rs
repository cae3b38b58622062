pub mod header;
pub mod merge;
pub mod reader;
pub mod row;
pub mod tokenizer;
pub mod writer;

pub use header::{ColumnRole, HeaderLayout, OUTSIDE_CONTENT_ROLES, REQUIRED_ROLES};
pub use merge::{merge_columns, merge_csv_file, MergedCsv};
pub use reader::{
    is_valid_csv_file, parse_csv, parse_csv_file, read_csv_source, CsvSource, FileSource,
    MemorySource, ParseOutcome, SkippedRow,
};
pub use row::{assemble_row, CsvRow, CONTENT_SEPARATOR};
pub use tokenizer::parse_csv_line;
pub use writer::{escape_csv_value, generate_csv, CsvDownload, CsvValue, ExportTable};
