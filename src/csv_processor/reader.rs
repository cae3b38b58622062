use crate::csv_processor::header::HeaderLayout;
use crate::csv_processor::row::{assemble_row, CsvRow};
use crate::utils::{CsvImportError, Result, RowError};
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};

pub const CSV_EXTENSION: &str = ".csv";

/// A data line that was dropped during a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input, header included.
    pub line_number: usize,
    #[serde(serialize_with = "serialize_row_error")]
    pub error: RowError,
}

fn serialize_row_error<S: serde::Serializer>(
    error: &RowError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub rows: Vec<CsvRow>,
    pub skipped: Vec<SkippedRow>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Byte-order mark written at the start of files by spreadsheet exports.
const BOM: char = '\u{feff}';

pub fn parse_csv(text: &str) -> Result<ParseOutcome> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == BOM);
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Err(CsvImportError::NoDataLines);
    }

    let layout = HeaderLayout::resolve(lines[0])?;
    tracing::debug!(
        "Resolved CSV header with {} columns: {:?}",
        layout.column_count(),
        layout.columns()
    );

    let (rows, skipped) = lines
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, line)| (index + 1, assemble_row(&layout, line)))
        .fold(
            (Vec::new(), Vec::new()),
            |(mut rows, mut skipped), (line_number, result)| {
                match result {
                    Ok(row) => rows.push(row),
                    Err(error) => {
                        tracing::warn!("Failed to process CSV row {}: {}", line_number, error);
                        skipped.push(SkippedRow { line_number, error });
                    }
                }
                (rows, skipped)
            },
        );

    tracing::debug!(
        "Parsed {} CSV rows, skipped {}",
        rows.len(),
        skipped.len()
    );

    Ok(ParseOutcome { rows, skipped })
}

/// A named resource whose whole text can be read in one step.
pub trait CsvSource {
    fn name(&self) -> &str;

    fn read_text(&self) -> impl Future<Output = std::io::Result<String>> + Send;
}

pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CsvSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> impl Future<Output = std::io::Result<String>> + Send {
        tokio::fs::read_to_string(self.path.clone())
    }
}

/// Bytes already held in memory, such as an uploaded request body.
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl CsvSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> impl Future<Output = std::io::Result<String>> + Send {
        let decoded = String::from_utf8(self.bytes.clone())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        std::future::ready(decoded)
    }
}

pub fn is_valid_csv_file(name: &str) -> bool {
    name.ends_with(CSV_EXTENSION)
}

/// Checks the extension, then reads the whole source in one step.
pub async fn read_csv_source<S: CsvSource>(source: &S) -> Result<String> {
    if !is_valid_csv_file(source.name()) {
        return Err(CsvImportError::InvalidExtension(source.name().to_string()));
    }

    source
        .read_text()
        .await
        .map_err(|e| CsvImportError::SourceRead(e.to_string()))
}

pub async fn parse_csv_file<S: CsvSource>(source: &S) -> Result<ParseOutcome> {
    let text = read_csv_source(source).await?;

    let outcome = parse_csv(&text)?;
    tracing::info!(
        "Imported {} rows from {} ({} skipped)",
        outcome.rows.len(),
        source.name(),
        outcome.skipped.len()
    );
    Ok(outcome)
}
