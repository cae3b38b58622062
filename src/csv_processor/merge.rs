use crate::csv_processor::reader::{parse_csv, read_csv_source, CsvSource, SkippedRow};
use crate::csv_processor::row::CsvRow;
use crate::csv_processor::writer::{generate_csv, CsvValue};
use crate::utils::Result;

pub const MERGED_HEADERS: [&str; 3] = ["name", "content", "type"];

/// A CSV document where every non-role column has been folded into `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCsv {
    pub csv: String,
    pub row_count: usize,
    pub skipped: Vec<SkippedRow>,
}

pub fn merge_columns(text: &str) -> Result<MergedCsv> {
    let outcome = parse_csv(text)?;
    let rows: Vec<Vec<CsvValue>> = outcome.rows.iter().map(merged_row).collect();

    Ok(MergedCsv {
        csv: generate_csv(&MERGED_HEADERS, &rows),
        row_count: rows.len(),
        skipped: outcome.skipped,
    })
}

pub async fn merge_csv_file<S: CsvSource>(source: &S) -> Result<MergedCsv> {
    let text = read_csv_source(source).await?;
    merge_columns(&text)
}

fn merged_row(row: &CsvRow) -> Vec<CsvValue> {
    vec![
        row.name.as_str().into(),
        row.content.as_str().into(),
        row.kind.as_str().into(),
    ]
}
