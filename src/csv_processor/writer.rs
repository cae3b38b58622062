use crate::utils::Result;
use serde::Deserialize;
use serde_json::{Number, Value as JsonValue};
use std::path::{Path, PathBuf};

pub const CSV_DELIMITER: char = ',';
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single cell value accepted by the CSV generator.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Null,
    Text(String),
    Number(Number),
    Bool(bool),
    /// Arrays and objects, written as compact JSON.
    Structured(JsonValue),
}

impl CsvValue {
    pub fn render(&self) -> String {
        match self {
            CsvValue::Null => String::new(),
            CsvValue::Text(s) => s.clone(),
            CsvValue::Number(n) => n.to_string(),
            CsvValue::Bool(b) => b.to_string(),
            CsvValue::Structured(v) => v.to_string(),
        }
    }
}

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::Text(value.to_string())
    }
}

impl From<String> for CsvValue {
    fn from(value: String) -> Self {
        CsvValue::Text(value)
    }
}

impl From<bool> for CsvValue {
    fn from(value: bool) -> Self {
        CsvValue::Bool(value)
    }
}

impl From<i64> for CsvValue {
    fn from(value: i64) -> Self {
        CsvValue::Number(value.into())
    }
}

impl From<u64> for CsvValue {
    fn from(value: u64) -> Self {
        CsvValue::Number(value.into())
    }
}

impl From<i32> for CsvValue {
    fn from(value: i32) -> Self {
        CsvValue::Number(value.into())
    }
}

impl From<f64> for CsvValue {
    fn from(value: f64) -> Self {
        // whole numbers render without a trailing `.0`
        if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
            return CsvValue::Number((value as i64).into());
        }
        if value.is_infinite() {
            let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
            return CsvValue::Text(text.to_string());
        }
        Number::from_f64(value)
            .map(CsvValue::Number)
            .unwrap_or_else(|| CsvValue::Text(value.to_string()))
    }
}

impl<T: Into<CsvValue>> From<Option<T>> for CsvValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CsvValue::Null)
    }
}

impl From<JsonValue> for CsvValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CsvValue::Null,
            JsonValue::String(s) => CsvValue::Text(s),
            JsonValue::Number(n) => CsvValue::Number(n),
            JsonValue::Bool(b) => CsvValue::Bool(b),
            structured @ (JsonValue::Array(_) | JsonValue::Object(_)) => {
                CsvValue::Structured(structured)
            }
        }
    }
}

pub fn escape_csv_value(value: &CsvValue) -> String {
    escape_field(&value.render())
}

fn escape_field(field: &str) -> String {
    if field.contains(CSV_DELIMITER) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders a header row followed by data rows, joined with `\n` and no trailing newline.
pub fn generate_csv<H: AsRef<str>>(headers: &[H], rows: &[Vec<CsvValue>]) -> String {
    let delimiter = CSV_DELIMITER.to_string();
    let header_line = headers
        .iter()
        .map(|h| escape_field(h.as_ref()))
        .collect::<Vec<_>>()
        .join(&delimiter);

    std::iter::once(header_line)
        .chain(rows.iter().map(|row| {
            row.iter()
                .map(escape_csv_value)
                .collect::<Vec<_>>()
                .join(&delimiter)
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tabular data as accepted by the `export` command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<JsonValue>>,
}

impl ExportTable {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_csv(&self) -> String {
        let rows: Vec<Vec<CsvValue>> = self
            .rows
            .iter()
            .map(|row| row.iter().cloned().map(CsvValue::from).collect())
            .collect();
        generate_csv(self.headers.as_slice(), &rows)
    }
}

/// A finished document ready to be handed out as `<stem>.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl CsvDownload {
    pub fn new(contents: impl Into<String>, stem: &str) -> Self {
        Self {
            file_name: format!("{}.csv", stem),
            mime_type: CSV_MIME_TYPE,
            contents: contents.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, self.contents.as_bytes()).await?;
        tracing::info!("Wrote {} bytes to {}", self.len(), path.display());
        Ok(path)
    }
}
