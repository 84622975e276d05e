//! Tabular export of the filtered and sorted dataset.
//!
//! Exports always cover every row the current filters match, in the current
//! sort order, regardless of which page or window is on screen.

mod sink;

pub use sink::*;

use chrono::Utc;
use csv::QuoteStyle;
use csv::Terminator;
use csv::WriterBuilder;
use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;
use crate::error::Result;
use crate::model::ColumnEntry;
use crate::model::GridRecord;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(GridError::Config(format!("unknown export format '{}'", other))),
        }
    }
}

/// A generated export, ready to hand to an [`ExportSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// `table-export-<unix-ms>.<ext>`
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    /// Number of exported records (excluding the CSV header).
    pub row_count: usize,
}

/// Export filename for a timestamp in unix milliseconds.
pub fn export_filename(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("table-export-{}.{}", timestamp_ms, format.extension())
}

/// Serialize rows to CSV.
///
/// The header row holds column titles. Each cell is resolved and stringified
/// exactly as filtering sees it. Every field is quoted and embedded quotes are
/// doubled.
pub fn to_csv<T: GridRecord>(
    columns: &[&ColumnEntry<T>],
    rows: &[T],
    indices: &[usize],
) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.title()))?;
    for &index in indices {
        let row = &rows[index];
        let cells = columns
            .iter()
            .map(|c| c.resolve(row, index).map(|v| v.to_filter_string()))
            .collect::<Result<Vec<_>>>()?;
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| GridError::Io(e.into_error()))
}

/// Serialize the raw rows to a pretty-printed JSON array.
pub fn to_json<T: Serialize>(rows: &[T], indices: &[usize]) -> Result<Vec<u8>> {
    let selected: Vec<&T> = indices.iter().map(|&i| &rows[i]).collect();
    Ok(serde_json::to_vec_pretty(&selected)?)
}

/// Build an export file for the given rows.
pub fn export_rows<T: GridRecord + Serialize>(
    format: ExportFormat,
    columns: &[&ColumnEntry<T>],
    rows: &[T],
    indices: &[usize],
    timestamp_ms: i64,
) -> Result<ExportFile> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(columns, rows, indices)?,
        ExportFormat::Json => to_json(rows, indices)?,
    };
    let file = ExportFile {
        filename: export_filename(format, timestamp_ms),
        mime_type: format.mime_type(),
        bytes,
        row_count: indices.len(),
    };
    log::debug!("exported {} rows to {}", file.row_count, file.filename);
    Ok(file)
}

/// Current time in unix milliseconds, for export filenames.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
