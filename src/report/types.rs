//! Report type definitions for the rendering model.
//!
//! This module defines the format-agnostic table that every domain adapter produces and
//! every renderer consumes: ordered columns, ordered rows of pre-formatted display values,
//! plus the artifact handed back to the caller.

use crate::error::ReportError;
use crate::format::{self, PLACEHOLDER};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Value kind of a column.
///
/// Governs alignment in the document renderer and typed cells in the spreadsheet renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Date,
    DateTime,
    Boolean,
    Number,
    Currency,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Date => "date",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Number => "number",
            ColumnKind::Currency => "currency",
        }
    }

    /// Numeric kinds are right-aligned in layout-aware renderers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Number | ColumnKind::Currency)
    }
}

/// One column of the report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportColumn {
    /// Stable identifier matching a key in every row
    pub key: String,
    /// Column title shown to the reader
    pub header: String,
    pub kind: ColumnKind,
    /// Relative width hint (document and spreadsheet renderers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Decimal places numeric cells were formatted with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
}

impl ReportColumn {
    pub fn new(key: &str, header: &str, kind: ColumnKind) -> Self {
        Self { key: key.to_string(), header: header.to_string(), kind, width: None, precision: None }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Width hint, defaulting to 1.0 for columns without one.
    pub fn width_hint(&self) -> f32 {
        match self.width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }

    /// Effective decimal places for numeric display.
    pub fn display_precision(&self) -> usize {
        match (self.precision, self.kind) {
            (Some(p), _) => p,
            (None, ColumnKind::Currency) => 2,
            (None, _) => 0,
        }
    }
}

/// A single display value.
///
/// Adapters normally emit `Text` (already formatted); `Number` and `Boolean` are accepted for
/// callers assembling a report by hand and are formatted through the column's rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl CellValue {
    /// Display form of this value under the given column.
    pub fn display(&self, column: &ReportColumn) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if column.kind == ColumnKind::Currency => format::format_currency(Some(*n)),
            CellValue::Number(n) => format::format_number(Some(*n), column.display_precision()),
            CellValue::Boolean(b) => format::format_boolean(Some(*b)),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

/// One row: column key → display value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportRow {
    cells: BTreeMap<String, CellValue>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<CellValue>) {
        self.cells.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<CellValue> {
        self.cells.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The format-agnostic report produced by a domain adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub title: String,
    pub subtitle: Option<String>,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ReportRow>,
    /// Stamped by the generator only; adapters leave it `None`.
    pub generated_at: Option<DateTime<Local>>,
}

impl ReportData {
    pub fn new(title: &str, columns: Vec<ReportColumn>) -> Self {
        Self { title: title.to_string(), subtitle: None, columns, rows: Vec::new(), generated_at: None }
    }

    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn push_row(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, key: &str) -> Option<&ReportColumn> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Display strings of a row in column order.
    ///
    /// Renderers call this after shape validation, so a missing key cannot occur there; it
    /// still degrades to the placeholder rather than panicking.
    pub fn display_row(&self, row: &ReportRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|col| row.get(&col.key).map(|v| v.display(col)).unwrap_or_else(|| PLACEHOLDER.to_string()))
            .collect()
    }

    /// Generation timestamp for headers, or the placeholder when not stamped.
    pub fn generated_at_display(&self) -> String {
        format::format_datetime(self.generated_at.map(|dt| dt.naive_local()))
    }
}

/// Output formats known to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Paginated PDF document
    Document,
    /// XLSX workbook with typed cells
    Spreadsheet,
    /// Comma-separated text
    DelimitedText,
    /// Tab-separated text
    TabSeparated,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 5] = [
        ReportFormat::Document,
        ReportFormat::Spreadsheet,
        ReportFormat::DelimitedText,
        ReportFormat::TabSeparated,
        ReportFormat::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Document => "pdf",
            ReportFormat::Spreadsheet => "xlsx",
            ReportFormat::DelimitedText => "csv",
            ReportFormat::TabSeparated => "tsv",
            ReportFormat::Json => "json",
        }
    }

    /// File extension for artifacts of this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Document => "application/pdf",
            ReportFormat::Spreadsheet => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ReportFormat::DelimitedText => "text/csv; charset=utf-8",
            ReportFormat::TabSeparated => "text/tab-separated-values; charset=utf-8",
            ReportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "document" | "pdf-like-document" => Ok(ReportFormat::Document),
            "xlsx" | "spreadsheet" | "excel" => Ok(ReportFormat::Spreadsheet),
            "csv" | "delimited-text" | "delimited" => Ok(ReportFormat::DelimitedText),
            "tsv" | "tab-separated" => Ok(ReportFormat::TabSeparated),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Non-fatal conditions reported alongside an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWarning {
    /// The report has headers but no rows
    EmptyDataset,
}

impl ReportWarning {
    pub fn message(&self) -> &'static str {
        match self {
            ReportWarning::EmptyDataset => "El informe no contiene registros",
        }
    }
}

/// Downloadable output of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    /// Suggested download name including extension
    pub filename: String,
    /// MIME type
    pub content_type: String,
    pub warnings: Vec<ReportWarning>,
}

impl Artifact {
    pub fn new(bytes: Vec<u8>, filename: String, format: ReportFormat) -> Self {
        Self { bytes, filename, content_type: format.content_type().to_string(), warnings: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("id", "ID", ColumnKind::Text),
            ReportColumn::new("horas", "Horómetro", ColumnKind::Number).with_precision(1),
            ReportColumn::new("costo", "Costo", ColumnKind::Currency),
            ReportColumn::new("ok", "Aprobada", ColumnKind::Boolean),
        ]
    }

    #[test]
    fn test_format_parse_aliases() {
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::Document);
        assert_eq!("Spreadsheet".parse::<ReportFormat>().unwrap(), ReportFormat::Spreadsheet);
        assert_eq!("delimited-text".parse::<ReportFormat>().unwrap(), ReportFormat::DelimitedText);
        assert_eq!(" tsv ".parse::<ReportFormat>().unwrap(), ReportFormat::TabSeparated);
        assert!(matches!("docx".parse::<ReportFormat>(), Err(ReportError::UnsupportedFormat(f)) if f == "docx"));
    }

    #[test]
    fn test_format_round_trips_through_as_str() {
        for format in ReportFormat::ALL {
            assert_eq!(format.as_str().parse::<ReportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_width_hint_defaults() {
        let col = ReportColumn::new("a", "A", ColumnKind::Text);
        assert_eq!(col.width_hint(), 1.0);
        assert_eq!(col.clone().with_width(2.5).width_hint(), 2.5);
        assert_eq!(col.with_width(-1.0).width_hint(), 1.0);
    }

    #[test]
    fn test_display_row_in_column_order() {
        let columns = sample_columns();
        let data = ReportData::new("Prueba", columns);
        let row = ReportRow::new().with("ok", true).with("costo", 1500.0).with("horas", 1234.56).with("id", "V1");

        assert_eq!(data.display_row(&row), vec!["V1", "1.234,6", "$ 1.500,00", "Sí"]);
    }

    #[test]
    fn test_display_row_missing_key_degrades_to_placeholder() {
        let data = ReportData::new("Prueba", sample_columns());
        let row = ReportRow::new().with("id", "V1");
        let shown = data.display_row(&row);
        assert_eq!(shown[0], "V1");
        assert!(shown[1..].iter().all(|s| s == PLACEHOLDER));
    }

    #[test]
    fn test_generated_at_display_unstamped() {
        let data = ReportData::new("Prueba", sample_columns());
        assert_eq!(data.generated_at_display(), PLACEHOLDER);
    }
}
