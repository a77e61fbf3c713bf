//! Spreadsheet renderer (XLSX).
//!
//! One worksheet: title block, bold header row, one row per report row. Date, timestamp and
//! numeric columns are written as typed cells whose number format reproduces the display
//! string, so native sorting and filtering work; anything that does not parse back (the
//! placeholder, free text) is written as a text cell.

use super::{Renderer, artifact_filename, validate_shape};
use crate::error::{ReportError, Result};
use crate::format::{self, PLACEHOLDER};
use crate::report::types::{Artifact, CellValue, ColumnKind, ReportColumn, ReportData, ReportFormat};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

const TITLE_ROW: u32 = 0;
const SUBTITLE_ROW: u32 = 1;
const GENERATED_ROW: u32 = 2;
const HEADER_ROW: u32 = 4;
const FIRST_DATA_ROW: u32 = HEADER_ROW + 1;

/// Excel column width (in characters) for a width hint of 1.0
const BASE_COLUMN_WIDTH: f64 = 14.0;
const MAX_SHEET_NAME: usize = 31;

/// A cell value after re-deriving its native type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedCell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Decide how a value is stored, based on its column kind.
pub fn typed_cell(column: &ReportColumn, value: &CellValue) -> TypedCell {
    let shown = value.display(column);
    let typed = match (column.kind, value) {
        (ColumnKind::Number | ColumnKind::Currency, CellValue::Number(n)) if n.is_finite() => {
            Some(TypedCell::Number(*n))
        }
        (ColumnKind::Number | ColumnKind::Currency, CellValue::Text(s)) => {
            format::parse_display_number(s).map(TypedCell::Number)
        }
        (ColumnKind::Date, CellValue::Text(s)) => format::parse_display_date(s).map(TypedCell::Date),
        (ColumnKind::DateTime, CellValue::Text(s)) => format::parse_display_datetime(s).map(TypedCell::DateTime),
        _ => None,
    };
    typed.unwrap_or(TypedCell::Text(shown))
}

/// Make a title usable as a worksheet name.
///
/// Excel forbids `[ ] : * ? / \`, leading/trailing apostrophes and names over 31 characters.
pub fn sanitize_sheet_name(title: &str) -> String {
    let cleaned: String =
        title.chars().filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\')).take(MAX_SHEET_NAME).collect();
    let trimmed = cleaned.trim().trim_matches('\'').trim();
    if trimmed.is_empty() { "Informe".to_string() } else { trimmed.to_string() }
}

/// Number format matching [`format::format_number`] at the given precision.
fn number_format(column: &ReportColumn) -> String {
    let precision = column.display_precision();
    let mut pattern = String::from("#,##0");
    if precision > 0 {
        pattern.push('.');
        pattern.push_str(&"0".repeat(precision));
    }
    if column.kind == ColumnKind::Currency { format!("\"$\" {}", pattern) } else { pattern }
}

fn xlsx_err(e: XlsxError) -> ReportError {
    ReportError::render("xlsx", e)
}

/// Cell formats shared by the whole sheet.
struct SheetFormats {
    title: Format,
    meta: Format,
    header: Format,
    text: Format,
    date: Format,
    datetime: Format,
    /// Per-column numeric formats (index = column position)
    numbers: Vec<Format>,
}

impl SheetFormats {
    fn new(columns: &[ReportColumn]) -> Self {
        let cell = Format::new().set_border(FormatBorder::Thin);
        Self {
            title: Format::new().set_bold().set_font_size(14),
            meta: Format::new().set_italic().set_font_color(Color::RGB(0x595959)),
            header: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_background_color(Color::RGB(0xD9E1F2))
                .set_align(FormatAlign::Center),
            text: cell.clone(),
            date: cell.clone().set_num_format("dd/mm/yyyy"),
            datetime: cell.clone().set_num_format("dd/mm/yyyy hh:mm"),
            numbers: columns
                .iter()
                .map(|c| cell.clone().set_num_format(number_format(c)).set_align(FormatAlign::Right))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpreadsheetRenderer;

impl SpreadsheetRenderer {
    pub fn new() -> Self {
        SpreadsheetRenderer
    }

    fn write_sheet(&self, sheet: &mut Worksheet, data: &ReportData) -> std::result::Result<(), XlsxError> {
        let formats = SheetFormats::new(&data.columns);

        sheet.set_name(sanitize_sheet_name(&data.title))?;
        sheet.write_string_with_format(TITLE_ROW, 0, &data.title, &formats.title)?;
        if let Some(subtitle) = &data.subtitle {
            sheet.write_string_with_format(SUBTITLE_ROW, 0, subtitle, &formats.meta)?;
        }
        sheet.write_string_with_format(
            GENERATED_ROW,
            0,
            format!("Generado: {}", data.generated_at_display()),
            &formats.meta,
        )?;

        for (col_idx, column) in data.columns.iter().enumerate() {
            let col = col_idx as u16;
            sheet.set_column_width(col, BASE_COLUMN_WIDTH * column.width_hint() as f64)?;
            sheet.write_string_with_format(HEADER_ROW, col, &column.header, &formats.header)?;
        }

        for (row_idx, row) in data.rows.iter().enumerate() {
            let xl_row = FIRST_DATA_ROW + row_idx as u32;
            for (col_idx, column) in data.columns.iter().enumerate() {
                let col = col_idx as u16;
                let value = row.get(&column.key).cloned().unwrap_or_else(|| CellValue::from(PLACEHOLDER));
                match typed_cell(column, &value) {
                    TypedCell::Text(s) => {
                        sheet.write_string_with_format(xl_row, col, s, &formats.text)?;
                    }
                    TypedCell::Number(n) => {
                        sheet.write_number_with_format(xl_row, col, n, &formats.numbers[col_idx])?;
                    }
                    TypedCell::Date(d) => {
                        sheet.write_datetime_with_format(xl_row, col, &d, &formats.date)?;
                    }
                    TypedCell::DateTime(dt) => {
                        sheet.write_datetime_with_format(xl_row, col, &dt, &formats.datetime)?;
                    }
                }
            }
        }

        if !data.columns.is_empty() {
            let last_col = (data.columns.len() - 1) as u16;
            let last_row = HEADER_ROW + data.rows.len() as u32;
            sheet.autofilter(HEADER_ROW, 0, last_row, last_col)?;
            sheet.set_freeze_panes(FIRST_DATA_ROW, 0)?;
        }

        Ok(())
    }
}

impl Renderer for SpreadsheetRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Spreadsheet
    }

    fn render(&self, data: &ReportData) -> Result<Artifact> {
        validate_shape(data)?;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        self.write_sheet(sheet, data).map_err(xlsx_err)?;
        let bytes = workbook.save_to_buffer().map_err(xlsx_err)?;

        debug!("Wrote {} rows to worksheet '{}' ({} bytes)", data.rows.len(), sanitize_sheet_name(&data.title), bytes.len());
        Ok(Artifact::new(bytes, artifact_filename(data, ReportFormat::Spreadsheet), ReportFormat::Spreadsheet))
    }
}
