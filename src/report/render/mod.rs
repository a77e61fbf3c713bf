//! Renderer backends.
//!
//! Every backend implements [`Renderer`], so the generator only has to look one up by
//! [`ReportFormat`]. Shape validation and artifact naming live here and are shared by all
//! backends.

mod delimited;
mod document;
mod json;
mod spreadsheet;

pub use delimited::DelimitedTextRenderer;
pub use document::{DocumentLayout, DocumentRenderer, PageOrientation, paginate};
pub use json::JsonRenderer;
pub use spreadsheet::{SpreadsheetRenderer, TypedCell, sanitize_sheet_name, typed_cell};

use super::types::{Artifact, ReportData, ReportFormat};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use std::collections::HashSet;

/// A format-specific backend turning report data into a downloadable artifact.
pub trait Renderer {
    /// Format this renderer produces
    fn format(&self) -> ReportFormat;

    /// Render the report. Implementations must call [`validate_shape`] first and must not
    /// return a partial artifact on failure.
    fn render(&self, data: &ReportData) -> Result<Artifact>;
}

/// The stock set of renderers, one per supported format.
pub fn default_renderers(config: &ReportConfig) -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(DocumentRenderer::from_config(config)),
        Box::new(SpreadsheetRenderer::new()),
        Box::new(DelimitedTextRenderer::from_config(config)),
        Box::new(DelimitedTextRenderer::tab_separated()),
        Box::new(JsonRenderer::new()),
    ]
}

/// Check the report data invariants.
///
/// Fails with [`ReportError::MalformedReportData`] when rows exist without columns, a
/// column key is duplicated, a header is blank, or a row is missing a declared key or
/// carries an undeclared one.
pub fn validate_shape(data: &ReportData) -> Result<()> {
    if data.columns.is_empty() && !data.rows.is_empty() {
        return Err(ReportError::MalformedReportData(format!(
            "report '{}' has {} rows but no columns",
            data.title,
            data.rows.len()
        )));
    }

    let mut seen = HashSet::new();
    for column in &data.columns {
        if column.header.trim().is_empty() {
            return Err(ReportError::MalformedReportData(format!("column '{}' has an empty header", column.key)));
        }
        if !seen.insert(column.key.as_str()) {
            return Err(ReportError::MalformedReportData(format!("duplicate column key '{}'", column.key)));
        }
    }

    for (index, row) in data.rows.iter().enumerate() {
        if let Some(missing) = data.columns.iter().find(|c| row.get(&c.key).is_none()) {
            return Err(ReportError::MalformedReportData(format!(
                "row {} is missing a value for column '{}'",
                index + 1,
                missing.key
            )));
        }
        if let Some(extra) = row.keys().find(|k| !seen.contains(k)) {
            return Err(ReportError::MalformedReportData(format!(
                "row {} carries undeclared key '{}'",
                index + 1,
                extra
            )));
        }
    }

    Ok(())
}

/// Suggested download name: `<slug(title)>_<YYYYMMDD-HHMM>.<ext>`.
pub fn artifact_filename(data: &ReportData, format: ReportFormat) -> String {
    let stamp = data
        .generated_at
        .map(|dt| dt.format("%Y%m%d-%H%M").to_string())
        .unwrap_or_else(|| "sin-fecha".to_string());
    format!("{}_{}.{}", slugify(&data.title), stamp, format.extension())
}

/// Lowercase ASCII slug with Spanish accents folded ("Bitácora Operación" → "bitacora-operacion").
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;

    for c in s.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            c => c,
        };
        if folded.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(folded);
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() { "informe".to_string() } else { out }
}
