//! Delimited-text renderer (CSV / TSV).
//!
//! Escaping follows RFC 4180: a field is wrapped in double quotes when it contains the
//! delimiter, a double quote, CR or LF, and embedded quotes are doubled. Records end with
//! CRLF. Output is UTF-8, optionally prefixed with a byte order mark.

use super::{Renderer, artifact_filename, validate_shape};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::report::types::{Artifact, ReportData, ReportFormat};
use log::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Renders the header line plus one line per row.
#[derive(Debug, Clone)]
pub struct DelimitedTextRenderer {
    delimiter: u8,
    include_bom: bool,
    format: ReportFormat,
}

impl DelimitedTextRenderer {
    /// Comma-separated output
    pub fn new() -> Self {
        Self { delimiter: b',', include_bom: false, format: ReportFormat::DelimitedText }
    }

    /// Tab-separated output
    pub fn tab_separated() -> Self {
        Self { delimiter: b'\t', include_bom: false, format: ReportFormat::TabSeparated }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            delimiter: config.delimited.delimiter_byte(),
            include_bom: config.delimited.include_bom,
            format: ReportFormat::DelimitedText,
        }
    }

    pub fn with_bom(mut self, include_bom: bool) -> Self {
        self.include_bom = include_bom;
        self
    }

    fn encode(&self, data: &ReportData) -> std::result::Result<Vec<u8>, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(data.columns.iter().map(|c| c.header.as_str()))?;
        for row in &data.rows {
            writer.write_record(data.display_row(row))?;
        }

        writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
    }
}

impl Default for DelimitedTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DelimitedTextRenderer {
    fn format(&self) -> ReportFormat {
        self.format
    }

    fn render(&self, data: &ReportData) -> Result<Artifact> {
        validate_shape(data)?;

        let body = self.encode(data).map_err(|e| ReportError::render(self.format.as_str(), e))?;
        let mut bytes = Vec::with_capacity(body.len() + UTF8_BOM.len());
        if self.include_bom {
            bytes.extend_from_slice(UTF8_BOM);
        }
        bytes.extend_from_slice(&body);

        debug!("Encoded {} rows as {} ({} bytes)", data.rows.len(), self.format, bytes.len());
        Ok(Artifact::new(bytes, artifact_filename(data, self.format), self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{ColumnKind, ReportColumn, ReportRow};

    fn report_with(values: &[&str]) -> ReportData {
        let mut data = ReportData::new(
            "Observaciones",
            vec![ReportColumn::new("id", "ID", ColumnKind::Text), ReportColumn::new("obs", "Observación", ColumnKind::Text)],
        );
        for (i, v) in values.iter().enumerate() {
            data.push_row(ReportRow::new().with("id", format!("I{}", i + 1)).with("obs", *v));
        }
        data
    }

    fn render_text(renderer: &DelimitedTextRenderer, data: &ReportData) -> String {
        String::from_utf8(renderer.render(data).unwrap().bytes).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let text = render_text(&DelimitedTextRenderer::new(), &report_with(&["sin novedad"]));
        assert_eq!(text, "ID,Observación\r\nI1,sin novedad\r\n");
    }

    #[test]
    fn test_quotes_only_when_needed() {
        let text = render_text(
            &DelimitedTextRenderer::new(),
            &report_with(&["freno, cadena", "dijo \"ok\"", "línea 1\nlínea 2", "normal"]),
        );
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[1], "I1,\"freno, cadena\"");
        assert_eq!(lines[2], "I2,\"dijo \"\"ok\"\"\"");
        assert!(text.contains("I3,\"línea 1\nlínea 2\""));
        assert!(text.contains("I4,normal\r\n"));
    }

    #[test]
    fn test_tab_separated_does_not_quote_commas() {
        let renderer = DelimitedTextRenderer::tab_separated();
        let text = render_text(&renderer, &report_with(&["freno, cadena"]));
        assert_eq!(text, "ID\tObservación\r\nI1\tfreno, cadena\r\n");
        assert_eq!(renderer.format(), ReportFormat::TabSeparated);
    }

    #[test]
    fn test_bom_prefix() {
        let artifact = DelimitedTextRenderer::new().with_bom(true).render(&report_with(&[])).unwrap();
        assert!(artifact.bytes.starts_with(UTF8_BOM));
        assert_eq!(&artifact.bytes[UTF8_BOM.len()..], b"ID,Observaci\xC3\xB3n\r\n");
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let artifact = DelimitedTextRenderer::new().render(&report_with(&[])).unwrap();
        assert_eq!(artifact.bytes, "ID,Observación\r\n".as_bytes());
        assert_eq!(artifact.content_type, "text/csv; charset=utf-8");
        assert!(artifact.filename.ends_with(".csv"));
    }

    #[test]
    fn test_malformed_rows_rejected() {
        let mut data = report_with(&["x"]);
        data.rows[0].remove("obs");
        assert!(matches!(DelimitedTextRenderer::new().render(&data), Err(ReportError::MalformedReportData(_))));
    }
}
