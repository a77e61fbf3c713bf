//! JSON renderer.

use super::{Renderer, artifact_filename, validate_shape};
use crate::error::{ReportError, Result};
use crate::report::types::{Artifact, ReportColumn, ReportData, ReportFormat};
use serde::Serialize;

/// Serialized view: rows become arrays of display strings in column order.
#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'a str>,
    generated_at: Option<String>,
    columns: &'a [ReportColumn],
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        JsonRenderer
    }
}

impl Renderer for JsonRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, data: &ReportData) -> Result<Artifact> {
        validate_shape(data)?;

        let view = JsonReport {
            title: &data.title,
            subtitle: data.subtitle.as_deref(),
            generated_at: data.generated_at.map(|dt| dt.to_rfc3339()),
            columns: &data.columns,
            rows: data.rows.iter().map(|row| data.display_row(row)).collect(),
        };

        let bytes = serde_json::to_vec_pretty(&view).map_err(|e| ReportError::render("json", e))?;
        Ok(Artifact::new(bytes, artifact_filename(data, ReportFormat::Json), ReportFormat::Json))
    }
}
