//! Error types for report generation

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building or rendering a report.
///
/// Domain adapters and formatting utilities never fail; these values only come out of the
/// generator/renderer boundary and the host-side input/config handling.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested output format is not known to the generator
    #[error("unsupported report format: '{0}'")]
    UnsupportedFormat(String),

    /// A row or column list violates the report data invariants (adapter defect)
    #[error("malformed report data: {0}")]
    MalformedReportData(String),

    /// The PDF/XLSX/CSV backend failed while serializing
    #[error("{format} renderer failed: {message}")]
    Render {
        /// Format label of the failing renderer
        format: &'static str,
        /// Backend error text
        message: String,
    },

    /// Input records could not be decoded
    #[error("invalid input records: {0}")]
    Input(String),

    /// Configuration file could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error (from std::io)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Build a renderer failure from any displayable backend error.
    pub fn render(format: &'static str, err: impl std::fmt::Display) -> Self {
        ReportError::Render { format, message: err.to_string() }
    }

    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ReportError::UnsupportedFormat(_) => "Formato no disponible",
            ReportError::MalformedReportData(_) | ReportError::Render { .. } => "No se pudo generar el informe",
            ReportError::Input(_) => "Los registros recibidos no son válidos",
            ReportError::Config(_) => "La configuración de informes no es válida",
            ReportError::Io(_) => "No se pudo guardar el informe",
        }
    }
}
