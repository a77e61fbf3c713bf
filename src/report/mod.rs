//! Report module - the format-neutral report model and everything that turns it into files.
//!
//! This module handles:
//! - The column/row data model shared by adapters and renderers
//! - Format dispatch and generation timestamps
//! - Rendering to PDF, XLSX, CSV/TSV and JSON
//!
//! Value formatting lives in `crate::format`; domain mapping lives in `crate::adapters`.
//!
//! # Module Organization
//!
//! - `types` - Core model types (ReportColumn, ReportRow, ReportData, Artifact, ReportFormat)
//! - `generator` - `ReportGenerator`, format lookup and empty-dataset warnings
//! - `render` - One `Renderer` per output format plus shared shape validation

mod generator;
pub mod render;
mod types;

// Re-export model types
pub use types::{
    Artifact, CellValue, ColumnKind, ReportColumn, ReportData, ReportFormat, ReportRow, ReportWarning,
};

// Re-export the generator
pub use generator::{ReportGenerator, generate};

// Re-export renderer entry points
pub use render::{PageOrientation, Renderer, paginate, validate_shape};
