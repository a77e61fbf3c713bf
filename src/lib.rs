//! Report generation core for the crane-platform dashboards.
//!
//! Records from each domain (inspections, vehicles, personnel, operational log) are mapped by
//! an adapter into a format-neutral [`ReportData`], which [`ReportGenerator`] renders to PDF,
//! XLSX, CSV/TSV or JSON.
//!
//! ```no_run
//! use grua_report::adapters::{ReportContext, ReportDomain, build_for_domain};
//! use grua_report::report::generate;
//!
//! let json = std::fs::read_to_string("vehiculos.json")?;
//! let data = build_for_domain(ReportDomain::Vehicles, &json, &ReportContext::today())?;
//! let artifact = generate(&data, "xlsx")?;
//! std::fs::write(&artifact.filename, &artifact.bytes)?;
//! # Ok::<(), grua_report::ReportError>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod console_format;
pub mod error;
pub mod format;
pub mod report;
pub mod types;
pub mod ui;

pub use error::{ReportError, Result};
pub use report::{Artifact, ReportData, ReportFormat, ReportGenerator};
