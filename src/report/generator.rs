//! Report generator - format dispatch.
//!
//! Parses the requested format, stamps the generation time on a copy of the report and hands
//! it to the matching renderer. Renderers are held in a table keyed by [`ReportFormat`];
//! adding a format means adding a renderer to that table.

use super::render::{Renderer, default_renderers};
use super::types::{Artifact, ReportData, ReportFormat, ReportWarning};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use chrono::{DateTime, Local};
use log::{error, info, warn};

pub struct ReportGenerator {
    renderers: Vec<Box<dyn Renderer>>,
}

impl ReportGenerator {
    /// Generator with one renderer per supported format, configured from `config`
    pub fn new(config: &ReportConfig) -> Self {
        Self::with_renderers(default_renderers(config))
    }

    /// Generator over a custom renderer table. Later entries win when two share a format.
    pub fn with_renderers(renderers: Vec<Box<dyn Renderer>>) -> Self {
        Self { renderers }
    }

    /// Formats this generator can produce, in table order
    pub fn supported_formats(&self) -> Vec<ReportFormat> {
        let mut formats: Vec<ReportFormat> = Vec::new();
        for renderer in &self.renderers {
            if !formats.contains(&renderer.format()) {
                formats.push(renderer.format());
            }
        }
        formats
    }

    fn renderer_for(&self, format: ReportFormat) -> Option<&dyn Renderer> {
        self.renderers.iter().rev().find(|r| r.format() == format).map(|r| r.as_ref())
    }

    /// Generate an artifact from a user-supplied format name (e.g. `"pdf"`, `"csv"`).
    pub fn generate(&self, data: &ReportData, format: &str) -> Result<Artifact> {
        let format: ReportFormat = format.parse()?;
        self.generate_as(data, format)
    }

    /// Generate an artifact stamped with the current local time.
    pub fn generate_as(&self, data: &ReportData, format: ReportFormat) -> Result<Artifact> {
        self.generate_at(data, format, Local::now())
    }

    /// Generate an artifact stamped with `now`.
    ///
    /// The caller's `data` is never modified; the timestamp goes on a clone.
    pub fn generate_at(&self, data: &ReportData, format: ReportFormat, now: DateTime<Local>) -> Result<Artifact> {
        let renderer = self.renderer_for(format).ok_or_else(|| ReportError::UnsupportedFormat(format.to_string()))?;

        let mut stamped = data.clone();
        stamped.generated_at = Some(now);

        let mut artifact = match renderer.render(&stamped) {
            Ok(artifact) => artifact,
            Err(e) => {
                if matches!(e, ReportError::MalformedReportData(_)) {
                    error!("Report '{}' rejected by {} renderer: {}", data.title, format, e);
                }
                return Err(e);
            }
        };

        if stamped.is_empty() {
            warn!("Report '{}' has no rows; generating {} with headers only", data.title, format);
            artifact.warnings.push(ReportWarning::EmptyDataset);
        }

        info!("Generated {} ({}, {} bytes)", artifact.filename, format, artifact.len());
        Ok(artifact)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}

/// Generate with the default configuration.
pub fn generate(data: &ReportData, format: &str) -> Result<Artifact> {
    ReportGenerator::default().generate(data, format)
}
