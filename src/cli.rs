use crate::adapters::{ReportContext, ReportDomain, ReportFilters};
use crate::config::ReportConfig;
use crate::report::ReportFormat;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "grua-report")]
#[command(about = "Export crane-platform records as PDF, XLSX, CSV/TSV or JSON reports")]
#[command(version)]
pub struct CliArgs {
    /// Report domain: inspections, vehicles, personnel or log
    /// Spanish aliases are accepted (inspecciones, vehiculos, personal, bitacora)
    #[arg(long, short = 'd', value_name = "DOMAIN")]
    pub domain: String,

    /// JSON file holding an array of records for the domain
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Output format: pdf, xlsx, csv, tsv or json
    #[arg(long, short = 'f', default_value = "pdf")]
    pub format: String,

    /// Directory the artifact is written to
    /// Default: [output] directory from the config file, or ./informes
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (overrides GRUA_REPORT_CONFIG and the user config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start of the period the records were selected for (YYYY-MM-DD); shown in the subtitle
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// End of the period the records were selected for (YYYY-MM-DD); shown in the subtitle
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Vehicle the records were selected for; shown in the subtitle
    #[arg(long, value_name = "ID")]
    pub vehicle: Option<String>,

    /// Reference date for derived day counts (default: today)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Also print the report as a console table
    #[arg(long)]
    pub preview: bool,

    /// Maximum rows shown by --preview
    #[arg(long, default_value = "20")]
    pub preview_rows: usize,

    /// Override console width for the preview (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();

        // Treat `--vehicle ""` like no vehicle filter
        args.vehicle = args.vehicle.take().map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        self.report_domain()?;
        self.report_format()?;

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(format!("--from ({}) must not be after --to ({})", from, to));
            }
        }

        if self.preview && self.preview_rows == 0 {
            return Err("--preview-rows must be at least 1".to_string());
        }

        Ok(())
    }

    pub fn report_domain(&self) -> Result<ReportDomain, String> {
        self.domain.parse().map_err(|e: crate::error::ReportError| e.to_string())
    }

    pub fn report_format(&self) -> Result<ReportFormat, String> {
        self.format.parse().map_err(|e: crate::error::ReportError| e.to_string())
    }

    pub fn filters(&self) -> ReportFilters {
        ReportFilters { from: self.from, to: self.to, vehicle: self.vehicle.clone() }
    }

    /// Adapter context: `--today` or the local date, plus the subtitle filters
    pub fn context(&self) -> ReportContext {
        let ctx = match self.today {
            Some(today) => ReportContext::new(today),
            None => ReportContext::today(),
        };
        ctx.with_filters(self.filters())
    }

    /// Get the output directory, falling back to the configured one
    pub fn output_dir(&self, config: &ReportConfig) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| config.output.directory.clone())
    }
}
