//! Domain report adapters.
//!
//! This module handles:
//! - Mapping each domain's records onto a fixed column set
//! - Computing derived fields (days since inspection, service days, active flag)
//! - Ordering rows per domain
//! - Decoding JSON record arrays for the registry
//!
//! Adapters are pure: the reference date comes in through [`ReportContext`], records are only
//! borrowed, and every value is formatted once here so renderers never reformat.

mod inspections;
mod operational_log;
mod personnel;
mod registry;
mod vehicles;

pub use inspections::InspectionsAdapter;
pub use operational_log::OperationalLogAdapter;
pub use personnel::PersonnelAdapter;
pub use registry::{REGISTRY, RegistryEntry, ReportDomain, build_for_domain};
pub use vehicles::VehiclesAdapter;

use crate::error::{ReportError, Result};
use crate::format;
use crate::report::{ReportColumn, ReportData, ReportRow};
use chrono::{Local, NaiveDate};
use log::debug;
use serde::de::DeserializeOwned;

/// Optional filters the host applied when selecting records.
///
/// Adapters do not filter; the values only describe the selection in the report subtitle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub vehicle: Option<String>,
}

impl ReportFilters {
    /// Human-readable summary, e.g. "Desde 01/10/2026 hasta 19/10/2026 | Vehículo: GRU-01"
    pub fn subtitle(&self) -> Option<String> {
        let mut parts = Vec::new();

        match (self.from, self.to) {
            (Some(from), Some(to)) => parts.push(format!(
                "Desde {} hasta {}",
                format::format_date(Some(from)),
                format::format_date(Some(to))
            )),
            (Some(from), None) => parts.push(format!("Desde {}", format::format_date(Some(from)))),
            (None, Some(to)) => parts.push(format!("Hasta {}", format::format_date(Some(to)))),
            (None, None) => {}
        }

        if let Some(vehicle) = self.vehicle.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            parts.push(format!("Vehículo: {}", vehicle));
        }

        if parts.is_empty() { None } else { Some(parts.join(" | ")) }
    }
}

/// Everything an adapter may depend on besides the records themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Reference date for derived day counts
    pub today: NaiveDate,
    pub filters: ReportFilters,
}

impl ReportContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, filters: ReportFilters::default() }
    }

    /// Context anchored at the local calendar date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_filters(mut self, filters: ReportFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Mapping from one domain's records to the report model.
pub trait DomainAdapter {
    type Record: DeserializeOwned;

    /// Report title
    const TITLE: &'static str;

    /// Column set, in rendering order
    fn columns() -> Vec<ReportColumn>;

    /// One row per record; must fill every column key
    fn row(record: &Self::Record, ctx: &ReportContext) -> ReportRow;

    /// Row order. Input order unless a domain overrides it.
    fn order(records: &[Self::Record]) -> Vec<&Self::Record> {
        records.iter().collect()
    }
}

/// Build the report for a slice of records.
pub fn build_report<A: DomainAdapter>(records: &[A::Record], ctx: &ReportContext) -> ReportData {
    let mut data = ReportData::new(A::TITLE, A::columns()).with_subtitle(ctx.filters.subtitle());
    data.rows = A::order(records).into_iter().map(|record| A::row(record, ctx)).collect();

    debug!("Built '{}' with {} rows and {} columns", A::TITLE, data.rows.len(), data.columns.len());
    data
}

/// Decode a JSON array of records and build the report.
pub fn build_from_json<A: DomainAdapter>(json: &str, ctx: &ReportContext) -> Result<ReportData> {
    let records: Vec<A::Record> =
        serde_json::from_str(json).map_err(|e| ReportError::Input(format!("{}: {}", A::TITLE, e)))?;
    Ok(build_report::<A>(&records, ctx))
}

/// Days since `from`, clamped at zero; future dates are logged.
pub(crate) fn elapsed_days(what: &str, from: NaiveDate, today: NaiveDate) -> i64 {
    if from > today {
        log::warn!("{} {} is after the reference date {}; showing 0 days", what, from, today);
    }
    format::days_since(from, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::validate_shape;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filters_subtitle() {
        assert_eq!(ReportFilters::default().subtitle(), None);

        let filters = ReportFilters { from: Some(date(2026, 10, 1)), to: Some(date(2026, 10, 19)), vehicle: None };
        assert_eq!(filters.subtitle().unwrap(), "Desde 01/10/2026 hasta 19/10/2026");

        let filters = ReportFilters { from: None, to: Some(date(2026, 10, 19)), vehicle: Some("GRU-01".into()) };
        assert_eq!(filters.subtitle().unwrap(), "Hasta 19/10/2026 | Vehículo: GRU-01");

        let blank_vehicle = ReportFilters { vehicle: Some("  ".into()), ..Default::default() };
        assert_eq!(blank_vehicle.subtitle(), None);
    }

    #[test]
    fn test_elapsed_days_clamps() {
        assert_eq!(elapsed_days("x", date(2026, 10, 9), date(2026, 10, 19)), 10);
        assert_eq!(elapsed_days("x", date(2026, 10, 19), date(2026, 10, 19)), 0);
        assert_eq!(elapsed_days("x", date(2026, 11, 1), date(2026, 10, 19)), 0);
    }

    #[test]
    fn test_every_domain_empty_input() {
        let ctx = ReportContext::new(date(2026, 10, 19));
        for domain in ReportDomain::ALL {
            let data = build_for_domain(domain, "[]", &ctx).unwrap();
            assert!(data.rows.is_empty(), "{}", domain);
            assert!(!data.columns.is_empty(), "{}", domain);
            assert!(data.generated_at.is_none());
            validate_shape(&data).unwrap();
        }
    }

    #[test]
    fn test_invalid_json_is_input_error() {
        let ctx = ReportContext::new(date(2026, 10, 19));
        let err = build_from_json::<VehiclesAdapter>("{\"not\": \"a list\"}", &ctx).unwrap_err();
        assert!(matches!(err, ReportError::Input(_)));
    }

    #[test]
    fn test_subtitle_comes_from_filters() {
        let filters = ReportFilters { vehicle: Some("GRU-02".into()), ..Default::default() };
        let ctx = ReportContext::new(date(2026, 10, 19)).with_filters(filters);
        let data = build_report::<VehiclesAdapter>(&[], &ctx);
        assert_eq!(data.subtitle.as_deref(), Some("Vehículo: GRU-02"));
    }
}
