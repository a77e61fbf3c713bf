//! Vehicles (fleet) report.

use super::{DomainAdapter, ReportContext, elapsed_days};
use crate::format::{self, PLACEHOLDER, capitalize_text, format_number, format_text};
use crate::report::{ColumnKind, ReportColumn, ReportRow};
use crate::types::Vehicle;

pub struct VehiclesAdapter;

impl VehiclesAdapter {
    /// Days since the last inspection, or None when the vehicle was never inspected.
    ///
    /// Counts calendar dates, not 24-hour periods: the time of day is dropped first.
    pub fn days_since_inspection(vehicle: &Vehicle, ctx: &ReportContext) -> Option<i64> {
        let last = vehicle.ultima_inspeccion?.date();
        Some(elapsed_days(&format!("Last inspection of {}", vehicle.id), last, ctx.today))
    }
}

impl DomainAdapter for VehiclesAdapter {
    type Record = Vehicle;

    const TITLE: &'static str = "Informe de vehículos";

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("id", "ID", ColumnKind::Text).with_width(0.7),
            ReportColumn::new("placa", "Placa", ColumnKind::Text).with_width(0.8),
            ReportColumn::new("tipo", "Tipo", ColumnKind::Text).with_width(1.3),
            ReportColumn::new("estado", "Estado", ColumnKind::Text),
            ReportColumn::new("ultima_inspeccion", "Última inspección", ColumnKind::Date).with_width(1.2),
            ReportColumn::new("dias_desde_inspeccion", "Días desde inspección", ColumnKind::Number).with_width(1.2),
            ReportColumn::new("capacidad", "Capacidad (kg)", ColumnKind::Number),
        ]
    }

    fn row(record: &Vehicle, ctx: &ReportContext) -> ReportRow {
        let days = match Self::days_since_inspection(record, ctx) {
            Some(days) => format_number(Some(days as f64), 0),
            None => PLACEHOLDER.to_string(),
        };

        ReportRow::new()
            .with("id", format_text(Some(record.id.as_str())))
            .with("placa", format_text(Some(record.placa.trim().to_uppercase().as_str())))
            .with("tipo", capitalize_text(Some(record.tipo.as_str())))
            .with("estado", capitalize_text(Some(record.estado.as_str())))
            .with("ultima_inspeccion", format::format_date(record.ultima_inspeccion.map(|dt| dt.date())))
            .with("dias_desde_inspeccion", days)
            .with("capacidad", format_number(record.capacidad_kg, 0))
    }
}
