//! Inspections report.

use super::{DomainAdapter, ReportContext};
use crate::format::{capitalize_text, format_boolean, format_currency, format_date, format_number, format_text};
use crate::report::{ColumnKind, ReportColumn, ReportRow};
use crate::types::Inspection;

/// Hour meters are read to one decimal
const HOUR_METER_PRECISION: usize = 1;

pub struct InspectionsAdapter;

impl DomainAdapter for InspectionsAdapter {
    type Record = Inspection;

    const TITLE: &'static str = "Informe de inspecciones";

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("id", "ID", ColumnKind::Text).with_width(0.7),
            ReportColumn::new("fecha", "Fecha", ColumnKind::Date),
            ReportColumn::new("vehiculo", "Vehículo", ColumnKind::Text),
            ReportColumn::new("tipo", "Tipo", ColumnKind::Text),
            ReportColumn::new("inspector", "Inspector", ColumnKind::Text).with_width(1.4),
            ReportColumn::new("aprobada", "Aprobada", ColumnKind::Boolean).with_width(0.8),
            ReportColumn::new("horometro", "Horómetro", ColumnKind::Number).with_precision(HOUR_METER_PRECISION),
            ReportColumn::new("costo", "Costo reparación", ColumnKind::Currency).with_width(1.2),
            ReportColumn::new("observaciones", "Observaciones", ColumnKind::Text).with_width(2.5),
        ]
    }

    fn row(record: &Inspection, _ctx: &ReportContext) -> ReportRow {
        ReportRow::new()
            .with("id", format_text(Some(record.id.as_str())))
            .with("fecha", format_date(Some(record.fecha)))
            .with("vehiculo", format_text(Some(record.vehiculo_id.as_str())))
            .with("tipo", capitalize_text(Some(record.tipo.as_str())))
            .with("inspector", capitalize_text(Some(record.inspector.as_str())))
            .with("aprobada", format_boolean(record.aprobada))
            .with("horometro", format_number(record.horometro, HOUR_METER_PRECISION))
            .with("costo", format_currency(record.costo_reparacion))
            .with("observaciones", format_text(record.observaciones.as_deref()))
    }
}
