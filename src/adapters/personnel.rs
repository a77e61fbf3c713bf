//! Personnel report: one row per engagement (operators and assistants).

use super::{DomainAdapter, ReportContext, elapsed_days};
use crate::format::{capitalize_text, format_boolean, format_date, format_number, format_text};
use crate::report::{ColumnKind, ReportColumn, ReportRow};
use crate::types::HistorialPersonal;
use chrono::NaiveDate;

pub struct PersonnelAdapter;

impl PersonnelAdapter {
    /// Engaged when there is no termination date or it lies after `today`
    pub fn is_active(record: &HistorialPersonal, today: NaiveDate) -> bool {
        record.fecha_retiro.is_none_or(|end| end > today)
    }

    /// Days worked up to the termination date, or up to `today` while still engaged
    pub fn service_days(record: &HistorialPersonal, today: NaiveDate) -> i64 {
        let until = record.fecha_retiro.map_or(today, |end| end.min(today));
        elapsed_days(&format!("Start date of {}", record.persona.documento), record.fecha_ingreso, until)
    }
}

impl DomainAdapter for PersonnelAdapter {
    type Record = HistorialPersonal;

    const TITLE: &'static str = "Informe de personal";

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("documento", "Documento", ColumnKind::Text),
            ReportColumn::new("nombre", "Nombre", ColumnKind::Text).with_width(1.8),
            ReportColumn::new("rol", "Rol", ColumnKind::Text).with_width(0.8),
            ReportColumn::new("cargo", "Cargo", ColumnKind::Text).with_width(1.3),
            ReportColumn::new("vehiculo", "Vehículo", ColumnKind::Text).with_width(0.8),
            ReportColumn::new("fecha_ingreso", "Fecha ingreso", ColumnKind::Date),
            ReportColumn::new("fecha_retiro", "Fecha retiro", ColumnKind::Date),
            ReportColumn::new("activo", "Activo", ColumnKind::Boolean).with_width(0.6),
            ReportColumn::new("dias_servicio", "Días de servicio", ColumnKind::Number),
            ReportColumn::new("vence_certificacion", "Vence certificación", ColumnKind::Date).with_width(1.2),
        ]
    }

    fn row(record: &HistorialPersonal, ctx: &ReportContext) -> ReportRow {
        let service_days = Self::service_days(record, ctx.today);

        ReportRow::new()
            .with("documento", format_text(Some(record.persona.documento.as_str())))
            .with("nombre", capitalize_text(Some(record.persona.nombre.as_str())))
            .with("rol", record.persona.rol.to_string())
            .with("cargo", capitalize_text(Some(record.cargo.as_str())))
            .with("vehiculo", format_text(record.vehiculo_id.as_deref()))
            .with("fecha_ingreso", format_date(Some(record.fecha_ingreso)))
            .with("fecha_retiro", format_date(record.fecha_retiro))
            .with("activo", format_boolean(Some(Self::is_active(record, ctx.today))))
            .with("dias_servicio", format_number(Some(service_days as f64), 0))
            .with("vence_certificacion", format_date(record.vence_certificacion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::build_report;
    use crate::format::PLACEHOLDER;
    use crate::report::CellValue;
    use crate::types::{Persona, Rol};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn engagement(end: Option<NaiveDate>) -> HistorialPersonal {
        HistorialPersonal {
            persona: Persona { documento: "1020304050".into(), nombre: "JUAN CARLOS DE LA PEÑA".into(), rol: Rol::Operario },
            cargo: "operador de grúa".into(),
            vehiculo_id: Some("GRU-01".into()),
            fecha_ingreso: date(2026, 1, 1),
            fecha_retiro: end,
            vence_certificacion: None,
        }
    }

    fn row_of(record: HistorialPersonal) -> ReportRow {
        build_report::<PersonnelAdapter>(&[record], &ReportContext::new(today())).rows.remove(0)
    }

    #[test]
    fn test_open_engagement() {
        let row = row_of(engagement(None));
        assert_eq!(row.get("fecha_retiro"), Some(&CellValue::from(PLACEHOLDER)));
        assert_eq!(row.get("activo"), Some(&CellValue::from("Sí")));
        assert_eq!(row.get("dias_servicio"), Some(&CellValue::from("291")));
        assert_eq!(row.get("vence_certificacion"), Some(&CellValue::from(PLACEHOLDER)));
    }

    #[test]
    fn test_terminated_engagement() {
        let row = row_of(engagement(Some(date(2026, 3, 1))));
        assert_eq!(row.get("fecha_retiro"), Some(&CellValue::from("01/03/2026")));
        assert_eq!(row.get("activo"), Some(&CellValue::from("No")));
        assert_eq!(row.get("dias_servicio"), Some(&CellValue::from("59")));
    }

    #[test]
    fn test_termination_in_future_still_active() {
        let record = engagement(Some(date(2026, 12, 31)));
        assert!(PersonnelAdapter::is_active(&record, today()));
        // Counted up to today, not to the future end date
        assert_eq!(PersonnelAdapter::service_days(&record, today()), 291);
    }

    #[test]
    fn test_termination_today_is_inactive() {
        assert!(!PersonnelAdapter::is_active(&engagement(Some(today())), today()));
    }

    #[test]
    fn test_start_in_future_counts_zero_days() {
        let mut record = engagement(None);
        record.fecha_ingreso = date(2026, 11, 1);
        assert_eq!(PersonnelAdapter::service_days(&record, today()), 0);
    }

    #[test]
    fn test_names_and_roles() {
        let mut record = engagement(None);
        record.persona.rol = Rol::Auxiliar;
        record.vehiculo_id = None;
        let row = row_of(record);
        assert_eq!(row.get("nombre"), Some(&CellValue::from("Juan Carlos de la Peña")));
        assert_eq!(row.get("cargo"), Some(&CellValue::from("Operador de Grúa")));
        assert_eq!(row.get("rol"), Some(&CellValue::from("Auxiliar")));
        assert_eq!(row.get("vehiculo"), Some(&CellValue::from(PLACEHOLDER)));
    }
}
