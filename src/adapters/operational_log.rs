//! Operational log (bitácora) report.
//!
//! Events and shift closures share one table. Rows are sorted by timestamp; entries with the
//! same timestamp keep their input order (stable sort), so a closure recorded after the last
//! event of the same minute stays after it.

use super::{DomainAdapter, ReportContext};
use crate::format::{PLACEHOLDER, capitalize_text, format_boolean, format_datetime, format_number, format_text};
use crate::report::{ColumnKind, ReportColumn, ReportRow};
use crate::types::LogEntry;

const HOUR_METER_PRECISION: usize = 1;
const FUEL_PRECISION: usize = 1;
const CLOSURE_TYPE: &str = "Cierre de jornada";

pub struct OperationalLogAdapter;

impl DomainAdapter for OperationalLogAdapter {
    type Record = LogEntry;

    const TITLE: &'static str = "Bitácora de operación";

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("fecha_hora", "Fecha y hora", ColumnKind::DateTime).with_width(1.3),
            ReportColumn::new("vehiculo", "Vehículo", ColumnKind::Text).with_width(0.8),
            ReportColumn::new("registro", "Registro", ColumnKind::Text).with_width(0.8),
            ReportColumn::new("tipo", "Tipo", ColumnKind::Text).with_width(1.2),
            ReportColumn::new("descripcion", "Descripción", ColumnKind::Text).with_width(2.5),
            ReportColumn::new("operario", "Operario", ColumnKind::Text).with_width(1.4),
            ReportColumn::new("horometro", "Horómetro", ColumnKind::Number).with_precision(HOUR_METER_PRECISION),
            ReportColumn::new("combustible", "Combustible (L)", ColumnKind::Number).with_precision(FUEL_PRECISION),
            ReportColumn::new("novedades", "Novedades", ColumnKind::Boolean).with_width(0.8),
        ]
    }

    fn row(record: &LogEntry, _ctx: &ReportContext) -> ReportRow {
        let row = ReportRow::new()
            .with("fecha_hora", format_datetime(Some(record.fecha_hora())))
            .with("vehiculo", format_text(Some(record.vehiculo_id())))
            .with("registro", record.kind_label());

        match record {
            LogEntry::Evento(e) => row
                .with("tipo", capitalize_text(Some(e.tipo.as_str())))
                .with("descripcion", format_text(Some(e.descripcion.as_str())))
                .with("operario", capitalize_text(e.operario.as_deref()))
                .with("horometro", format_number(e.horometro, HOUR_METER_PRECISION))
                .with("combustible", PLACEHOLDER)
                .with("novedades", PLACEHOLDER),
            LogEntry::Cierre(c) => row
                .with("tipo", CLOSURE_TYPE)
                .with("descripcion", format_text(c.observaciones.as_deref()))
                .with("operario", PLACEHOLDER)
                .with("horometro", format_number(c.horometro_final, HOUR_METER_PRECISION))
                .with("combustible", format_number(c.combustible_litros, FUEL_PRECISION))
                .with("novedades", format_boolean(Some(c.novedades))),
        }
    }

    /// Chronological, stable for equal timestamps
    fn order(records: &[LogEntry]) -> Vec<&LogEntry> {
        let mut ordered: Vec<&LogEntry> = records.iter().collect();
        ordered.sort_by_key(|entry| entry.fecha_hora());
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{build_from_json, build_report};
    use crate::report::CellValue;
    use crate::types::{BitacoraCierre, BitacoraEvento};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn event(id: &str, when: NaiveDateTime) -> LogEntry {
        LogEntry::Evento(BitacoraEvento {
            id: id.into(),
            vehiculo_id: "GRU-01".into(),
            fecha_hora: when,
            tipo: "izaje".into(),
            descripcion: format!("evento {}", id),
            operario: Some("pedro pérez".into()),
            horometro: Some(812.26),
        })
    }

    fn closure(id: &str, when: NaiveDateTime) -> LogEntry {
        LogEntry::Cierre(BitacoraCierre {
            id: id.into(),
            vehiculo_id: "GRU-01".into(),
            fecha_hora: when,
            horometro_final: Some(820.0),
            combustible_litros: Some(45.5),
            novedades: true,
            observaciones: None,
        })
    }

    fn ctx() -> ReportContext {
        ReportContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn descriptions(entries: &[LogEntry]) -> Vec<CellValue> {
        build_report::<OperationalLogAdapter>(entries, &ctx())
            .rows
            .iter()
            .map(|r| r.get("descripcion").cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_sorted_chronologically() {
        let entries = vec![event("c", at(12, 9, 0)), event("a", at(10, 7, 30)), event("b", at(11, 18, 0))];
        assert_eq!(
            descriptions(&entries),
            vec![CellValue::from("evento a"), CellValue::from("evento b"), CellValue::from("evento c")]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let same = at(10, 17, 0);
        let entries = vec![event("x", same), event("earlier", at(10, 8, 0)), event("y", same), event("z", same)];
        assert_eq!(
            descriptions(&entries),
            vec![
                CellValue::from("evento earlier"),
                CellValue::from("evento x"),
                CellValue::from("evento y"),
                CellValue::from("evento z"),
            ]
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let entries = vec![event("b", at(11, 0, 0)), event("a", at(10, 0, 0))];
        let before = entries.clone();
        build_report::<OperationalLogAdapter>(&entries, &ctx());
        assert_eq!(entries, before);
    }

    #[test]
    fn test_event_and_closure_cells() {
        let data = build_report::<OperationalLogAdapter>(&[closure("k", at(10, 18, 0)), event("e", at(10, 8, 5))], &ctx());
        let (first, second) = (&data.rows[0], &data.rows[1]);

        assert_eq!(first.get("fecha_hora"), Some(&CellValue::from("10/10/2026 08:05")));
        assert_eq!(first.get("registro"), Some(&CellValue::from("Evento")));
        assert_eq!(first.get("operario"), Some(&CellValue::from("Pedro Pérez")));
        assert_eq!(first.get("horometro"), Some(&CellValue::from("812,3")));
        assert_eq!(first.get("combustible"), Some(&CellValue::from(PLACEHOLDER)));

        assert_eq!(second.get("registro"), Some(&CellValue::from("Cierre")));
        assert_eq!(second.get("tipo"), Some(&CellValue::from(CLOSURE_TYPE)));
        assert_eq!(second.get("descripcion"), Some(&CellValue::from(PLACEHOLDER)));
        assert_eq!(second.get("combustible"), Some(&CellValue::from("45,5")));
        assert_eq!(second.get("novedades"), Some(&CellValue::from("Sí")));
    }

    #[test]
    fn test_decode_tagged_json() {
        let json = r#"[
            {"registro": "cierre", "id": "C1", "vehiculo_id": "GRU-02", "fecha_hora": "2026-10-10T18:00:00"},
            {"registro": "evento", "id": "E1", "vehiculo_id": "GRU-02", "fecha_hora": "2026-10-10T07:00:00",
             "tipo": "inspección", "descripcion": "Arranque"}
        ]"#;
        let data = build_from_json::<OperationalLogAdapter>(json, &ctx()).unwrap();
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].get("registro"), Some(&CellValue::from("Evento")));
        assert_eq!(data.rows[1].get("novedades"), Some(&CellValue::from("No")));
    }
}
