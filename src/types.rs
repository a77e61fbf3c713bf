/// Domain records consumed by the report adapters
///
/// These mirror what the platform stores for its cranes and crews. The report core only
/// reads them: records arrive as JSON (binary) or as plain values (library) and are never
/// modified. Optional fields map to `Option` and render as the placeholder when absent.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One vehicle inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: String,
    pub vehiculo_id: String,
    pub fecha: NaiveDate,
    pub tipo: String,      // "preoperacional", "mantenimiento", ...
    pub inspector: String, // free text, capitalized on output
    #[serde(default)]
    pub aprobada: Option<bool>,
    #[serde(default)]
    pub horometro: Option<f64>,
    #[serde(default)]
    pub costo_reparacion: Option<f64>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// A crane truck / platform in the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub placa: String,
    pub tipo: String,
    pub estado: String,
    #[serde(default)]
    pub ultima_inspeccion: Option<NaiveDateTime>,
    #[serde(default)]
    pub capacidad_kg: Option<f64>,
}

/// Crew role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rol {
    Operario,
    Auxiliar,
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rol::Operario => write!(f, "Operario"),
            Rol::Auxiliar => write!(f, "Auxiliar"),
        }
    }
}

/// A crew member (operator or assistant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub documento: String,
    pub nombre: String,
    pub rol: Rol,
}

/// One engagement of a person with the company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorialPersonal {
    pub persona: Persona,
    pub cargo: String,
    #[serde(default)]
    pub vehiculo_id: Option<String>,
    pub fecha_ingreso: NaiveDate,
    /// None while the person is still engaged
    #[serde(default)]
    pub fecha_retiro: Option<NaiveDate>,
    #[serde(default)]
    pub vence_certificacion: Option<NaiveDate>,
}

/// Operational-log event recorded during a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitacoraEvento {
    pub id: String,
    pub vehiculo_id: String,
    pub fecha_hora: NaiveDateTime,
    pub tipo: String,
    pub descripcion: String,
    #[serde(default)]
    pub operario: Option<String>,
    #[serde(default)]
    pub horometro: Option<f64>,
}

/// End-of-shift closure entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitacoraCierre {
    pub id: String,
    pub vehiculo_id: String,
    pub fecha_hora: NaiveDateTime,
    #[serde(default)]
    pub horometro_final: Option<f64>,
    #[serde(default)]
    pub combustible_litros: Option<f64>,
    /// Whether incidents were reported for the shift
    #[serde(default)]
    pub novedades: bool,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Entry of the operational log: either an event or a closure.
///
/// Tagged by a `"registro"` field: `{"registro": "evento", ...}` / `{"registro": "cierre", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "registro", rename_all = "lowercase")]
pub enum LogEntry {
    Evento(BitacoraEvento),
    Cierre(BitacoraCierre),
}

impl LogEntry {
    /// Timestamp used for chronological ordering
    pub fn fecha_hora(&self) -> NaiveDateTime {
        match self {
            LogEntry::Evento(e) => e.fecha_hora,
            LogEntry::Cierre(c) => c.fecha_hora,
        }
    }

    pub fn vehiculo_id(&self) -> &str {
        match self {
            LogEntry::Evento(e) => &e.vehiculo_id,
            LogEntry::Cierre(c) => &c.vehiculo_id,
        }
    }

    /// Label for the "Registro" column
    pub fn kind_label(&self) -> &'static str {
        match self {
            LogEntry::Evento(_) => "Evento",
            LogEntry::Cierre(_) => "Cierre",
        }
    }
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
