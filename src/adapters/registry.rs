//! Fixed table from domain tag to adapter.

use super::{
    DomainAdapter, InspectionsAdapter, OperationalLogAdapter, PersonnelAdapter, ReportContext, VehiclesAdapter,
    build_from_json,
};
use crate::error::{ReportError, Result};
use crate::report::{ReportColumn, ReportData};
use std::fmt;
use std::str::FromStr;

/// Report domains the platform can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportDomain {
    Inspections,
    Vehicles,
    Personnel,
    OperationalLog,
}

impl ReportDomain {
    pub const ALL: [ReportDomain; 4] =
        [ReportDomain::Inspections, ReportDomain::Vehicles, ReportDomain::Personnel, ReportDomain::OperationalLog];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportDomain::Inspections => "inspections",
            ReportDomain::Vehicles => "vehicles",
            ReportDomain::Personnel => "personnel",
            ReportDomain::OperationalLog => "log",
        }
    }

    /// Registry entry for this domain
    pub fn entry(&self) -> Option<&'static RegistryEntry> {
        REGISTRY.iter().find(|e| e.domain == *self)
    }
}

impl fmt::Display for ReportDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportDomain {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inspections" | "inspecciones" => Ok(ReportDomain::Inspections),
            "vehicles" | "vehiculos" => Ok(ReportDomain::Vehicles),
            "personnel" | "personal" => Ok(ReportDomain::Personnel),
            "log" | "bitacora" | "operational-log" => Ok(ReportDomain::OperationalLog),
            _ => Err(ReportError::Input(format!("unknown report domain '{}'", s))),
        }
    }
}

/// One domain's entry points
pub struct RegistryEntry {
    pub domain: ReportDomain,
    pub title: &'static str,
    pub columns: fn() -> Vec<ReportColumn>,
    pub build: fn(&str, &ReportContext) -> Result<ReportData>,
}

pub const REGISTRY: &[RegistryEntry] = &[
    RegistryEntry {
        domain: ReportDomain::Inspections,
        title: InspectionsAdapter::TITLE,
        columns: InspectionsAdapter::columns,
        build: build_from_json::<InspectionsAdapter>,
    },
    RegistryEntry {
        domain: ReportDomain::Vehicles,
        title: VehiclesAdapter::TITLE,
        columns: VehiclesAdapter::columns,
        build: build_from_json::<VehiclesAdapter>,
    },
    RegistryEntry {
        domain: ReportDomain::Personnel,
        title: PersonnelAdapter::TITLE,
        columns: PersonnelAdapter::columns,
        build: build_from_json::<PersonnelAdapter>,
    },
    RegistryEntry {
        domain: ReportDomain::OperationalLog,
        title: OperationalLogAdapter::TITLE,
        columns: OperationalLogAdapter::columns,
        build: build_from_json::<OperationalLogAdapter>,
    },
];

/// Decode `json` records for `domain` and build its report.
pub fn build_for_domain(domain: ReportDomain, json: &str, ctx: &ReportContext) -> Result<ReportData> {
    let entry = domain.entry().ok_or_else(|| ReportError::Input(format!("no adapter registered for '{}'", domain)))?;
    (entry.build)(json, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_domain_aliases() {
        let cases = [
            ("inspections", ReportDomain::Inspections),
            ("Inspecciones", ReportDomain::Inspections),
            ("vehiculos", ReportDomain::Vehicles),
            ("personal", ReportDomain::Personnel),
            ("bitacora", ReportDomain::OperationalLog),
            ("operational-log", ReportDomain::OperationalLog),
            (" log ", ReportDomain::OperationalLog),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<ReportDomain>().unwrap(), expected, "{}", input);
        }
        assert!(matches!("grúas".parse::<ReportDomain>(), Err(ReportError::Input(_))));
    }

    #[test]
    fn test_registry_covers_every_domain_once() {
        assert_eq!(REGISTRY.len(), ReportDomain::ALL.len());
        let domains: HashSet<ReportDomain> = REGISTRY.iter().map(|e| e.domain).collect();
        assert_eq!(domains.len(), ReportDomain::ALL.len());
        for domain in ReportDomain::ALL {
            assert_eq!(domain.as_str().parse::<ReportDomain>().unwrap(), domain);
            assert!(domain.entry().is_some());
        }
    }

    #[test]
    fn test_registry_column_keys_unique() {
        for entry in REGISTRY {
            let columns = (entry.columns)();
            let keys: HashSet<&str> = columns.iter().map(|c| c.key.as_str()).collect();
            assert_eq!(keys.len(), columns.len(), "{} has duplicate keys", entry.title);
        }
    }
}
