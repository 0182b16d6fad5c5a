//! Process-wide table of formation enthalpies and sensible reference
//! enthalpies used by the energy balance. The built-in values are loaded
//! once; at startup the formation enthalpies may be refreshed from the NIST
//! WebBook, best-effort, and on any failure the built-in values stay in
//! force. Consumers always read through [`enthalpy_table`]; the refresh is
//! never re-attempted after initialization.

use crate::Thermodynamics::NIST_fetch::{
    HttpClient, NistEnthalpyParser, fetch_formation_enthalpies,
};
use log::{info, warn};
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// enthalpies in kJ/kmol: `hf` at the standard state, `h_ref` the sensible
/// molar enthalpy at the 298 K reference (absent for species that only
/// appear on the reactant side)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SpeciesEnthalpy {
    pub hf: f64,
    pub h_ref: Option<f64>,
}

// Formation enthalpies and 298 K reference enthalpies, Moran & Shapiro
// Table A-23 / A-25 values, kJ/kmol. H2 and Ar are elements with hf = 0;
// they are carried so reactant-side sums never miss a key.
const BUILTIN_TABLE_JSON: &str = r#"{
    "CO":  { "hf": -110530.0, "h_ref": null },
    "CH4": { "hf": -74850.0,  "h_ref": null },
    "O2":  { "hf": 0.0,       "h_ref": 10809.0 },
    "N2":  { "hf": 0.0,       "h_ref": 10763.0 },
    "CO2": { "hf": -393520.0, "h_ref": 12148.0 },
    "H2O": { "hf": -241820.0, "h_ref": 12331.0 },
    "H2":  { "hf": 0.0,       "h_ref": 8468.0 },
    "Ar":  { "hf": 0.0,       "h_ref": null }
}"#;

#[derive(Debug, Clone)]
pub struct EnthalpyTable {
    table: HashMap<String, SpeciesEnthalpy>,
}

impl EnthalpyTable {
    /// the built-in reference values
    pub fn builtin() -> Self {
        let table: HashMap<String, SpeciesEnthalpy> =
            serde_json::from_str(BUILTIN_TABLE_JSON).unwrap();
        Self { table }
    }

    pub fn get(&self, species: &str) -> Option<&SpeciesEnthalpy> {
        self.table.get(species)
    }

    pub fn formation_enthalpy(&self, species: &str) -> Option<f64> {
        self.table.get(species).map(|entry| entry.hf)
    }

    pub fn reference_enthalpy(&self, species: &str) -> Option<f64> {
        self.table.get(species).and_then(|entry| entry.h_ref)
    }

    pub fn species(&self) -> Vec<String> {
        let mut species: Vec<String> = self.table.keys().cloned().collect();
        species.sort();
        species
    }

    /// new table with the given formation enthalpies replacing the built-in
    /// ones; species missing from `updates` keep their current values
    pub fn with_formation_enthalpies(&self, updates: &HashMap<String, f64>) -> Self {
        let mut table = self.table.clone();
        for (species, hf) in updates {
            if let Some(entry) = table.get_mut(species) {
                entry.hf = *hf;
            }
        }
        Self { table }
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Species", "hf (kJ/kmol)", "h_ref at 298 K (kJ/kmol)"]);
        for species in self.species() {
            let entry = &self.table[&species];
            let h_ref = entry
                .h_ref
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![species, entry.hf, h_ref]);
        }
        table.printstd();
    }
}

/// outcome of the one-shot startup refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// refresh never ran; built-in values in force
    NotAttempted,
    /// at least one formation enthalpy came from the WebBook
    Refreshed,
    /// refresh ran and failed; built-in values in force
    FallbackBuiltin,
}

static ENTHALPY_TABLE: OnceLock<(EnthalpyTable, FetchStatus)> = OnceLock::new();

/// One-shot, best-effort initialization of the process-wide table. The first
/// caller decides the outcome; later calls return the recorded status
/// without touching the network again.
pub fn init_enthalpy_table<C: HttpClient>(client: C) -> FetchStatus {
    let (_, status) = ENTHALPY_TABLE.get_or_init(|| {
        let builtin = EnthalpyTable::builtin();
        let parser = NistEnthalpyParser::with_client(client);
        let fetched = fetch_formation_enthalpies(&parser, &builtin.species());
        if fetched.is_empty() {
            warn!("enthalpy refresh failed for every species, built-in table stays in force");
            (builtin, FetchStatus::FallbackBuiltin)
        } else {
            info!(
                "enthalpy table refreshed from NIST for {} species",
                fetched.len()
            );
            (builtin.with_formation_enthalpies(&fetched), FetchStatus::Refreshed)
        }
    });
    *status
}

/// The process-wide enthalpy table. If [`init_enthalpy_table`] never ran,
/// the built-in values are installed with status `NotAttempted`.
pub fn enthalpy_table() -> &'static EnthalpyTable {
    let (table, _) =
        ENTHALPY_TABLE.get_or_init(|| (EnthalpyTable::builtin(), FetchStatus::NotAttempted));
    table
}

pub fn enthalpy_fetch_status() -> FetchStatus {
    let (_, status) =
        ENTHALPY_TABLE.get_or_init(|| (EnthalpyTable::builtin(), FetchStatus::NotAttempted));
    *status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_values() {
        let table = EnthalpyTable::builtin();
        assert_eq!(table.formation_enthalpy("CO"), Some(-110530.0));
        assert_eq!(table.formation_enthalpy("CH4"), Some(-74850.0));
        assert_eq!(table.formation_enthalpy("O2"), Some(0.0));
        assert_eq!(table.reference_enthalpy("CO2"), Some(12148.0));
        assert_eq!(table.reference_enthalpy("H2O"), Some(12331.0));
        assert_eq!(table.reference_enthalpy("N2"), Some(10763.0));
        assert_eq!(table.reference_enthalpy("O2"), Some(10809.0));
        // reactant-only species carry no reference enthalpy
        assert_eq!(table.reference_enthalpy("CO"), None);
        assert_eq!(table.formation_enthalpy("H2"), Some(0.0));
    }

    #[test]
    fn test_refresh_merges_partially() {
        let table = EnthalpyTable::builtin();
        let mut updates = HashMap::new();
        updates.insert("CO".to_string(), -110500.0);
        // unknown species in the update set must not create entries
        updates.insert("SO2".to_string(), -296800.0);
        let refreshed = table.with_formation_enthalpies(&updates);
        assert_eq!(refreshed.formation_enthalpy("CO"), Some(-110500.0));
        assert_eq!(refreshed.formation_enthalpy("CH4"), Some(-74850.0));
        assert_eq!(refreshed.formation_enthalpy("SO2"), None);
    }

    #[test]
    fn test_accessor_installs_builtin_fallback() {
        // whatever ran first in this process, the accessor must serve a table
        let table = enthalpy_table();
        assert!(table.get("CO2").is_some());
    }
}
